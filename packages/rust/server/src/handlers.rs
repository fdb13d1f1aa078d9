use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use dinodir_core::SilentProgress;
use dinodir_shared::{DetailRecord, DinoDirError, ReferenceList};

use crate::{errors::AppError, state::AppState};

/// Query string of `/getDinoDataByName`.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// The health check handler.
pub async fn health_check() -> &'static str {
    "OK"
}

/// `GET /getAllDinoList`
pub async fn all_dino_list(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let references = app_state.directory.list().await?;
    json_response(&ReferenceList::from(references))
}

/// `GET /getDinoDataByName?name=<name>`
///
/// Always answers 200 unless encoding fails. Upstream errors are logged and
/// answered with the no-data record (`meaning` is `"N/A"`).
pub async fn dino_data_by_name(
    State(app_state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, AppError> {
    let name = query.name.unwrap_or_default();

    info!(%name, "detail requested");
    let record = match app_state.directory.detail(&name).await {
        Ok(record) => record,
        Err(e) => {
            warn!(%name, error = %e, "detail fetch failed, answering with no-data record");
            DetailRecord::no_data(&name)
        }
    };
    json_response(&record)
}

/// `GET /getAllDinoListWithDetails`
pub async fn all_dino_list_with_details(
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    let aggregate = app_state
        .directory
        .list_with_details(&SilentProgress)
        .await?;
    json_response(&aggregate)
}

/// Encoding failures surface as a 500 rather than a truncated body.
fn json_response<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value).map_err(DinoDirError::from)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
