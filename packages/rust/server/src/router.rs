use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/getAllDinoList", get(handlers::all_dino_list))
        .route("/getDinoDataByName", get(handlers::dino_data_by_name))
        .route(
            "/getAllDinoListWithDetails",
            get(handlers::all_dino_list_with_details),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
