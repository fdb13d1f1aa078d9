use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use dinodir_shared::DinoDirError;

/// Body sent for every server-side failure. Error details stay in the logs.
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Errors a handler can return.
#[derive(Debug)]
pub enum AppError {
    /// Anything from the directory pipeline or response encoding.
    Directory(DinoDirError),
}

impl From<DinoDirError> for AppError {
    fn from(err: DinoDirError) -> Self {
        AppError::Directory(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Directory(err) => {
                error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
        }
    }
}
