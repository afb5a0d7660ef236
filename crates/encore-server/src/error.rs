//! Handler error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use encore_site::RenderError;
use serde_json::json;

/// Failure while producing a response.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Missing or malformed section document, or a template failure.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Logged, then answered as `{"error": "<message>"}`.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!(error = %message, "Request failed");
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
