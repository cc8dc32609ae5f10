//! HTTP routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/save", post(save))
}

async fn health() -> &'static str {
    "ok"
}

async fn save(State(app): State<Arc<App>>) -> Result<StatusCode, ApiError> {
    app.save_now()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    tracing::info!("Game state saved on request");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
