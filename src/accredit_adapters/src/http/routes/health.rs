use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[tracing::instrument(name = "Health", skip_all)]
pub async fn health() -> impl IntoResponse {
    Json(MessageResponse {
        message: "OK".to_string(),
    })
}
