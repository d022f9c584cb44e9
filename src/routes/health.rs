//! Health check endpoint for container orchestration.
//!
//! The server only starts listening after the dataset has loaded, so a
//! response here also means the dataset is available.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
