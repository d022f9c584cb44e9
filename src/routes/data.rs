//! Dataset handlers: the full table and the stress column projection.

use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Returns every row as a JSON object keyed by column name.
pub async fn full(State(state): State<AppState>) -> Result<Response, AppError> {
    tracing::debug!(rows = state.table.len(), "Serving full dataset");
    json_response(state.table.as_ref())
}

/// Returns `{id, <stress column>}` for every row, ids starting at 1.
pub async fn stress(State(state): State<AppState>) -> Result<Response, AppError> {
    let column = state.config.dataset.stress_column.as_str();
    let records = state
        .table
        .stress_records(column)
        .ok_or_else(|| AppError::ColumnNotFound(column.to_string()))?;

    tracing::debug!(rows = records.len(), column = %column, "Serving stress projection");
    json_response(&records)
}

/// Serialize a borrowed view into a JSON response body.
fn json_response<T: Serialize + ?Sized>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}
