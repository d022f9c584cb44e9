//! OpenAPI description of the service.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::state::AppState;

pub async fn openapi(State(state): State<AppState>) -> Json<Value> {
    Json(document(&state.config.api, &state.config.dataset.stress_column))
}

/// Build the OpenAPI 3 document for the configured API metadata.
pub fn document(api: &ApiConfig, stress_column: &str) -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": api.title,
            "description": api.description,
            "version": api.version,
        },
        "paths": {
            "/health": {
                "get": {
                    "summary": "Health Check",
                    "description": "Returns a simple OK status to check if the server is running.",
                    "responses": { "200": {
                        "description": "Successful Response",
                        "content": { "application/json": { "schema": {
                            "type": "object",
                            "properties": { "status": { "type": "string" } }
                        }}}
                    }}
                }
            },
            "/data/full": {
                "get": {
                    "summary": "Get Full Data",
                    "description": "Returns the entire dataset as a JSON list of records.",
                    "responses": { "200": {
                        "description": "Successful Response",
                        "content": { "application/json": { "schema": {
                            "type": "array",
                            "items": { "type": "object" }
                        }}}
                    }}
                }
            },
            "/data/stress": {
                "get": {
                    "summary": "Get Stress Data",
                    "description": "Returns only ID and stress column.",
                    "responses": { "200": {
                        "description": "Successful Response",
                        "content": { "application/json": { "schema": {
                            "oneOf": [
                                {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "id": { "type": "integer" },
                                            (stress_column): {}
                                        }
                                    }
                                },
                                {
                                    "type": "object",
                                    "properties": { "error": { "type": "string" } }
                                }
                            ]
                        }}}
                    }}
                }
            }
        }
    })
}
