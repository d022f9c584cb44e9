//! Stress API: a read-only HTTP service over a CSV dataset.
//!
//! The dataset is loaded once at startup into an immutable [`dataset::Table`]
//! and served as JSON from `/data/full` and `/data/stress`.

pub mod config;
pub mod dataset;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
