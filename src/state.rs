//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::dataset::Table;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Holds the configuration and the dataset loaded at startup. Neither is
/// mutated after construction.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub table: Arc<Table>,
}

impl AppState {
    /// Creates a new application state from the given configuration and loaded table.
    pub fn new(config: AppConfig, table: Table) -> Self {
        Self {
            config: Arc::new(config),
            table: Arc::new(table),
        }
    }
}
