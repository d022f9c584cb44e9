//! In-memory dataset loaded once at startup.
//!
//! The loader reads a CSV file into a [`Table`], inferring a scalar type for
//! each column. The table is immutable after load and is shared read-only
//! across request handlers through `AppState`.

mod loader;
mod table;

use std::path::PathBuf;

pub use loader::{load_table, parse_table};
pub use table::{Row, StressRecords, Table, Value};

/// Startup-fatal dataset errors. Every variant carries the path that was tried.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset not found at {}. Make sure it exists.", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read dataset at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Dataset at {} has no header line", path.display())]
    MissingHeader { path: PathBuf },
}

/// Directory containing the running executable, against which relative
/// dataset paths are resolved.
pub fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
