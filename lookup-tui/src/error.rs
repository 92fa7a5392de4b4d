//! Application error type.

use std::path::PathBuf;

use thiserror::Error;

use lookup::LookupError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings in {path}: {source}")]
    Settings {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot read catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    CatalogFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}
