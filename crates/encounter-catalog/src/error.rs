use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("catalog request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid catalog: {0}")]
    Core(#[from] encounter_core::error::CoreError),
}
