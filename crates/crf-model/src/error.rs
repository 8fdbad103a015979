use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrfError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid protocol configuration: {0}")]
    Protocol(String),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, CrfError>;
