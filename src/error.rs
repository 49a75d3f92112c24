use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("API key not set. Please set the DEEPSEEK_API_KEY environment variable.")]
    MissingApiKey,
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
    #[error("Invalid size ceiling: {0} (expected a finite, non-negative number of MB)")]
    InvalidSizeCeiling(f64),
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Response has no `files` list to render")]
    MissingFiles,
}
impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
