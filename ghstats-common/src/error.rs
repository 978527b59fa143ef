use thiserror::Error;

/// Common error type for ghstats components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Invalid chart payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid datetime: {0}")]
    DateTime(String),
}

impl From<chrono::ParseError> for Error {
    fn from(e: chrono::ParseError) -> Self {
        Error::DateTime(e.to_string())
    }
}

/// Result type alias using ghstats' Error.
pub type Result<T> = std::result::Result<T, Error>;
