use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApodError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnvVar { name: String, value: String },

    // Domain errors
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // Parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),

    // Asset errors
    #[error("Corrupt or unrecognized image: {}", .0.display())]
    CorruptAsset(PathBuf),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApodError {
    /// True for request timeouts, which the fetcher reports separately.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApodError::Http(e) if e.is_timeout())
    }
}

pub type ApodResult<T> = Result<T, ApodError>;
