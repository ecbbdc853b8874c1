//! Error types for the scraper.
//!
//! Per-URL problems (HTTP status, transport failures, odd content types) are
//! not errors here: they are absorbed by the pipeline and only logged. The
//! variants below are the fatal ones, raised outside the per-URL loop.

use thiserror::Error;

/// Result type alias for fallible scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that abort a whole run or a persistence step.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The configuration is unusable (empty keyword, blank user agent, ...)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
