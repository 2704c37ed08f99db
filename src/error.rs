//! Error handling for reqopts

use thiserror::Error;

/// Main error type for reqopts operations
#[derive(Error, Debug)]
pub enum ReqoptsError {
    /// Mutually exclusive options were supplied together.
    #[error("Conflicting options: {0}")]
    Conflict(String),

    /// A value could not be serialized into the chosen body representation.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// An option carried a value of an unsupported shape.
    #[error("Type error: {0}")]
    Type(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for reqopts operations
pub type Result<T> = std::result::Result<T, ReqoptsError>;
