//! Error types for the garden_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for garden_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Transport-level HTTP failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Request to {endpoint} failed: {status}")]
    Api { status: u16, endpoint: String },

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Breathing pattern with no duration at all
    #[error("Invalid breathing pattern: {0}")]
    InvalidPattern(String),

    /// Another guided activity already holds the screen
    #[error("Activity '{active}' is already running")]
    ActivityBusy { active: String },

    /// Unknown breathing preset or guided activity slug
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
