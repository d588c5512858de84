// src/error.rs

//! Unified error handling for the planner.

use std::fmt;

use thiserror::Error;

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Key-value store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resort id not present in the catalog
    #[error("Unknown resort: {0}")]
    UnknownResort(String),

    /// Forecast fetch or decode failed for one resort
    #[error("Weather error for {resort}: {message}")]
    Weather { resort: String, message: String },

    /// Status page scrape failed for one resort
    #[error("Scrape error for {resort}: {message}")]
    Scrape { resort: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a weather error for a resort.
    pub fn weather(resort: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Weather {
            resort: resort.into(),
            message: message.to_string(),
        }
    }

    /// Create a scrape error for a resort.
    pub fn scrape(resort: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Scrape {
            resort: resort.into(),
            message: message.to_string(),
        }
    }
}
