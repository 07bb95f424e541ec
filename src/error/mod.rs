//! Unified error handling for Navguard Core
//!
//! Token decoding has its own error type (`jwt::DecodeError`) because every
//! caller recovers from it locally. `AppError` covers the configuration-time
//! failures: reading menu files and validating them. Environment
//! configuration reports through `anyhow`.

use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Menu configuration error: {0}")]
    MenuConfig(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
