//! Application error types

use thiserror::Error;

/// Main application error type
///
/// Only startup paths return these. Once the viewer is running every failure
/// degrades to "nothing visible happens" and is logged instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Preferences error: {0}")]
    Preferences(#[from] serde_json::Error),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => format!("config.toml is invalid: {}", e.message()),
            AppError::ImageDecode(msg) => format!("Cannot load image: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageDecode(e.to_string())
    }
}
