//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image file produced no data: {}", .0.display())]
    EmptyMedia(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Failed to classify the image: {0}")]
    Classification(String),

    #[error("Failed to generate recommendation: {0}")]
    Recommendation(String),

    #[error("Failed to rate outfit: {0}")]
    Rating(String),

    #[error("No image data generated: {0}")]
    NoImageData(String),

    #[error("Could not parse model reply: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Another request is still in progress")]
    Busy,
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }

    /// Wraps a lower-level failure into an operation error. Configuration
    /// and parse errors keep their own variant.
    pub(crate) fn wrap_with(self, wrap: fn(String) -> Error) -> Error {
        match self {
            Error::Configuration(_) | Error::Parse(_) => self,
            Error::AiProvider(message) => wrap(message),
            other => wrap(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
