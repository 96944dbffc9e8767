//! Radar-specific error types.

use skycast_core::{AppError, NetworkError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Radar service returned status {0}")]
    Status(u16),

    #[error("Malformed frame list: {0}")]
    Parse(String),

    #[error("No radar frames available")]
    NoFrames,

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl RadarError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Status(code) if *code >= 500 => "Radar service is down. Try again later.",
            Self::Status(_) => "Radar service rejected the request.",
            Self::Parse(_) => "Radar data could not be read.",
            Self::NoFrames => "No radar imagery is available right now.",
            Self::Client(_) => "Radar is unavailable on this system.",
        }
    }
}

impl From<RadarError> for AppError {
    fn from(err: RadarError) -> Self {
        match err {
            RadarError::Network(e) => AppError::Network(e),
            other => AppError::Service(other.to_string()),
        }
    }
}
