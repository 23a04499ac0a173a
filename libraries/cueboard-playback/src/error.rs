//! Error types for playback channel management

use cueboard_core::CatalogError;
use thiserror::Error;

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Clip id not present in the catalog
    #[error("Clip not found: {id}")]
    NotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// The host audio facility failed to open, start, or keep playing a resource
    #[error("Playback unavailable: {message}")]
    Unavailable {
        /// What the facility reported
        message: String,
    },

    /// Volume level outside [0.0, 1.0] or non-finite
    #[error("Invalid volume: {0}. Must be between 0.0 and 1.0")]
    InvalidVolume(f32),
}

impl PlaybackError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an unavailable error from a facility failure
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<CatalogError> for PlaybackError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { id } => Self::NotFound { id },
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}
