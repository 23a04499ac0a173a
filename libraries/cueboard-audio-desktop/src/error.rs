//! Desktop audio errors

use thiserror::Error;

/// Result type for desktop audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Desktop audio errors
#[derive(Debug, Error)]
pub enum AudioError {
    /// No default output device
    #[error("Audio device not found")]
    DeviceNotFound,

    /// Failed to build output stream
    #[error("Failed to build output stream: {0}")]
    StreamBuildError(String),

    /// Failed to play stream
    #[error("Failed to play stream: {0}")]
    PlayError(String),

    /// CPAL error
    #[error("CPAL error: {0}")]
    CpalError(String),

    /// Failed to decode an audio asset
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Asset has no default audio track
    #[error("Audio file has no default track")]
    NoDefaultTrack,

    /// Asset does not declare its sample rate
    #[error("Audio file does not declare a sample rate")]
    MissingSampleRate,

    /// Asset does not declare its channel count
    #[error("Audio file does not declare a channel count")]
    MissingChannels,

    /// Channel layout the mixer cannot map
    #[error("Unsupported channel layout: {file_channels} -> {output_channels}")]
    UnsupportedChannels {
        /// Channels in the source audio
        file_channels: usize,
        /// Channels of the output device
        output_channels: usize,
    },

    /// Sample rate conversion error
    #[error("Sample rate conversion error: {0}")]
    ResampleError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        AudioError::StreamBuildError(err.to_string())
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        AudioError::PlayError(err.to_string())
    }
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::CpalError(err.to_string())
    }
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        AudioError::DecodeError(err.to_string())
    }
}

impl From<rubato::ResamplerConstructionError> for AudioError {
    fn from(err: rubato::ResamplerConstructionError) -> Self {
        AudioError::ResampleError(err.to_string())
    }
}

impl From<rubato::ResampleError> for AudioError {
    fn from(err: rubato::ResampleError) -> Self {
        AudioError::ResampleError(err.to_string())
    }
}

impl From<AudioError> for cueboard_playback::PlaybackError {
    fn from(err: AudioError) -> Self {
        cueboard_playback::PlaybackError::unavailable(err.to_string())
    }
}
