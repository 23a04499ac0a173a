//! Platform-agnostic audio facility traits
//!
//! Abstracts the host environment's audio playback service so the channel
//! manager works with any backend (cpal on desktop, a silent double in
//! tests). Opening a clip yields a resource bound to exactly one asset; the
//! resource is owned by its channel and reused for every subsequent play.

use std::path::Path;
use std::time::Duration;

use crate::error::{PlaybackError, Result};

/// The host environment's audio playback service
pub trait AudioFacility: Send {
    /// Decode/prepare one clip asset and yield its playable resource
    ///
    /// Called at most once per clip id, on the first toggle. The core does
    /// not prefetch or validate asset existence beyond surfacing the
    /// facility's error here.
    fn open_clip(&mut self, asset_path: &Path) -> Result<Box<dyn ClipResource>>;
}

/// One playable audio handle, bound to a single asset
pub trait ClipResource: Send {
    /// Reset to position 0, apply the loop mode, and begin producing audio
    fn start(&mut self, looping: bool) -> Result<()>;

    /// Pause and reset the playback position to 0
    fn stop(&mut self);

    /// Set the instantaneous output gain (0.0 to 1.0)
    fn set_gain(&mut self, gain: f32);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Latched natural-end signal for non-looping playback
    ///
    /// Returns `true` once a non-looping play has run past its last frame;
    /// cleared by `start` or `stop`. A looping resource never finishes.
    fn is_finished(&self) -> bool;

    /// Take a pending asynchronous facility failure, if any
    ///
    /// Cleared on read. The manager polls this from its pump and drops the
    /// channel back to idle when a fault is reported.
    fn take_fault(&mut self) -> Option<PlaybackError>;
}
