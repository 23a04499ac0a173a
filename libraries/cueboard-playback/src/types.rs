//! Read-model types for the presentation layer

use serde::{Deserialize, Serialize};

/// True playback status of a channel's resource
///
/// `FadingOut` is only visible here: the UI-facing `is_playing` flag in
/// [`ClipState`] already reads `false` during a fade, so a toggle button can
/// flip immediately while the audio trails off in the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    /// Not producing audio; position is at the start
    Idle,

    /// Actively producing audio
    Playing,

    /// Toggled off; volume is ramping to zero before the resource stops
    FadingOut,
}

/// Per-clip snapshot for rendering
///
/// One entry exists for every catalog clip, whether or not its channel has
/// been created yet. Sufficient to render a toggle-button label/state and a
/// volume slider shown only while playing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipState {
    /// Clip identifier
    pub id: String,

    /// Human-readable name for the UI button
    pub display_name: String,

    /// UI-facing playback flag: `true` only while the status is `Playing`
    ///
    /// Flips to `false` the moment a fade-out starts, before the resource
    /// physically stops.
    pub is_playing: bool,

    /// The channel's persisted volume (0.0 to 1.0)
    pub volume: f32,

    /// The true resource status, including `FadingOut`
    pub status: ChannelStatus,
}
