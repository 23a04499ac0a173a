//! Channel events
//!
//! Event-based communication for UI synchronization. Commands and ticks
//! append events to an internal buffer; the presentation layer drains them
//! after each call via [`ChannelManager::drain_events`].
//!
//! [`ChannelManager::drain_events`]: crate::ChannelManager::drain_events

use serde::{Deserialize, Serialize};

/// Events emitted by the channel manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChannelEvent {
    /// A clip began playing (first toggle, or a toggle during a fade-out)
    ClipStarted {
        /// Id of the clip that started
        clip_id: String,
    },

    /// A playing clip was toggled off and its fade-out began
    ///
    /// The clip is already observed as not playing from this point on.
    FadeStarted {
        /// Id of the fading clip
        clip_id: String,
        /// Total fade duration in milliseconds
        duration_ms: u32,
    },

    /// A fade-out ran to completion and the resource stopped
    FadeCompleted {
        /// Id of the clip whose fade finished
        clip_id: String,
    },

    /// A non-looping clip reached its natural end and returned to idle
    ClipFinished {
        /// Id of the finished clip
        clip_id: String,
    },

    /// A channel's volume was set
    VolumeChanged {
        /// Id of the affected clip
        clip_id: String,
        /// New volume level (0.0 to 1.0)
        level: f32,
    },

    /// The audio facility reported a fault; the channel fell back to idle
    PlaybackFailed {
        /// Id of the affected clip
        clip_id: String,
        /// What the facility reported
        message: String,
    },
}
