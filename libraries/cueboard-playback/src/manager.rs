//! Channel manager - core orchestration
//!
//! The sole mutator of per-clip playback state; the single authority the
//! presentation layer talks to. Owns one lazily-created channel per clip id,
//! the fade-out schedules, and the event buffer the UI drains after each
//! command.
//!
//! All state transitions run on the caller's thread. Time enters only
//! through the explicit `Instant` parameters of [`ChannelManager::toggle`]
//! and [`ChannelManager::tick`]; nothing in here reads the clock, which
//! keeps every transition deterministic under test.

use std::collections::HashMap;
use std::time::Instant;

use cueboard_core::{ClipCatalog, ClipDescriptor};
use tracing::{debug, warn};

use crate::{
    error::{PlaybackError, Result},
    events::ChannelEvent,
    fade::{FadeOut, FadeSettings, FadeStep},
    resource::{AudioFacility, ClipResource},
    types::{ChannelStatus, ClipState},
};

/// Runtime state for one clip, created on its first toggle
///
/// The resource is opened once and reused for every subsequent play; at most
/// one channel (and one resource) ever exists per clip id.
struct PlaybackChannel {
    /// The playable handle, bound to exactly one asset
    resource: Box<dyn ClipResource>,

    /// True resource status; `is_playing` in snapshots reads `Playing` only
    status: ChannelStatus,

    /// Persisted volume, surviving play/stop cycles (until fade completion
    /// resets it to 1.0)
    volume: f32,

    /// In-progress fade schedule, present only while `status = FadingOut`
    active_fade: Option<FadeOut>,

    /// Loop mode from the clip's descriptor
    looped: bool,
}

/// Central playback channel management
///
/// Drives all toggle/volume/fade semantics:
/// - Lazy channel creation (one resource per clip id, ever)
/// - Toggle on: loop-enabled playback from position 0
/// - Toggle off: gradual fade-out instead of an abrupt cut, with the clip
///   observed as stopped immediately
/// - Toggle mid-fade: cancel the fade and restart from zero
/// - Live per-channel volume, retained for clips not yet played
/// - Natural-end and facility-fault discovery from the cooperative pump
pub struct ChannelManager {
    // Static catalog, immutable after construction
    catalog: ClipCatalog,

    // Host audio facility; opens one resource per clip
    facility: Box<dyn AudioFacility>,

    // Owned channel collection, keyed by clip id
    channels: HashMap<String, PlaybackChannel>,

    // Volumes recorded before a channel exists, consumed on creation
    recorded_volumes: HashMap<String, f32>,

    // Fade schedule parameters shared by all channels
    fade_settings: FadeSettings,

    // Event queue for UI synchronization
    pending_events: Vec<ChannelEvent>,
}

impl ChannelManager {
    /// Create a manager over a catalog and a host audio facility
    pub fn new(catalog: ClipCatalog, facility: Box<dyn AudioFacility>) -> Self {
        Self::with_fade_settings(catalog, facility, FadeSettings::default())
    }

    /// Create a manager with specific fade settings
    pub fn with_fade_settings(
        catalog: ClipCatalog,
        facility: Box<dyn AudioFacility>,
        fade_settings: FadeSettings,
    ) -> Self {
        Self {
            catalog,
            facility,
            channels: HashMap::new(),
            recorded_volumes: HashMap::new(),
            fade_settings,
            pending_events: Vec::new(),
        }
    }

    /// The catalog this manager serves
    pub fn catalog(&self) -> &ClipCatalog {
        &self.catalog
    }

    /// The fade settings applied to every fade-out
    pub fn fade_settings(&self) -> FadeSettings {
        self.fade_settings
    }

    // ===== Commands =====

    /// Flip a clip's playback state
    ///
    /// - No channel yet: open the resource, then start playing.
    /// - Idle: restart from position 0 with the clip's loop mode and begin
    ///   playback.
    /// - Playing: begin the fade-out; the clip is observed as not playing
    ///   from this call on, while the audio trails off over the fade.
    /// - Fading out: cancel the fade and restart from position 0 at the
    ///   channel's persisted volume. A toggle always flips what the user
    ///   currently sees, and the user already sees "not playing".
    ///
    /// `now` anchors the fade schedule; pass the current instant.
    pub fn toggle(&mut self, clip_id: &str, now: Instant) -> Result<()> {
        let descriptor = self.catalog.get(clip_id)?.clone();

        if !self.channels.contains_key(clip_id) {
            self.create_channel(&descriptor)?;
        }

        let status = self
            .channels
            .get(clip_id)
            .map(|channel| channel.status)
            .unwrap_or(ChannelStatus::Idle);

        match status {
            ChannelStatus::Idle => self.start_playback(clip_id),
            ChannelStatus::Playing => {
                self.begin_fade(clip_id, now);
                Ok(())
            }
            ChannelStatus::FadingOut => self.restart_from_fade(clip_id),
        }
    }

    /// Set a channel's volume (0.0 to 1.0)
    ///
    /// Rejects non-finite or out-of-range levels with `InvalidVolume`. The
    /// level is recorded as the channel's persisted volume and, if the
    /// resource exists, applied to it immediately regardless of status -
    /// including mid-fade, where the next fade step overrides the audible
    /// gain again. If no channel exists yet, the level is retained and used
    /// when the channel is created.
    pub fn set_volume(&mut self, clip_id: &str, level: f32) -> Result<()> {
        if !level.is_finite() || !(0.0..=1.0).contains(&level) {
            return Err(PlaybackError::InvalidVolume(level));
        }
        self.catalog.get(clip_id)?;

        if let Some(channel) = self.channels.get_mut(clip_id) {
            channel.volume = level;
            channel.resource.set_gain(level);
        } else {
            self.recorded_volumes.insert(clip_id.to_string(), level);
        }

        debug!(clip_id, level, "volume set");
        self.emit_volume_changed(clip_id, level);
        Ok(())
    }

    // ===== Pump =====

    /// Run all time-based work that has come due
    ///
    /// Drives due fade steps (catching up over multiple steps if the host
    /// ticked late), natural-end detection for non-looping channels, and
    /// asynchronous facility faults. Call on the host's own cadence - a UI
    /// frame loop or a timer armed from [`Self::next_wakeup`].
    pub fn tick(&mut self, now: Instant) {
        let ids: Vec<String> = self.catalog.iter().map(|clip| clip.id.clone()).collect();
        for clip_id in ids {
            self.tick_channel(&clip_id, now);
        }
    }

    /// When the earliest pending fade step is due, if any
    ///
    /// A timer-driven host uses this to schedule its next [`Self::tick`]
    /// precisely instead of polling.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.channels
            .values()
            .filter_map(|channel| channel.active_fade.as_ref().and_then(FadeOut::next_step_at))
            .min()
    }

    fn tick_channel(&mut self, clip_id: &str, now: Instant) {
        let Some(channel) = self.channels.get_mut(clip_id) else {
            return;
        };

        // Asynchronous facility fault: fall back to idle, never stay stuck
        // in Playing. The manager keeps serving other channels.
        if let Some(err) = channel.resource.take_fault() {
            if let Some(fade) = channel.active_fade.as_mut() {
                fade.cancel();
            }
            channel.active_fade = None;
            channel.resource.stop();
            channel.resource.set_gain(channel.volume);
            channel.status = ChannelStatus::Idle;
            warn!(clip_id, error = %err, "playback fault, channel falls back to idle");
            self.pending_events.push(ChannelEvent::PlaybackFailed {
                clip_id: clip_id.to_string(),
                message: err.to_string(),
            });
            return;
        }

        // Apply every due fade step; a late tick catches up in one call
        while let Some(step) = channel
            .active_fade
            .as_mut()
            .and_then(|fade| fade.advance(now))
        {
            match step {
                FadeStep::Gain(gain) => channel.resource.set_gain(gain),
                FadeStep::Finished => {
                    channel.resource.set_gain(0.0);
                    channel.resource.stop();
                    // The next play starts at full volume regardless of the
                    // configured channel volume. Documented quirk of the
                    // fade completion; see DESIGN.md.
                    channel.resource.set_gain(1.0);
                    channel.volume = 1.0;
                    channel.active_fade = None;
                    channel.status = ChannelStatus::Idle;
                    debug!(clip_id, "fade-out completed");
                    self.pending_events.push(ChannelEvent::FadeCompleted {
                        clip_id: clip_id.to_string(),
                    });
                    break;
                }
            }
        }

        // Natural end, reachable only for non-looping clips
        if channel.status == ChannelStatus::Playing
            && !channel.looped
            && channel.resource.is_finished()
        {
            channel.resource.stop();
            channel.status = ChannelStatus::Idle;
            debug!(clip_id, "clip reached natural end");
            self.pending_events.push(ChannelEvent::ClipFinished {
                clip_id: clip_id.to_string(),
            });
        }
    }

    // ===== Read model =====

    /// Per-clip snapshots, one per catalog clip in catalog order
    ///
    /// Clips without a channel yet report idle with their recorded volume
    /// (default 1.0).
    pub fn snapshot(&self) -> Vec<ClipState> {
        self.catalog.iter().map(|clip| self.state_for(clip)).collect()
    }

    /// Snapshot for a single clip
    pub fn clip_state(&self, clip_id: &str) -> Result<ClipState> {
        let clip = self.catalog.get(clip_id)?;
        Ok(self.state_for(clip))
    }

    /// Whether a clip is observed as playing
    ///
    /// Reads `false` during a fade-out: the flip to "not playing" happens
    /// the moment the fade starts.
    pub fn is_playing(&self, clip_id: &str) -> bool {
        self.channels
            .get(clip_id)
            .is_some_and(|channel| channel.status == ChannelStatus::Playing)
    }

    /// Number of channels created so far
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn state_for(&self, clip: &ClipDescriptor) -> ClipState {
        match self.channels.get(&clip.id) {
            Some(channel) => ClipState {
                id: clip.id.clone(),
                display_name: clip.display_name.clone(),
                is_playing: channel.status == ChannelStatus::Playing,
                volume: channel.volume,
                status: channel.status,
            },
            None => ClipState {
                id: clip.id.clone(),
                display_name: clip.display_name.clone(),
                is_playing: false,
                volume: self.recorded_volumes.get(&clip.id).copied().unwrap_or(1.0),
                status: ChannelStatus::Idle,
            },
        }
    }

    // ===== Events =====

    /// Take all pending events, clearing the buffer
    pub fn drain_events(&mut self) -> Vec<ChannelEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether any events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_clip_started(&mut self, clip_id: &str) {
        self.pending_events.push(ChannelEvent::ClipStarted {
            clip_id: clip_id.to_string(),
        });
    }

    fn emit_fade_started(&mut self, clip_id: &str, duration_ms: u32) {
        self.pending_events.push(ChannelEvent::FadeStarted {
            clip_id: clip_id.to_string(),
            duration_ms,
        });
    }

    fn emit_volume_changed(&mut self, clip_id: &str, level: f32) {
        self.pending_events.push(ChannelEvent::VolumeChanged {
            clip_id: clip_id.to_string(),
            level,
        });
    }

    // ===== Transitions =====

    fn create_channel(&mut self, descriptor: &ClipDescriptor) -> Result<()> {
        // Failure here creates no channel; a later toggle retries the open
        let mut resource = self.facility.open_clip(&descriptor.asset_path)?;

        let volume = self
            .recorded_volumes
            .remove(&descriptor.id)
            .unwrap_or(1.0);
        resource.set_gain(volume);

        debug!(clip_id = %descriptor.id, volume, "channel created");
        self.channels.insert(
            descriptor.id.clone(),
            PlaybackChannel {
                resource,
                status: ChannelStatus::Idle,
                volume,
                active_fade: None,
                looped: descriptor.looped,
            },
        );
        Ok(())
    }

    fn start_playback(&mut self, clip_id: &str) -> Result<()> {
        if let Some(channel) = self.channels.get_mut(clip_id) {
            channel.resource.set_gain(channel.volume);
            channel.resource.start(channel.looped)?;
            channel.status = ChannelStatus::Playing;
        }
        debug!(clip_id, "clip started");
        self.emit_clip_started(clip_id);
        Ok(())
    }

    fn begin_fade(&mut self, clip_id: &str, now: Instant) {
        let duration_ms = self.fade_settings.duration_ms;
        if let Some(channel) = self.channels.get_mut(clip_id) {
            channel.active_fade = Some(FadeOut::new(channel.volume, now, self.fade_settings));
            channel.status = ChannelStatus::FadingOut;
        }
        debug!(clip_id, duration_ms, "fade-out started");
        self.emit_fade_started(clip_id, duration_ms);
    }

    fn restart_from_fade(&mut self, clip_id: &str) -> Result<()> {
        if let Some(channel) = self.channels.get_mut(clip_id) {
            if let Some(fade) = channel.active_fade.as_mut() {
                fade.cancel();
            }
            channel.active_fade = None;
            channel.resource.set_gain(channel.volume);
            match channel.resource.start(channel.looped) {
                Ok(()) => channel.status = ChannelStatus::Playing,
                Err(err) => {
                    channel.resource.stop();
                    channel.status = ChannelStatus::Idle;
                    return Err(err);
                }
            }
        }
        debug!(clip_id, "fade cancelled, clip restarted");
        self.emit_clip_started(clip_id);
        Ok(())
    }
}
