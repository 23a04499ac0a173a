//! Fade-out engine
//!
//! Toggling a playing clip off does not cut the audio; the channel's gain
//! ramps to zero in equal steps over a fixed duration, then the resource
//! stops. The schedule is anchored to an explicit `Instant` supplied by the
//! caller and advanced from the manager's `tick`, so nothing in here reads
//! the clock or sleeps.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Fade-out schedule parameters
///
/// The default is a 2500 ms fade in 20 steps of 125 ms, each reducing the
/// gain by one twentieth of the volume captured at fade start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeSettings {
    /// Total fade duration in milliseconds
    pub duration_ms: u32,

    /// Number of equal gain decrements the duration is divided into
    pub steps: u32,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            duration_ms: 2500,
            steps: 20,
        }
    }
}

impl FadeSettings {
    /// Create settings with a specific duration, keeping the default step count
    pub fn with_duration(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Interval between consecutive fade steps
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.duration_ms / self.steps.max(1)))
    }
}

/// One due fade step, reported by [`FadeOut::advance`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeStep {
    /// Apply this gain to the resource
    Gain(f32),

    /// Final step: gain is zero and the resource should stop
    Finished,
}

/// An in-progress, cancellable fade-out owned by one channel
///
/// Gains are derived from the volume captured when the fade started, so a
/// `set_volume` arriving mid-fade changes the audible gain only until the
/// next step overrides it.
#[derive(Debug, Clone)]
pub struct FadeOut {
    settings: FadeSettings,
    start_volume: f32,
    steps_done: u32,
    next_step_at: Instant,
    cancelled: bool,
}

impl FadeOut {
    /// Begin a fade from `start_volume`, with the first step due one
    /// interval after `now`
    pub fn new(start_volume: f32, now: Instant, settings: FadeSettings) -> Self {
        Self {
            settings,
            start_volume,
            steps_done: 0,
            next_step_at: now + settings.step_interval(),
            cancelled: false,
        }
    }

    /// The volume captured at fade start
    pub fn start_volume(&self) -> f32 {
        self.start_volume
    }

    /// Cancel the fade; no further steps will be yielded
    ///
    /// Cancelling an already-cancelled or completed fade is a no-op.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Whether the fade was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether every step has been yielded
    pub fn is_complete(&self) -> bool {
        self.steps_done >= self.settings.steps.max(1)
    }

    /// Fade progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        self.steps_done as f32 / self.settings.steps.max(1) as f32
    }

    /// When the next step is due, if the fade is still live
    pub fn next_step_at(&self) -> Option<Instant> {
        if self.cancelled || self.is_complete() {
            None
        } else {
            Some(self.next_step_at)
        }
    }

    /// Yield the next due step, if any
    ///
    /// Returns one step per call; a host that ticked late calls this in a
    /// loop to catch up. Returns `None` when no step is due yet, or the fade
    /// is cancelled or complete.
    pub fn advance(&mut self, now: Instant) -> Option<FadeStep> {
        if self.cancelled || self.is_complete() || now < self.next_step_at {
            return None;
        }

        self.steps_done += 1;
        self.next_step_at += self.settings.step_interval();

        if self.is_complete() {
            Some(FadeStep::Finished)
        } else {
            let remaining = 1.0 - self.steps_done as f32 / self.settings.steps.max(1) as f32;
            Some(FadeStep::Gain((self.start_volume * remaining).max(0.0)))
        }
    }
}
