//! Cueboard - Playback Channel Management
//!
//! Platform-agnostic playback core for Cueboard, a soundboard engine.
//!
//! This crate provides:
//! - One playback channel per clip id, created lazily on first toggle
//! - Toggle semantics: play looped from the start, or fade out and stop
//! - A cancellable fade-out engine (2500 ms in 20 equal steps by default)
//! - Live per-channel volume control, retained for clips not yet played
//! - A per-clip read model (`ClipState`) and drained `ChannelEvent`s for
//!   the presentation layer
//! - The `AudioFacility`/`ClipResource` trait seam platform crates
//!   implement
//!
//! # Architecture
//!
//! `cueboard-playback` is completely platform-agnostic: no dependency on
//! cpal or any decoder. The host supplies an [`AudioFacility`] and pumps
//! [`ChannelManager::tick`] on its own cadence, passing the current instant
//! explicitly; all channel mutation happens on that single logical thread.
//!
//! # Example
//!
//! ```rust
//! use cueboard_core::{ClipCatalog, ClipDescriptor};
//! use cueboard_playback::{
//!     AudioFacility, ChannelManager, ClipResource, Result,
//! };
//! use std::path::Path;
//! use std::time::{Duration, Instant};
//!
//! // A silent facility; a real host would decode and play the asset
//! struct SilentFacility;
//! struct SilentResource {
//!     playing: bool,
//! }
//!
//! impl AudioFacility for SilentFacility {
//!     fn open_clip(&mut self, _asset_path: &Path) -> Result<Box<dyn ClipResource>> {
//!         Ok(Box::new(SilentResource { playing: false }))
//!     }
//! }
//!
//! impl ClipResource for SilentResource {
//!     fn start(&mut self, _looping: bool) -> Result<()> {
//!         self.playing = true;
//!         Ok(())
//!     }
//!     fn stop(&mut self) {
//!         self.playing = false;
//!     }
//!     fn set_gain(&mut self, _gain: f32) {}
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn is_finished(&self) -> bool {
//!         false
//!     }
//!     fn take_fault(&mut self) -> Option<cueboard_playback::PlaybackError> {
//!         None
//!     }
//! }
//!
//! let catalog = ClipCatalog::new(vec![ClipDescriptor::new(
//!     "boom",
//!     "Explosão",
//!     "/sounds/boom.mp3",
//! )])
//! .unwrap();
//!
//! let mut manager = ChannelManager::new(catalog, Box::new(SilentFacility));
//!
//! let now = Instant::now();
//! manager.toggle("boom", now).unwrap();
//! assert!(manager.is_playing("boom"));
//!
//! // Toggling again starts the fade-out; the clip is observed as stopped
//! // immediately while the audio trails off over ~2.5 s of ticks.
//! manager.toggle("boom", now).unwrap();
//! assert!(!manager.is_playing("boom"));
//!
//! manager.tick(now + Duration::from_millis(2500));
//! for event in manager.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod fade;
pub mod manager;
pub mod resource;
pub mod types;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::ChannelEvent;
pub use fade::{FadeOut, FadeSettings, FadeStep};
pub use manager::ChannelManager;
pub use resource::{AudioFacility, ClipResource};
pub use types::{ChannelStatus, ClipState};
