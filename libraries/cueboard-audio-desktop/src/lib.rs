//! Desktop audio facility for Cueboard using CPAL
//!
//! This crate provides the `DesktopAudio` implementation of the
//! `AudioFacility` trait for cross-platform desktop output.
//!
//! # Features
//!
//! - Cross-platform audio output using CPAL
//! - Full decode of clip assets with Symphonia
//! - Channel mapping and sample rate conversion to the device format
//! - Additive mixing of any number of concurrent clips
//!
//! # Example
//!
//! ```no_run
//! use cueboard_audio_desktop::DesktopAudio;
//! use cueboard_core::{ClipCatalog, ClipDescriptor};
//! use cueboard_playback::ChannelManager;
//! use std::time::Instant;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = ClipCatalog::new(vec![
//!     ClipDescriptor::new("laugh", "Risada", "/sounds/laugh.mp3"),
//! ])?;
//!
//! let facility = DesktopAudio::new()?;
//! let mut manager = ChannelManager::new(catalog, Box::new(facility));
//!
//! manager.toggle("laugh", Instant::now())?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod facility;
pub mod loader;
pub mod mixer;
mod output;

pub use error::{AudioError, Result};
pub use facility::{DesktopAudio, DesktopClipResource};
pub use output::AudioOutput;
