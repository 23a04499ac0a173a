//! Desktop audio facility
//!
//! Bridges the channel manager's facility seam onto the CPAL output: each
//! opened clip is decoded in full, handed to the mixer as a voice, and
//! controlled through a resource handle that locks the shared mixer.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cueboard_playback::{AudioFacility, ClipResource, PlaybackError};
use tracing::debug;

use crate::error::Result;
use crate::loader;
use crate::mixer::{Mixer, VoiceId};
use crate::output::AudioOutput;

/// Audio facility backed by the default CPAL output device
pub struct DesktopAudio {
    mixer: Arc<Mutex<Mixer>>,

    /// Keeps the output stream alive
    _output: AudioOutput,
}

impl DesktopAudio {
    /// Open the default output device and start the stream
    pub fn new() -> Result<Self> {
        let (output, mixer) = AudioOutput::open()?;
        Ok(Self {
            mixer,
            _output: output,
        })
    }

    /// Output sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self._output.sample_rate()
    }
}

impl AudioFacility for DesktopAudio {
    fn open_clip(
        &mut self,
        asset_path: &Path,
    ) -> cueboard_playback::Result<Box<dyn ClipResource>> {
        let (channels, sample_rate) = {
            let mixer = self.mixer.lock().unwrap();
            (mixer.channels(), mixer.sample_rate())
        };

        let samples = loader::decode_clip(asset_path, channels, sample_rate)
            .map_err(PlaybackError::from)?;

        let voice = self
            .mixer
            .lock()
            .unwrap()
            .add_voice(Arc::from(samples.into_boxed_slice()));

        debug!(path = %asset_path.display(), voice, "clip opened");

        Ok(Box::new(DesktopClipResource {
            mixer: self.mixer.clone(),
            voice,
            sample_rate,
        }))
    }
}

/// Mixer voice handle implementing the clip resource seam
pub struct DesktopClipResource {
    mixer: Arc<Mutex<Mixer>>,
    voice: VoiceId,
    sample_rate: u32,
}

impl ClipResource for DesktopClipResource {
    fn start(&mut self, looping: bool) -> cueboard_playback::Result<()> {
        self.mixer.lock().unwrap().start(self.voice, looping);
        Ok(())
    }

    fn stop(&mut self) {
        self.mixer.lock().unwrap().stop(self.voice);
    }

    fn set_gain(&mut self, gain: f32) {
        self.mixer
            .lock()
            .unwrap()
            .set_gain(self.voice, gain.clamp(0.0, 1.0));
    }

    fn position(&self) -> Duration {
        let frames = self.mixer.lock().unwrap().position_frames(self.voice);
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }

    fn is_finished(&self) -> bool {
        self.mixer.lock().unwrap().is_finished(self.voice)
    }

    fn take_fault(&mut self) -> Option<PlaybackError> {
        self.mixer
            .lock()
            .unwrap()
            .take_fault(self.voice)
            .map(PlaybackError::unavailable)
    }
}
