//! CPAL output stream setup
//!
//! Opens the default output device and drives the mixer from the audio
//! callback. The stream runs for the lifetime of the holder; dropping it
//! stops output.

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Stream, StreamConfig,
};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::error::{AudioError, Result};
use crate::mixer::Mixer;

/// Live output stream and its negotiated format
pub struct AudioOutput {
    /// CPAL audio stream, kept alive for playback
    _stream: Stream,

    sample_rate: u32,
    channels: u16,
}

// SAFETY: AudioOutput is safe to send between threads because:
// - sample_rate and channels are plain data
// - _stream is CPAL's Stream, which internally uses thread-safe primitives
//   (the PhantomData<*mut ()> is just a marker, not actually unsafe)
#[allow(unsafe_code)]
unsafe impl Send for AudioOutput {}

impl AudioOutput {
    /// Open the default output device and start streaming
    ///
    /// Returns the output handle and the mixer the callback renders from.
    pub fn open() -> Result<(Self, Arc<Mutex<Mixer>>)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::DeviceNotFound)?;

        let config: StreamConfig = device.default_output_config()?.into();
        let sample_rate = config.sample_rate;
        let channels = config.channels;

        let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate, channels as usize)));

        let render_mixer = mixer.clone();
        let fault_mixer = mixer.clone();

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                data.fill(0.0);
                render_mixer.lock().unwrap().render(data);
            },
            move |err| {
                error!("Audio stream error: {}", err);
                fault_mixer.lock().unwrap().record_fault(&err.to_string());
            },
            None,
        )?;

        stream.play()?;

        info!(sample_rate, channels, "audio output started");

        Ok((
            Self {
                _stream: stream,
                sample_rate,
                channels,
            },
            mixer,
        ))
    }

    /// Negotiated output sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Negotiated output channel count
    pub fn channels(&self) -> u16 {
        self.channels
    }
}
