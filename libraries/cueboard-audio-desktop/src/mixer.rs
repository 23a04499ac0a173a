//! Additive voice mixer
//!
//! One voice per opened clip. The cpal output callback locks the mixer and
//! renders every live voice additively into the device buffer; everything
//! else (start/stop/gain) is control-plane mutation from the manager's
//! thread through the same lock.

use std::sync::Arc;

/// Handle to one mixer voice
pub type VoiceId = usize;

/// One clip's playback slot
#[derive(Debug)]
struct Voice {
    /// Decoded interleaved samples at the mixer's channel count and rate
    samples: Arc<[f32]>,

    /// Current playback position in frames
    frame_pos: usize,

    /// Per-voice gain multiplier (0.0 to 1.0)
    gain: f32,

    /// Wrap at the end instead of finishing
    looping: bool,

    /// Whether the voice contributes to render output
    playing: bool,

    /// Latched natural-end flag for non-looping playback
    finished: bool,

    /// Latched stream fault, taken by the owning resource
    fault: Option<String>,
}

/// Mixes all live voices into the output stream
#[derive(Debug)]
pub struct Mixer {
    sample_rate: u32,
    channels: usize,
    voices: Vec<Voice>,
}

impl Mixer {
    /// Create a mixer for the output stream's rate and channel count
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            voices: Vec::new(),
        }
    }

    /// Output sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Output channel count
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Register a decoded clip, yielding its voice handle
    pub fn add_voice(&mut self, samples: Arc<[f32]>) -> VoiceId {
        self.voices.push(Voice {
            samples,
            frame_pos: 0,
            gain: 1.0,
            looping: false,
            playing: false,
            finished: false,
            fault: None,
        });
        self.voices.len() - 1
    }

    /// Start a voice from frame 0 with the given loop mode
    pub fn start(&mut self, id: VoiceId, looping: bool) {
        if let Some(voice) = self.voices.get_mut(id) {
            voice.frame_pos = 0;
            voice.looping = looping;
            voice.playing = true;
            voice.finished = false;
        }
    }

    /// Stop a voice and reset its position to frame 0
    pub fn stop(&mut self, id: VoiceId) {
        if let Some(voice) = self.voices.get_mut(id) {
            voice.playing = false;
            voice.frame_pos = 0;
            voice.finished = false;
        }
    }

    /// Set a voice's gain
    pub fn set_gain(&mut self, id: VoiceId, gain: f32) {
        if let Some(voice) = self.voices.get_mut(id) {
            voice.gain = gain;
        }
    }

    /// A voice's current position in frames
    pub fn position_frames(&self, id: VoiceId) -> usize {
        self.voices.get(id).map_or(0, |voice| voice.frame_pos)
    }

    /// Whether a non-looping voice has reached its natural end
    pub fn is_finished(&self, id: VoiceId) -> bool {
        self.voices.get(id).is_some_and(|voice| voice.finished)
    }

    /// Take a voice's latched fault, if any
    pub fn take_fault(&mut self, id: VoiceId) -> Option<String> {
        self.voices.get_mut(id).and_then(|voice| voice.fault.take())
    }

    /// Fault every live voice after a stream error
    ///
    /// The stream is shared, so no per-voice attribution is possible.
    pub fn record_fault(&mut self, message: &str) {
        for voice in &mut self.voices {
            if voice.playing {
                voice.playing = false;
                voice.fault = Some(message.to_string());
            }
        }
    }

    /// Render all live voices additively into an interleaved output buffer
    ///
    /// The buffer must be pre-zeroed and laid out for the mixer's channel
    /// count. A looping voice wraps its position; a one-shot voice latches
    /// `finished` at position 0 when it runs out of frames.
    pub fn render(&mut self, output: &mut [f32]) {
        let channels = self.channels;
        let output_frames = output.len() / channels;

        for voice in &mut self.voices {
            if !voice.playing {
                continue;
            }
            let voice_frames = voice.samples.len() / channels;
            if voice_frames == 0 {
                voice.playing = false;
                voice.finished = !voice.looping;
                continue;
            }

            for frame in 0..output_frames {
                if voice.frame_pos >= voice_frames {
                    if voice.looping {
                        voice.frame_pos = 0;
                    } else {
                        voice.playing = false;
                        voice.finished = true;
                        voice.frame_pos = 0;
                        break;
                    }
                }
                let src = voice.frame_pos * channels;
                let dst = frame * channels;
                for ch in 0..channels {
                    output[dst + ch] += voice.samples[src + ch] * voice.gain;
                }
                voice.frame_pos += 1;
            }
        }
    }
}
