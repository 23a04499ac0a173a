//! Clip asset loading and decoding
//!
//! Soundboard clips are short, so each asset is decoded in full with
//! Symphonia into an interleaved f32 buffer at the output device's channel
//! count and sample rate. Channel mapping handles mono/stereo material;
//! rate mismatches are resampled with rubato.

use std::fs::File;
use std::path::Path;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error as SymphoniaError,
    formats::FormatOptions, io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};
use symphonia::default::{get_codecs, get_probe};
use tracing::debug;

use crate::error::{AudioError, Result};

/// Decode a clip asset into an interleaved f32 buffer
///
/// The returned samples are laid out for `output_channels` at
/// `output_rate_hz`, ready to hand to the mixer unchanged.
pub fn decode_clip(path: &Path, output_channels: usize, output_rate_hz: u32) -> Result<Vec<f32>> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format.default_track().ok_or(AudioError::NoDefaultTrack)?;
    let file_rate_hz = track
        .codec_params
        .sample_rate
        .ok_or(AudioError::MissingSampleRate)?;
    let file_channels = track
        .codec_params
        .channels
        .ok_or(AudioError::MissingChannels)?
        .count();

    let mut decoder = get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut decoded: Vec<f32> = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(err) => return Err(err.into()),
        };

        let audio_buf = decoder.decode(&packet)?;
        let spec = *audio_buf.spec();
        let duration = audio_buf.capacity() as u64;

        let mut sample_buf = SampleBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(audio_buf);
        decoded.extend_from_slice(sample_buf.samples());
    }

    debug!(
        path = %path.display(),
        file_rate_hz,
        file_channels,
        frames = decoded.len() / file_channels.max(1),
        "clip decoded"
    );

    let mapped = map_channels(decoded, file_channels, output_channels)?;

    if file_rate_hz == output_rate_hz {
        Ok(mapped)
    } else {
        resample(mapped, output_channels, file_rate_hz, output_rate_hz)
    }
}

/// Map interleaved samples between channel layouts
///
/// Mono to stereo duplicates each sample; stereo to mono averages each
/// frame. Anything else is unsupported.
pub fn map_channels(
    samples: Vec<f32>,
    file_channels: usize,
    output_channels: usize,
) -> Result<Vec<f32>> {
    if file_channels == output_channels {
        return Ok(samples);
    }

    match (file_channels, output_channels) {
        (1, 2) => {
            let mut out = Vec::with_capacity(samples.len() * 2);
            for s in samples {
                out.push(s);
                out.push(s);
            }
            Ok(out)
        }
        (2, 1) => {
            let mut out = Vec::with_capacity(samples.len() / 2);
            for frame in samples.chunks_exact(2) {
                out.push((frame[0] + frame[1]) * 0.5);
            }
            Ok(out)
        }
        _ => Err(AudioError::UnsupportedChannels {
            file_channels,
            output_channels,
        }),
    }
}

/// Resample a fully decoded interleaved buffer to the output rate
fn resample(samples: Vec<f32>, channels: usize, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let chunk_frames = (from_rate as usize) / 10;
    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(to_rate) / f64::from(from_rate),
        2.0,
        params,
        chunk_frames,
        channels,
    )?;

    let frames = samples.len() / channels;
    let expected_frames = ((frames as u64 * u64::from(to_rate)) / u64::from(from_rate)) as usize;

    let mut output: Vec<f32> = Vec::with_capacity(expected_frames * channels);
    let mut offset = 0;

    while offset < frames {
        // Deinterleave one chunk; the last chunk is zero-padded
        let mut deinterleaved = vec![vec![0.0f32; chunk_frames]; channels];
        let chunk_len = chunk_frames.min(frames - offset);
        for frame_idx in 0..chunk_len {
            for ch in 0..channels {
                deinterleaved[ch][frame_idx] = samples[(offset + frame_idx) * channels + ch];
            }
        }

        let resampled = resampler.process(&deinterleaved, None)?;

        let output_frames = resampled[0].len();
        for frame_idx in 0..output_frames {
            for ch in 0..channels {
                output.push(resampled[ch][frame_idx]);
            }
        }

        offset += chunk_frames;
    }

    // Drop the tail the zero padding introduced
    output.truncate(expected_frames * channels);

    debug!(
        from_rate,
        to_rate,
        frames,
        resampled_frames = output.len() / channels,
        "clip resampled"
    );
    Ok(output)
}
