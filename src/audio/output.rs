//! Audio device output through cpal.
//!
//! Each play builds a fresh output stream on the default device, feeds it
//! the decoded clip (resampled and remixed to the device configuration), and
//! tears the stream down once the callback has drained the samples.
//! Overlapping plays are independent streams.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use tracing::warn;

use super::decoder::{self, DecodedAudio};
use super::AudioBackend;
use crate::error::{Error, Result};

/// Extra wait beyond the clip length before declaring playback stuck.
const DRAIN_MARGIN: Duration = Duration::from_secs(2);

/// Output backend playing PCM WAV assets through the default cpal device.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalBackend;

impl CpalBackend {
    /// Creates the backend; the device is picked per play, not held open.
    pub fn new() -> Self {
        Self
    }
}

impl AudioBackend for CpalBackend {
    fn play(&self, path: &Path) -> Result<()> {
        let decoded = decoder::decode_wav(path)?;
        if decoded.frames() == 0 {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(Error::NoOutputDevice)?;
        let supported = device
            .default_output_config()
            .map_err(|e| playback_error(path, &e.to_string()))?;

        let config = supported.config();
        let samples = remix(&decoded, config.channels, config.sample_rate.0);

        match supported.sample_format() {
            cpal::SampleFormat::F32 => run::<f32>(&device, &config, samples, path),
            cpal::SampleFormat::I16 => run::<i16>(&device, &config, samples, path),
            cpal::SampleFormat::U16 => run::<u16>(&device, &config, samples, path),
            other => Err(Error::UnsupportedAudio {
                path: path.to_path_buf(),
                reason: format!("device sample format {other:?}"),
            }),
        }
    }
}

fn run<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    samples: Vec<f32>,
    path: &Path,
) -> Result<()>
where
    T: SizedSample + FromSample<f32>,
{
    let clip_ms = samples.len() as u64 * 1000
        / (u64::from(config.sample_rate.0) * u64::from(config.channels)).max(1);

    let (done_tx, done_rx) = mpsc::channel();
    let mut pos = 0usize;
    let mut notified = false;
    let err_path = path.to_path_buf();

    let stream = device
        .build_output_stream(
            config,
            move |out: &mut [T], _: &cpal::OutputCallbackInfo| {
                for slot in out.iter_mut() {
                    if pos < samples.len() {
                        *slot = T::from_sample(samples[pos]);
                        pos += 1;
                    } else {
                        *slot = T::from_sample(0.0f32);
                        if !notified {
                            notified = true;
                            let _ = done_tx.send(());
                        }
                    }
                }
            },
            move |err| warn!("audio stream error for {}: {}", err_path.display(), err),
            None,
        )
        .map_err(|e| playback_error(path, &e.to_string()))?;

    stream.play().map_err(|e| playback_error(path, &e.to_string()))?;

    done_rx
        .recv_timeout(Duration::from_millis(clip_ms) + DRAIN_MARGIN)
        .map_err(|_| playback_error(path, "playback did not complete"))?;

    Ok(())
}

/// Linear-resamples and channel-remixes a decoded clip to the device layout.
///
/// Exact-rate clips pass through untouched. Channel handling: matching
/// counts map one-to-one, anything else is folded to mono and spread across
/// the device channels.
fn remix(decoded: &DecodedAudio, out_channels: u16, out_rate: u32) -> Vec<f32> {
    let src_channels = usize::from(decoded.channels.max(1));
    let out_channels = usize::from(out_channels.max(1));
    let frames = decoded.frames();
    if frames == 0 {
        return Vec::new();
    }

    if decoded.sample_rate == out_rate && src_channels == out_channels {
        return decoded.samples.clone();
    }

    let out_frames = ((frames as u64 * u64::from(out_rate)) / u64::from(decoded.sample_rate.max(1)))
        .max(1) as usize;
    let step = f64::from(decoded.sample_rate) / f64::from(out_rate);

    let mut out = Vec::with_capacity(out_frames * out_channels);
    for i in 0..out_frames {
        let t = i as f64 * step;
        let i0 = (t.floor() as usize).min(frames - 1);
        let i1 = (i0 + 1).min(frames - 1);
        let frac = (t - i0 as f64) as f32;

        let frame_sample = |channel: usize| {
            let a = decoded.samples[i0 * src_channels + channel];
            let b = decoded.samples[i1 * src_channels + channel];
            a + (b - a) * frac
        };

        if src_channels == out_channels {
            for channel in 0..out_channels {
                out.push(frame_sample(channel));
            }
        } else {
            let mono: f32 =
                (0..src_channels).map(frame_sample).sum::<f32>() / src_channels as f32;
            for _ in 0..out_channels {
                out.push(mono);
            }
        }
    }
    out
}

fn playback_error(path: &Path, reason: &str) -> Error {
    Error::Playback {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
