//! PCM WAV decoding for the playback backend.
//!
//! Reads RIFF/WAVE files with byteorder and converts the sample data to
//! interleaved `f32`. Supported encodings: 8- and 16-bit integer PCM and
//! 32-bit float. Compressed WAV (and everything that is not WAV) is
//! rejected as unsupported rather than guessed at.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// WAVE format tag for integer PCM.
const FORMAT_PCM: u16 = 1;
/// WAVE format tag for IEEE float.
const FORMAT_IEEE_FLOAT: u16 = 3;

/// Decoded audio: interleaved `f32` samples plus the source geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Source sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved samples in the range -1.0..=1.0.
    pub samples: Vec<f32>,
}

impl DecodedAudio {
    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }
}

struct FmtChunk {
    format: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

/// Decodes the WAV file at `path` to interleaved `f32` samples.
pub fn decode_wav(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::Playback {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut reader = BufReader::new(file);

    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag)?;
    if &tag != b"RIFF" {
        return Err(unsupported(path, "not a RIFF file"));
    }
    let _riff_size = reader.read_u32::<LittleEndian>()?;
    reader.read_exact(&mut tag)?;
    if &tag != b"WAVE" {
        return Err(unsupported(path, "not a WAVE file"));
    }

    let mut fmt: Option<FmtChunk> = None;
    loop {
        if reader.read_exact(&mut tag).is_err() {
            // Ran out of chunks without seeing data.
            return Err(unsupported(path, "no data chunk"));
        }
        let size = reader.read_u32::<LittleEndian>()?;

        match &tag {
            b"fmt " => {
                if size < 16 {
                    return Err(unsupported(path, "truncated fmt chunk"));
                }
                let format = reader.read_u16::<LittleEndian>()?;
                let channels = reader.read_u16::<LittleEndian>()?;
                let sample_rate = reader.read_u32::<LittleEndian>()?;
                let _byte_rate = reader.read_u32::<LittleEndian>()?;
                let _block_align = reader.read_u16::<LittleEndian>()?;
                let bits_per_sample = reader.read_u16::<LittleEndian>()?;
                skip(&mut reader, u64::from(size) - 16 + padding(size))?;

                if channels == 0 {
                    return Err(unsupported(path, "zero channels"));
                }
                fmt = Some(FmtChunk {
                    format,
                    channels,
                    sample_rate,
                    bits_per_sample,
                });
            }
            b"data" => {
                let fmt = fmt.ok_or_else(|| unsupported(path, "data chunk before fmt"))?;
                let samples = read_samples(&mut reader, &fmt, size, path)?;
                return Ok(DecodedAudio {
                    channels: fmt.channels,
                    sample_rate: fmt.sample_rate,
                    samples,
                });
            }
            _ => {
                // LIST, cue, etc. are irrelevant here.
                skip(&mut reader, u64::from(size) + padding(size))?;
            }
        }
    }
}

fn read_samples(
    reader: &mut impl Read,
    fmt: &FmtChunk,
    data_size: u32,
    path: &Path,
) -> Result<Vec<f32>> {
    match (fmt.format, fmt.bits_per_sample) {
        (FORMAT_PCM, 8) => {
            let count = data_size as usize;
            let mut samples = Vec::with_capacity(count);
            for _ in 0..count {
                let raw = reader.read_u8()?;
                samples.push((f32::from(raw) - 128.0) / 128.0);
            }
            Ok(samples)
        }
        (FORMAT_PCM, 16) => {
            let count = data_size as usize / 2;
            let mut samples = Vec::with_capacity(count);
            for _ in 0..count {
                let raw = reader.read_i16::<LittleEndian>()?;
                samples.push(f32::from(raw) / f32::from(i16::MAX));
            }
            Ok(samples)
        }
        (FORMAT_IEEE_FLOAT, 32) => {
            let count = data_size as usize / 4;
            let mut samples = Vec::with_capacity(count);
            for _ in 0..count {
                samples.push(reader.read_f32::<LittleEndian>()?);
            }
            Ok(samples)
        }
        (format, bits) => Err(unsupported(
            path,
            &format!("format tag {format} with {bits}-bit samples"),
        )),
    }
}

/// RIFF chunks are word-aligned; odd-sized chunks carry one pad byte.
fn padding(size: u32) -> u64 {
    u64::from(size % 2)
}

fn skip(reader: &mut (impl Read + Seek), bytes: u64) -> std::io::Result<()> {
    if bytes > 0 {
        reader.seek(SeekFrom::Current(bytes as i64))?;
    }
    Ok(())
}

fn unsupported(path: &Path, reason: &str) -> Error {
    Error::UnsupportedAudio {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
