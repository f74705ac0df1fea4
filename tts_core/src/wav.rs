use std::io::Cursor;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while turning a received byte buffer into playable audio.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("audio payload is empty")]
    Empty,

    #[error("malformed WAV payload: {0}")]
    Malformed(#[from] hound::Error),

    #[error("unsupported WAV layout: {0}")]
    Unsupported(String),
}

/// Decoded, interleaved PCM normalized to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub channels: u16,
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

impl DecodedAudio {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }
}

/// Decode a complete WAV payload.
///
/// The buffer is consumed: streaming servers send the RIFF header before the
/// body length is known, so placeholder sizes are patched in place first
/// (see [`repair_streaming_header`]).
pub fn decode_wav(mut bytes: Vec<u8>) -> Result<DecodedAudio, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    if repair_streaming_header(&mut bytes) {
        tracing::debug!(len = bytes.len(), "patched streaming WAV header sizes");
    }

    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(DecodeError::Unsupported("sample rate is zero".to_string()));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(DecodeError::Unsupported(format!(
                    "{} bits per sample",
                    spec.bits_per_sample
                )));
            }
            let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(DecodedAudio {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        samples,
    })
}

/// Clamp the RIFF and `data` chunk sizes to what the buffer actually holds.
///
/// Returns `true` when the header was modified. Buffers that are not
/// RIFF/WAVE are left untouched so the decoder can report them.
pub fn repair_streaming_header(bytes: &mut [u8]) -> bool {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return false;
    }

    // RIFF sizes are 32-bit; larger buffers cannot be described
    let Some(riff_size) = riff_size_for(bytes.len()) else {
        return false;
    };

    let mut changed = false;
    if read_u32(bytes, 4) != riff_size {
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
        changed = true;
    }

    let mut block_align: u32 = 1;
    let mut pos = 12usize;
    while pos + 8 <= bytes.len() {
        let id = [bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]];
        let declared = read_u32(bytes, pos + 4);
        let body = pos + 8;
        let available = (bytes.len() - body) as u32;

        if &id == b"data" {
            if declared == 0 || declared > available {
                let fixed = available - available % block_align.max(1);
                if fixed != declared {
                    bytes[pos + 4..pos + 8].copy_from_slice(&fixed.to_le_bytes());
                    changed = true;
                }
            }
            break;
        }

        if &id == b"fmt " && declared >= 16 && available >= 16 {
            block_align = u16::from_le_bytes([bytes[body + 12], bytes[body + 13]]) as u32;
        }

        if declared > available {
            break;
        }
        // chunks are word aligned
        pos = body + declared as usize + (declared as usize & 1);
    }

    changed
}

fn riff_size_for(len: usize) -> Option<u32> {
    u32::try_from(len.checked_sub(8)?).ok()
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Encode f32 samples as 16-bit PCM WAV (RIFF).
pub fn encode_wav(samples: &[f32], channels: u16, sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    // WAV header (44 bytes) + 2 bytes per sample
    let mut cursor = Cursor::new(Vec::<u8>::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        const I16_MAX_F32: f32 = i16::MAX as f32;
        for &s in samples {
            writer.write_sample((s.clamp(-1.0, 1.0) * I16_MAX_F32) as i16)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
