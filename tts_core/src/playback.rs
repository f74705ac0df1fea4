use thiserror::Error;

use crate::wav::DecodedAudio;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no audio output device available: {0}")]
    Device(String),

    #[error("failed to start playback: {0}")]
    Start(String),
}

/// Sink for decoded audio.
///
/// `play` is called from a blocking thread and returns once the asset has
/// finished playing. Implementations own whatever device context they open
/// and release it before returning.
pub trait AudioOutput: Send + Sync {
    fn play(&self, audio: DecodedAudio) -> Result<(), PlaybackError>;
}

/// Plays through the default output device. A new output stream is opened
/// for every call.
#[cfg(feature = "rodio-output")]
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioOutput;

#[cfg(feature = "rodio-output")]
impl AudioOutput for RodioOutput {
    fn play(&self, audio: DecodedAudio) -> Result<(), PlaybackError> {
        let (_stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| PlaybackError::Start(e.to_string()))?;

        let duration = audio.duration();
        let source =
            rodio::buffer::SamplesBuffer::new(audio.channels, audio.sample_rate, audio.samples);
        sink.append(source);
        tracing::info!(
            duration_ms = duration.as_millis() as u64,
            "playback started"
        );

        sink.sleep_until_end();
        tracing::debug!("playback finished");
        Ok(())
    }
}
