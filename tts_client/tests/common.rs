//! Common utilities for fetcher integration tests

use std::sync::{Arc, Mutex};

use tts_client::AudioStreamFetcher;
use tts_core::{AudioOutput, DecodedAudio, PlaybackError};
use wiremock::MockServer;

/// Output that records every asset it is asked to play.
#[derive(Default)]
pub struct RecordingOutput {
    pub played: Mutex<Vec<DecodedAudio>>,
}

impl RecordingOutput {
    pub fn play_count(&self) -> usize {
        self.played.lock().unwrap().len()
    }
}

impl AudioOutput for RecordingOutput {
    fn play(&self, audio: DecodedAudio) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(audio);
        Ok(())
    }
}

/// Output whose device can never be opened.
pub struct NoDeviceOutput;

impl AudioOutput for NoDeviceOutput {
    fn play(&self, _audio: DecodedAudio) -> Result<(), PlaybackError> {
        Err(PlaybackError::Device("no default output device".to_string()))
    }
}

pub const TTS_PATH: &str = "/v1/tts";

/// Fetcher pointed at the mock server's TTS path.
pub fn fetcher_for(server: &MockServer, output: Arc<dyn AudioOutput>) -> AudioStreamFetcher {
    AudioStreamFetcher::new(output).endpoint(format!("{}{}", server.uri(), TTS_PATH))
}

/// A short mono sawtooth at 22.05 kHz, encoded as WAV.
pub fn sample_wav(samples: usize) -> Vec<u8> {
    let pcm: Vec<f32> = (0..samples).map(|i| ((i % 100) as f32 / 100.0) - 0.5).collect();
    tts_core::encode_wav(&pcm, 1, 22050).expect("Failed to encode test WAV")
}

/// The same WAV as a streaming server would send it: sizes not yet known.
pub fn streaming_wav(samples: usize) -> Vec<u8> {
    let mut bytes = sample_wav(samples);
    bytes[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
    bytes[40..44].copy_from_slice(&u32::MAX.to_le_bytes());
    bytes
}
