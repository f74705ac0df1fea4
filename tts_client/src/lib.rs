//! Client for a streaming text-to-speech endpoint.
//!
//! [`AudioStreamFetcher`] posts a fixed-shape request, collects the chunked
//! WAV response in arrival order, decodes it with `tts_core` and hands the
//! result to an [`AudioOutput`](tts_core::AudioOutput).

pub mod buffer;
pub mod error;
pub mod fetcher;
pub mod request;

pub use buffer::ChunkBuffer;
pub use error::StreamError;
pub use fetcher::{AudioStreamFetcher, Phase, PlaybackReport, DEFAULT_ENDPOINT};
pub use request::TtsRequest;
