use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONNECTION, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tts_core::{decode_wav, AudioOutput, DecodedAudio};

use crate::buffer::{collect_chunks, ChunkBuffer};
use crate::error::StreamError;
use crate::request::TtsRequest;

/// Streaming TTS endpoint used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://kaiwa-stream.dev-livetoon.com/v1/tts";

/// Where a call is in its linear lifecycle. `Failed` absorbs any error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Requesting,
    Streaming,
    Decoding,
    Playing,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Requesting => "requesting",
            Phase::Streaming => "streaming",
            Phase::Decoding => "decoding",
            Phase::Playing => "playing",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was received and played by a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackReport {
    pub bytes_received: usize,
    pub chunks: usize,
    pub channels: u16,
    pub sample_rate: u32,
    pub duration: Duration,
}

/// Sends text to the TTS endpoint, buffers the streamed WAV body, decodes it
/// and plays it on the injected output.
pub struct AudioStreamFetcher {
    http: reqwest::Client,
    endpoint: String,
    output: Arc<dyn AudioOutput>,
    deadline: Option<Duration>,
}

impl AudioStreamFetcher {
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        Self::with_client(reqwest::Client::new(), output)
    }

    pub fn with_client(http: reqwest::Client, output: Arc<dyn AudioOutput>) -> Self {
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output,
            deadline: None,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Bound request, streaming and decoding. Playback is not covered.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint
    }

    /// Fire-and-log entry point: every failure is logged here and dropped.
    pub async fn stream_audio(&self, text: &str) {
        let cancel = CancellationToken::new();
        if let Err(e) = self.try_stream_audio(text, &cancel).await {
            error!(
                error = %e,
                failed_in = e.phase().map(|p| p.as_str()),
                phase = %Phase::Failed,
                "streamed TTS playback failed"
            );
        }
    }

    /// Run one request to completion, returning the failure instead of
    /// logging it. Cancelling `cancel` aborts anything before playback.
    pub async fn try_stream_audio(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<PlaybackReport, StreamError> {
        debug!(from = %Phase::Idle, to = %Phase::Requesting, "call started");
        let (audio, bytes_received, chunks) = self
            .bounded(
                async {
                    let buffer = self.receive(text).await?;
                    let bytes_received = buffer.len();
                    let chunks = buffer.chunk_count();
                    let audio = decode(buffer).await?;
                    Ok::<_, StreamError>((audio, bytes_received, chunks))
                },
                cancel,
            )
            .await?;

        let report = PlaybackReport {
            bytes_received,
            chunks,
            channels: audio.channels,
            sample_rate: audio.sample_rate,
            duration: audio.duration(),
        };

        // the output logs playback start once its device is open
        debug!(
            phase = %Phase::Playing,
            channels = report.channels,
            sample_rate = report.sample_rate,
            duration_ms = report.duration.as_millis() as u64,
            "handing decoded audio to output"
        );
        let output = Arc::clone(&self.output);
        tokio::task::spawn_blocking(move || output.play(audio))
            .await
            .map_err(|e| StreamError::Task(e.to_string()))??;

        Ok(report)
    }

    /// POST the request and drain the response body.
    async fn receive(&self, text: &str) -> Result<ChunkBuffer, StreamError> {
        info!(phase = %Phase::Requesting, text = %text, endpoint = %self.endpoint, "request started");
        let body = TtsRequest::new(text).to_json()?;
        info!(payload = %String::from_utf8_lossy(&body), "request payload");

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "*/*")
            .header(CONNECTION, "keep-alive")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        info!(status = status.as_u16(), "response status");
        info!(headers = ?response.headers(), "response headers");

        if !status.is_success() {
            let body = response.text().await.map_err(StreamError::ErrorBody)?;
            error!(status = status.as_u16(), body = %body, "error response");
            return Err(StreamError::Network {
                status: status.as_u16(),
                body,
            });
        }

        info!(phase = %Phase::Streaming, content_length = response.content_length(), "streaming started");
        let size_hint = response.content_length();
        let buffer = collect_chunks(response.bytes_stream(), size_hint)
            .await
            .map_err(StreamError::Body)?;
        info!(bytes = buffer.len(), chunks = buffer.chunk_count(), "streaming complete");

        Ok(buffer)
    }

    async fn bounded<T, F>(&self, fut: F, cancel: &CancellationToken) -> Result<T, StreamError>
    where
        F: Future<Output = Result<T, StreamError>>,
    {
        let limited = async {
            match self.deadline {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(res) => res,
                    Err(_) => Err(StreamError::DeadlineExceeded(limit)),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StreamError::Cancelled),
            res = limited => res,
        }
    }
}

async fn decode(buffer: ChunkBuffer) -> Result<DecodedAudio, StreamError> {
    debug!(phase = %Phase::Decoding, bytes = buffer.len(), "decoding audio");
    let bytes = buffer.into_bytes();
    let audio = tokio::task::spawn_blocking(move || decode_wav(bytes))
        .await
        .map_err(|e| StreamError::Task(e.to_string()))??;
    Ok(audio)
}
