use std::time::Duration;

use thiserror::Error;
use tts_core::{DecodeError, PlaybackError};

use crate::fetcher::Phase;

/// Failure of a single streamed TTS call.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("Network response was not ok: {status} {body}")]
    Network { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to read error response body: {0}")]
    ErrorBody(reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(reqwest::Error),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Task join error: {0}")]
    Task(String),
}

impl StreamError {
    /// HTTP status of a rejected request, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            StreamError::Network { status, .. } => Some(*status),
            StreamError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Phase the call was in when this error was raised. Deadline and
    /// cancellation can interrupt any phase before playback.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            StreamError::Network { .. }
            | StreamError::Transport(_)
            | StreamError::ErrorBody(_)
            | StreamError::Encode(_) => Some(Phase::Requesting),
            StreamError::Body(_) => Some(Phase::Streaming),
            StreamError::Decode(_) => Some(Phase::Decoding),
            StreamError::Playback(_) => Some(Phase::Playing),
            StreamError::DeadlineExceeded(_) | StreamError::Cancelled | StreamError::Task(_) => None,
        }
    }
}
