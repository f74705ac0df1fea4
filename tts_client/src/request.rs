use serde::Serialize;

/// JSON body of a streaming TTS request. Only `text` varies; the rest is
/// fixed to a normalized, streamed WAV response.
#[derive(Debug, Clone, Serialize)]
pub struct TtsRequest<'a> {
    text: &'a str,
    streaming: bool,
    format: &'static str,
    normalize: bool,
}

impl<'a> TtsRequest<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            streaming: true,
            format: "wav",
            normalize: true,
        }
    }

    pub fn text(&self) -> &str {
        self.text
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
