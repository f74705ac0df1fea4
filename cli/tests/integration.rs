//! Integration tests for the configured client

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tts_cli::build_fetcher;
use tts_cli::config::ClientConfig;
use tts_client::StreamError;
use tts_core::{AudioOutput, DecodedAudio, PlaybackError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingOutput {
    played: Mutex<Vec<DecodedAudio>>,
}

impl AudioOutput for RecordingOutput {
    fn play(&self, audio: DecodedAudio) -> Result<(), PlaybackError> {
        self.played.lock().unwrap().push(audio);
        Ok(())
    }
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_overrides(Some(format!("{}/v1/tts", server.uri())), None)
}

#[tokio::test]
async fn test_configured_fetcher_plays() {
    let server = MockServer::start().await;
    let wav = tts_core::encode_wav(&vec![0.25; 480], 1, 24000).unwrap();
    Mock::given(method("POST"))
        .and(path("/v1/tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(wav))
        .expect(1)
        .mount(&server)
        .await;

    let output = Arc::new(RecordingOutput::default());
    let fetcher = build_fetcher(&config_for(&server), output.clone()).unwrap();
    assert_eq!(fetcher.endpoint_url(), format!("{}/v1/tts", server.uri()));

    fetcher.stream_audio("hello").await;

    let played = output.played.lock().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].sample_rate, 24000);
    assert_eq!(played[0].duration().as_millis(), 20);
}

#[tokio::test]
async fn test_configured_deadline_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = config_for(&server).with_overrides(None, Some(1));
    let output = Arc::new(RecordingOutput::default());
    let fetcher = build_fetcher(&config, output.clone()).unwrap();

    let result = fetcher
        .try_stream_audio("hello", &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(StreamError::DeadlineExceeded(_))));
    assert!(output.played.lock().unwrap().is_empty());
}

#[test]
fn test_connect_timeout_builds() {
    let config = ClientConfig {
        connect_timeout_secs: Some(2),
        ..ClientConfig::default()
    };
    let fetcher = build_fetcher(&config, Arc::new(RecordingOutput::default())).unwrap();
    assert_eq!(fetcher.endpoint_url(), tts_client::DEFAULT_ENDPOINT);
}
