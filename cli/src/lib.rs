pub mod config;

use std::sync::Arc;

use anyhow::Context;
use tts_client::AudioStreamFetcher;
use tts_core::AudioOutput;

use crate::config::ClientConfig;

/// Build the HTTP client and fetcher described by `config`.
pub fn build_fetcher(
    config: &ClientConfig,
    output: Arc<dyn AudioOutput>,
) -> anyhow::Result<AudioStreamFetcher> {
    let mut http = reqwest::Client::builder();
    if let Some(timeout) = config.connect_timeout() {
        http = http.connect_timeout(timeout);
    }
    let http = http.build().context("Failed to build HTTP client")?;

    let mut fetcher = AudioStreamFetcher::with_client(http, output).endpoint(config.endpoint.clone());
    if let Some(deadline) = config.deadline() {
        fetcher = fetcher.deadline(deadline);
    }
    Ok(fetcher)
}
