use std::sync::Arc;

use clap::Parser;
use tracing::info;

use tts_cli::build_fetcher;
use tts_cli::config::ClientConfig;
use tts_core::RodioOutput;

#[derive(Parser)]
#[command(version, about = "Speak text through a streaming TTS endpoint")]
struct Cli {
    /// Text to synthesize; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Override the TTS endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Give up on request, streaming and decoding after this many seconds
    #[arg(long)]
    deadline_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().with_overrides(cli.endpoint, cli.deadline_secs);
    info!(
        endpoint = %config.endpoint,
        deadline_secs = config.deadline_secs,
        "client configuration loaded"
    );

    let fetcher = build_fetcher(&config, Arc::new(RodioOutput))?;
    fetcher.stream_audio(&cli.text.join(" ")).await;

    Ok(())
}
