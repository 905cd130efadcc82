use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{ArgAction, Parser};
use passage_embed::config::{
    EmbedConfig, ResponsePolicy, DEFAULT_CHUNK_SIZE, DEFAULT_DIMENSIONS, DEFAULT_EMBEDDING_TYPE,
    DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_OUTPUT, DEFAULT_TASK,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "embed")]
#[command(about = "Split a text file into chunks and embed each one with the Jina API", long_about = None)]
struct Cli {
    /// Text file to embed
    input: PathBuf,

    /// Where to write the JSON array of responses
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    #[arg(long, env = "JINA_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, default_value = DEFAULT_TASK)]
    task: String,

    #[arg(long, default_value_t = DEFAULT_DIMENSIONS)]
    dimensions: usize,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    late_chunking: bool,

    #[arg(long, default_value = DEFAULT_EMBEDDING_TYPE)]
    embedding_type: String,

    /// Maximum chunk length in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Store every response body as-is, even error payloads
    #[arg(long)]
    permissive: bool,

    /// Per-request timeout; requests never time out when unset
    #[arg(long)]
    timeout_secs: Option<u64>,
}

impl Cli {
    fn into_config(self) -> EmbedConfig {
        let mut config = EmbedConfig::new(self.input, self.api_key);
        config.output = self.output;
        config.chunk_size = self.chunk_size;
        config.client.endpoint = self.endpoint;
        config.client.model = self.model;
        config.client.task = self.task;
        config.client.dimensions = self.dimensions;
        config.client.late_chunking = self.late_chunking;
        config.client.embedding_type = self.embedding_type;
        config.client.timeout = self.timeout_secs.map(Duration::from_secs);
        config.client.policy = if self.permissive {
            ResponsePolicy::Permissive
        } else {
            ResponsePolicy::Strict
        };
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Cli::parse().into_config();
    tracing::debug!("Using {:?}", config);

    let count = passage_embed::pipeline::run(&config)
        .await
        .with_context(|| format!("failed to embed {}", config.input.display()))?;

    tracing::info!(
        "Embeddings saved to {} ({} results)",
        config.output.display(),
        count
    );

    Ok(())
}
