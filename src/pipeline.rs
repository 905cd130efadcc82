use crate::{
    config::EmbedConfig,
    document::{text_file::TextFileFetcher, DocumentFetcher},
    embedding::{embed_chunks, jina::JinaClient, Embedder},
    error::Error,
    writer,
};

/// Reads, chunks, embeds and saves, using the Jina client from `config`.
///
/// Returns the number of results written.
pub async fn run(config: &EmbedConfig) -> Result<usize, Error> {
    config.validate()?;
    let client = JinaClient::new(config.client.clone())?;
    run_with(config, &client).await
}

/// Same as [`run`] with any [`Embedder`].
pub async fn run_with<E: Embedder>(config: &EmbedConfig, embedder: &E) -> Result<usize, Error> {
    let fetcher = TextFileFetcher::new(&config.input, config.chunk_size);
    let chunks = fetcher.fetch().await?;
    tracing::info!("Loaded {} chunks", chunks.len());

    let embeddings = embed_chunks(embedder, &chunks).await?;

    writer::save_embeddings(&config.output, &embeddings).await?;

    Ok(embeddings.len())
}
