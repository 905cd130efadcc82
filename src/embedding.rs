use std::fmt::Debug;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::{document::Chunk, error::EmbeddingError};

pub mod jina;

pub trait Embedder {
    /// Embeds `input` in a single request.
    #[allow(async_fn_in_trait)]
    async fn embed(&self, input: &[&str]) -> Result<EmbeddingResult, EmbeddingError>;
}

/// One response body from the embeddings service.
///
/// The body is kept verbatim so it can be written out unchanged. `response`
/// holds the typed view when the body has the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingResult {
    body: Value,
    response: Option<EmbeddingResponse>,
}

impl EmbeddingResult {
    /// Accepts `body` only if it carries at least one numeric vector.
    pub fn parse(body: Value) -> Result<Self, EmbeddingError> {
        let response = EmbeddingResponse::from_body(&body)?;
        Ok(Self {
            body,
            response: Some(response),
        })
    }

    /// Keeps `body` whatever its shape.
    pub fn unchecked(body: Value) -> Self {
        let response = EmbeddingResponse::from_body(&body).ok();
        Self { body, response }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    pub fn response(&self) -> Option<&EmbeddingResponse> {
        self.response.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.response.is_some()
    }

    /// The embedding vectors in input order, if the body had any.
    pub fn vectors(&self) -> Option<Vec<&[f32]>> {
        self.response.as_ref().map(|response| {
            response
                .data
                .iter()
                .map(|object| object.embedding.as_slice())
                .collect()
        })
    }
}

impl Serialize for EmbeddingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub data: Vec<EmbeddingObject>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl EmbeddingResponse {
    fn from_body(body: &Value) -> Result<Self, EmbeddingError> {
        let mut response = EmbeddingResponse::deserialize(body)
            .map_err(|e| EmbeddingError::UnexpectedShape(e.to_string()))?;

        if response.data.is_empty() {
            return Err(EmbeddingError::UnexpectedShape(
                "response contains no embeddings".to_string(),
            ));
        }

        if let Some(empty) = response.data.iter().find(|o| o.embedding.is_empty()) {
            return Err(EmbeddingError::UnexpectedShape(format!(
                "embedding at index {} is empty",
                empty.index.unwrap_or_default()
            )));
        }

        // The service tags every object with its input position.
        if response.data.iter().all(|o| o.index.is_some()) {
            response.data.sort_by_key(|o| o.index);
        }

        Ok(response)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingObject {
    #[serde(default)]
    pub index: Option<usize>,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: Option<u64>,
    #[serde(default)]
    pub prompt_tokens: Option<u64>,
}

/// Embeds every chunk, one request per chunk, strictly in order.
///
/// Stops at the first failed request; nothing embedded so far is kept.
pub async fn embed_chunks<E, M>(
    embedder: &E,
    chunks: &[Chunk<M>],
) -> Result<Vec<EmbeddingResult>, EmbeddingError>
where
    E: Embedder,
    M: Debug,
{
    let mut embeddings = Vec::with_capacity(chunks.len());

    for (id, chunk) in chunks.iter().enumerate() {
        tracing::info!(
            "Generating embeddings for chunk {} of {} ({:?})",
            id + 1,
            chunks.len(),
            chunk.metadata
        );

        let result = embedder.embed(&[chunk.text.as_str()]).await?;
        embeddings.push(result);
    }

    Ok(embeddings)
}
