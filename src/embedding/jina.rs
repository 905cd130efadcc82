use serde::Serialize;
use serde_json::Value;

use super::{Embedder, EmbeddingResult};
use crate::{
    config::{JinaConfig, ResponsePolicy},
    error::EmbeddingError,
};

/// Client for the Jina `/v1/embeddings` endpoint.
pub struct JinaClient {
    client: reqwest::Client,
    config: JinaConfig,
}

impl JinaClient {
    pub fn new(config: JinaConfig) -> Result<Self, EmbeddingError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &JinaConfig {
        &self.config
    }

    /// Embeds a single text and returns its vector.
    ///
    /// Always validates the response, whatever the configured policy.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let result = self.embed(&[text]).await?;
        let result = if result.is_valid() {
            result
        } else {
            EmbeddingResult::parse(result.into_body())?
        };

        result
            .vectors()
            .and_then(|vectors| vectors.first().map(|v| v.to_vec()))
            .ok_or_else(|| EmbeddingError::UnexpectedShape("no embedding returned".to_string()))
    }

    fn check_vectors(&self, result: &EmbeddingResult, inputs: usize) -> Result<(), EmbeddingError> {
        let Some(vectors) = result.vectors() else {
            return Err(EmbeddingError::UnexpectedShape(
                "response contains no embeddings".to_string(),
            ));
        };

        if vectors.len() != inputs {
            return Err(EmbeddingError::UnexpectedShape(format!(
                "expected {} embeddings, got {}",
                inputs,
                vectors.len()
            )));
        }

        if let Some(vector) = vectors.iter().find(|v| v.len() != self.config.dimensions) {
            return Err(EmbeddingError::UnexpectedShape(format!(
                "expected {} dimensions, got {}",
                self.config.dimensions,
                vector.len()
            )));
        }

        Ok(())
    }
}

impl Embedder for JinaClient {
    async fn embed(&self, input: &[&str]) -> Result<EmbeddingResult, EmbeddingError> {
        if input.is_empty() {
            return Err(EmbeddingError::InvalidInput(
                "input cannot be empty".to_string(),
            ));
        }

        let request = JinaEmbeddingRequest {
            model: &self.config.model,
            task: &self.config.task,
            dimensions: self.config.dimensions,
            late_chunking: self.config.late_chunking,
            embedding_type: &self.config.embedding_type,
            input,
        };

        tracing::debug!(
            "POST {} ({} input(s), model '{}')",
            self.config.endpoint,
            input.len(),
            self.config.model
        );

        let response = match self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Error in embedding request: {e}");
                return Err(EmbeddingError::Reqwest(e));
            }
        };

        let status = response.status();

        match self.config.policy {
            ResponsePolicy::Strict => {
                if !status.is_success() {
                    let body = response.text().await?;
                    tracing::error!(
                        "Request to {} failed with status {}",
                        self.config.endpoint,
                        status
                    );
                    return Err(EmbeddingError::Api { status, body });
                }

                let body = response.json::<Value>().await?;
                let result = EmbeddingResult::parse(body)?;
                self.check_vectors(&result, input.len())?;

                if let Some(usage) = result.response().and_then(|r| r.usage.as_ref()) {
                    tracing::debug!("Used {:?} tokens", usage.total_tokens);
                }

                Ok(result)
            }
            ResponsePolicy::Permissive => {
                let body = response.json::<Value>().await?;

                if !status.is_success() {
                    tracing::warn!(
                        "Keeping response with status {} as-is: {}",
                        status,
                        body
                    );
                }

                let result = EmbeddingResult::unchecked(body);
                if status.is_success() {
                    if let Err(e) = self.check_vectors(&result, input.len()) {
                        tracing::warn!("Keeping malformed response as-is: {e}");
                    }
                }

                Ok(result)
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct JinaEmbeddingRequest<'a> {
    model: &'a str,
    task: &'a str,
    dimensions: usize,
    late_chunking: bool,
    embedding_type: &'a str,
    input: &'a [&'a str],
}
