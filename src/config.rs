use std::{fmt, path::PathBuf, time::Duration};

use crate::error::Error;

pub const DEFAULT_ENDPOINT: &str = "https://api.jina.ai/v1/embeddings";
pub const DEFAULT_MODEL: &str = "jina-embeddings-v3";
pub const DEFAULT_TASK: &str = "retrieval.passage";
pub const DEFAULT_DIMENSIONS: usize = 1024;
pub const DEFAULT_EMBEDDING_TYPE: &str = "float";
pub const DEFAULT_CHUNK_SIZE: usize = 2048;
pub const DEFAULT_OUTPUT: &str = "embeddings.json";

/// How the client treats responses that are not well-formed embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponsePolicy {
    /// Non-2xx statuses and bodies without numeric vectors are errors.
    #[default]
    Strict,
    /// Any JSON body is kept verbatim, error payloads included.
    Permissive,
}

/// Everything a single embedding run needs, supplied once at startup.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Maximum chunk length, in characters.
    pub chunk_size: usize,
    pub client: JinaConfig,
}

impl EmbedConfig {
    pub fn new(input: impl Into<PathBuf>, api_key: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            client: JinaConfig::new(api_key),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk size must be greater than 0".to_string()));
        }
        self.client.validate()
    }
}

#[derive(Clone)]
pub struct JinaConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub task: String,
    pub dimensions: usize,
    pub late_chunking: bool,
    pub embedding_type: String,
    /// Unset means requests may block indefinitely.
    pub timeout: Option<Duration>,
    pub policy: ResponsePolicy,
}

impl JinaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            task: DEFAULT_TASK.to_string(),
            dimensions: DEFAULT_DIMENSIONS,
            late_chunking: true,
            embedding_type: DEFAULT_EMBEDDING_TYPE.to_string(),
            timeout: None,
            policy: ResponsePolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("api key cannot be empty".to_string()));
        }
        if self.dimensions == 0 {
            return Err(Error::Config("dimensions must be greater than 0".to_string()));
        }
        if self.endpoint.is_empty() {
            return Err(Error::Config("endpoint cannot be empty".to_string()));
        }
        Ok(())
    }
}

// Keeps the bearer token out of logs.
impl fmt::Debug for JinaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JinaConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("task", &self.task)
            .field("dimensions", &self.dimensions)
            .field("late_chunking", &self.late_chunking)
            .field("embedding_type", &self.embedding_type)
            .field("timeout", &self.timeout)
            .field("policy", &self.policy)
            .finish()
    }
}
