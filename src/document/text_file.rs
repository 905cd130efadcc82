use std::path::PathBuf;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{Chunk, DocumentFetcher};
use crate::error::Error;

/// Where a chunk sits in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSpan {
    pub index: usize,
    /// Offset of the first character, counted in characters.
    pub offset: usize,
}

/// Loads a UTF-8 text file and cuts it into fixed-width chunks.
pub struct TextFileFetcher {
    path: PathBuf,
    max_length: usize,
}

impl TextFileFetcher {
    pub fn new(path: impl Into<PathBuf>, max_length: usize) -> Self {
        Self {
            path: path.into(),
            max_length,
        }
    }
}

impl DocumentFetcher<ChunkSpan> for TextFileFetcher {
    async fn fetch(&self) -> Result<Vec<Chunk<ChunkSpan>>, Error> {
        if self.max_length == 0 {
            return Err(Error::Config(
                "max chunk length must be greater than 0".to_string(),
            ));
        }

        tracing::info!("Reading {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::io(&self.path, e))?;

        let chunks = chunk_text(&text, self.max_length)
            .into_iter()
            .enumerate()
            .map(|(index, text)| Chunk {
                text: text.to_string(),
                metadata: ChunkSpan {
                    index,
                    offset: index * self.max_length,
                },
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Split {} characters into {} chunks of at most {}",
            text.chars().count(),
            chunks.len(),
            self.max_length
        );

        Ok(chunks)
    }
}

/// Splits `text` into consecutive slices of `max_length` characters.
///
/// Boundaries ignore words and sentences; only the last slice may be shorter.
/// An empty text yields no slices.
///
/// # Panics
///
/// Panics if `max_length` is 0.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<&str> {
    assert!(max_length > 0, "max_length must be greater than 0");

    if text.is_empty() {
        return vec![];
    }

    let boundaries = text
        .char_indices()
        .map(|(i, _)| i)
        .step_by(max_length)
        .chain(std::iter::once(text.len()));

    boundaries
        .tuple_windows()
        .map(|(start, end)| &text[start..end])
        .collect()
}
