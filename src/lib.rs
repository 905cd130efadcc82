pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::{EmbeddingError, Error};
