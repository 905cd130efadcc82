use serde::{Deserialize, Serialize};

use crate::error::Error;

pub mod text_file;

pub trait DocumentFetcher<M> {
    #[allow(async_fn_in_trait)]
    async fn fetch(&self) -> Result<Vec<Chunk<M>>, Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk<M> {
    pub text: String,
    pub metadata: M,
}
