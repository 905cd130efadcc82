use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Error;

/// Renders `embeddings` as a JSON array indented by four spaces.
///
/// Object keys keep the order they arrived in. Non-ASCII text is written
/// as-is, not as `\u` escapes.
pub fn to_pretty_json<T: Serialize>(embeddings: &[T]) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    embeddings.serialize(&mut serializer)?;
    Ok(buf)
}

/// Overwrites `path` with every embedding result, in order.
pub async fn save_embeddings<T: Serialize>(path: &Path, embeddings: &[T]) -> Result<(), Error> {
    let json = to_pretty_json(embeddings)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::io(path, e))?;

    tracing::debug!("Wrote {} results to {}", embeddings.len(), path.display());

    Ok(())
}
