//! Path-or-literal schema argument for `create_index`

use std::path::Path;

use crate::error::{ClientError, ClientResult};

/// Resolve the schema to send
///
/// If `schema` names an existing regular file, the file's contents replace
/// it. Anything else (inline YAML/JSON, a missing path, a directory) is sent
/// verbatim.
///
/// # Errors
///
/// Returns [`ClientError::SchemaFile`] if the file exists but cannot be read
/// as UTF-8 text.
pub async fn resolve(schema: &str) -> ClientResult<String> {
    let path = Path::new(schema);
    let is_file = tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);

    if !is_file {
        return Ok(schema.to_owned());
    }

    tracing::debug!(path = %path.display(), "reading index schema from file");
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ClientError::SchemaFile {
            path: path.to_path_buf(),
            source,
        })
}
