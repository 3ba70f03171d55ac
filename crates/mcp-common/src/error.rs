/// Error types shared across MCP server crates.
///
/// These errors represent failures reading and decoding reference sources on disk,
/// which every document-serving MCP server shares. Application-specific errors should
/// be defined in each server crate and wrap `CommonError` via `#[from]`.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("yaml decode error in {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}
