use std::path::{Path, PathBuf};

use crate::descriptor::DESCRIPTOR_FILE;
use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
///
/// Every setting is optional: without a references path the corpus compiled into
/// the binary is served, and without a listen address the server speaks MCP on stdio.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory holding `agent.yaml` and the `*.md` reference documents.
    pub references_path: Option<String>,
    /// TCP address (e.g. "127.0.0.1:7400") to serve MCP on instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `CPP_REVIEW_REFERENCES_PATH`: corpus directory overriding the embedded references
    /// - `MCP_TCP_LISTEN_ADDR`: serve over TCP, one MCP session per connection
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let references_path = lookup("CPP_REVIEW_REFERENCES_PATH").filter(|p| !p.trim().is_empty());

        if let Some(path) = &references_path {
            let dir = Path::new(path);
            if !dir.is_dir() {
                return Err(AppError::Config(format!(
                    "CPP_REVIEW_REFERENCES_PATH is not a directory: {}",
                    dir.display()
                )));
            }
            let descriptor = dir.join(DESCRIPTOR_FILE);
            if !descriptor.exists() {
                return Err(AppError::Config(format!(
                    "required file not found: {}",
                    descriptor.display()
                )));
            }
        }

        Ok(Self {
            references_path,
            tcp_listen_addr: lookup("MCP_TCP_LISTEN_ADDR").filter(|a| !a.trim().is_empty()),
        })
    }

    pub fn references_dir(&self) -> Option<PathBuf> {
        self.references_path.as_deref().map(PathBuf::from)
    }
}
