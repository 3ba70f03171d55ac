/// Helpers for loading static reference sources (markdown + YAML descriptors).
///
/// Sources are read once at startup; nothing here holds state.
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::CommonError;

/// Read a UTF-8 source file, attaching the path to any I/O failure.
pub fn read_source(path: &Path) -> Result<String, CommonError> {
    let content = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read source file");
    Ok(content)
}

/// List files in `dir` (non-recursive) whose extension matches `extension`,
/// sorted by file name so load order is deterministic.
pub fn list_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, CommonError> {
    let io_err = |source| CommonError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let matches = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Decode a YAML document. `origin` names the source in error messages.
pub fn decode_yaml<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, CommonError> {
    serde_yaml::from_str(content).map_err(|source| CommonError::Yaml {
        origin: origin.to_string(),
        source,
    })
}

/// Deterministic content fingerprint, formatted as `sha256:<hex>`.
pub fn content_digest(content: &str) -> String {
    let hash = Sha256::digest(content.as_bytes());
    format!("sha256:{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Sample {
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn digest_is_stable_and_prefixed() {
        let a = content_digest("# Security Checklist\n");
        let b = content_digest("# Security Checklist\n");
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
        assert_eq!(a.len(), "sha256:".len() + 64);
        assert_ne!(a, content_digest("# Performance Checklist\n"));
    }

    #[test]
    fn decode_yaml_reports_origin() {
        let ok: Sample = decode_yaml("name: cpp\ntags: [a, b]\n", "inline").unwrap();
        assert_eq!(ok.name, "cpp");
        assert_eq!(ok.tags, vec!["a", "b"]);

        let err = decode_yaml::<Sample>("name: [unclosed", "agent.yaml").unwrap_err();
        assert!(err.to_string().contains("agent.yaml"));
    }

    #[test]
    fn list_sources_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("mcp-common-sources-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("b.md"), "b").unwrap();
        std::fs::write(dir.join("a.MD"), "a").unwrap();
        std::fs::write(dir.join("notes.txt"), "skip").unwrap();

        let names: Vec<String> = list_sources(&dir, "md")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.MD", "b.md"]);

        let missing = read_source(&dir.join("missing.md")).unwrap_err();
        assert!(matches!(missing, CommonError::Io { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
