/// Loads the reference corpus: the agent descriptor plus every markdown document.
///
/// The default corpus is compiled into the binary. A deployment can point
/// `CPP_REVIEW_REFERENCES_PATH` at a directory with the same layout instead.
use std::path::Path;

use tracing::{info, warn};

use mcp_common::source::{list_sources, read_source};

use crate::config::Config;
use crate::descriptor::{parse_descriptor, AgentDescriptor, DESCRIPTOR_FILE};
use crate::error::AppError;
use crate::model::Document;
use crate::parser::parse_document;

const EMBEDDED_DESCRIPTOR: &str = include_str!("../references/agent.yaml");

const EMBEDDED_DOCUMENTS: &[(&str, &str)] = &[
    ("anti-patterns", include_str!("../references/anti-patterns.md")),
    (
        "architecture-checklist",
        include_str!("../references/architecture-checklist.md"),
    ),
    (
        "modernization-checklist",
        include_str!("../references/modernization-checklist.md"),
    ),
    (
        "performance-checklist",
        include_str!("../references/performance-checklist.md"),
    ),
    ("review-checklist", include_str!("../references/review-checklist.md")),
    ("security-checklist", include_str!("../references/security-checklist.md")),
    ("severity-levels", include_str!("../references/severity-levels.md")),
];

/// Raw corpus as read from its source, before category mappings are resolved.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Where the corpus came from ("embedded" or a directory path), for logs.
    pub origin: String,
    pub descriptor: AgentDescriptor,
    pub documents: Vec<Document>,
}

impl Corpus {
    pub fn load(config: &Config) -> Result<Self, AppError> {
        match config.references_dir() {
            Some(dir) => Self::from_dir(&dir),
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self, AppError> {
        let descriptor = parse_descriptor(EMBEDDED_DESCRIPTOR, DESCRIPTOR_FILE)?;
        let documents = EMBEDDED_DOCUMENTS
            .iter()
            .map(|(id, content)| parse_document(id, content))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            origin: "embedded".to_string(),
            descriptor,
            documents,
        })
    }

    /// Read `agent.yaml` and every `*.md` file directly inside `dir`.
    /// The document id is the file stem.
    pub fn from_dir(dir: &Path) -> Result<Self, AppError> {
        let descriptor_path = dir.join(DESCRIPTOR_FILE);
        let descriptor = parse_descriptor(
            &read_source(&descriptor_path)?,
            &descriptor_path.display().to_string(),
        )?;

        let mut documents = Vec::new();
        for path in list_sources(dir, "md")? {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping reference with non UTF-8 file name");
                continue;
            };
            let content = read_source(&path)?;
            documents.push(parse_document(id, &content)?);
        }

        if documents.is_empty() {
            warn!(dir = %dir.display(), "no markdown references found");
        }
        info!(
            dir = %dir.display(),
            documents = documents.len(),
            "loaded references from directory"
        );

        Ok(Self {
            origin: dir.display().to_string(),
            descriptor,
            documents,
        })
    }
}
