use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A reference document (checklist, anti-pattern catalogue, severity table).
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, the source file stem, e.g. "security-checklist"
    pub id: String,
    /// Text of the first `# ` heading
    pub title: String,
    /// Full original markdown, byte-for-byte
    pub body: String,
    /// `## ` sections, used for search and section listing
    pub sections: Vec<DocumentSection>,
    /// `sha256:<hex>` of `body`
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub heading: String,
    pub content: String,
}

/// The kind of review a request asks for. The set is fixed.
///
/// Deserialization goes through `FromStr`, so descriptor tags accept the same
/// spellings as tool input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Review,
    Security,
    Performance,
    Modernization,
    Architecture,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Review,
        Category::Security,
        Category::Performance,
        Category::Modernization,
        Category::Architecture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Review => "review",
            Category::Security => "security",
            Category::Performance => "performance",
            Category::Modernization => "modernization",
            Category::Architecture => "architecture",
        }
    }

    /// Heading used in the rendered report.
    pub fn report_title(self) -> &'static str {
        match self {
            Category::Review => "Code Review",
            Category::Security => "Security Review",
            Category::Performance => "Performance Review",
            Category::Modernization => "Modernization Review",
            Category::Architecture => "Architecture Review",
        }
    }

    /// Comma-separated list of every tag, for error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| AppError::InvalidCategory(tag.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Finding severity, P0 (most severe) through P3. Formatting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    P0,
    P1,
    P2,
    P3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Severity::P0, Severity::P1, Severity::P2, Severity::P3];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::P0 => "P0",
            Severity::P1 => "P1",
            Severity::P2 => "P2",
            Severity::P3 => "P3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::P0 => "Critical",
            Severity::P1 => "High",
            Severity::P2 => "Medium",
            Severity::P3 => "Low",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Severity::P0 => "Exploitable, data-corrupting or crash-on-common-path. Block the merge.",
            Severity::P1 => "Incorrect behaviour or resource leak under realistic conditions.",
            Severity::P2 => "Maintainability or performance problem with a clear cost.",
            Severity::P3 => "Style, naming or minor readability.",
        }
    }
}
