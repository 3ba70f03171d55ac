/// The agent descriptor (`agent.yaml`): skill metadata plus, per category, the ordered
/// reference documents and the trigger keywords that route a request there.
use std::collections::HashSet;

use serde::Deserialize;

use mcp_common::source::decode_yaml;

use crate::error::AppError;
use crate::model::Category;

pub const DESCRIPTOR_FILE: &str = "agent.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    pub category: Category,
    #[serde(default)]
    pub summary: String,
    /// Document ids, in reading order.
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl AgentDescriptor {
    pub fn entry(&self, category: Category) -> Option<&CategoryEntry> {
        self.categories.iter().find(|e| e.category == category)
    }
}

/// Decode and sanity-check a descriptor. Document ids are resolved later, against
/// the loaded corpus.
pub fn parse_descriptor(content: &str, origin: &str) -> Result<AgentDescriptor, AppError> {
    let descriptor: AgentDescriptor = decode_yaml(content, origin)?;

    if descriptor.name.trim().is_empty() {
        return Err(AppError::Descriptor(format!("{origin}: name must not be empty")));
    }

    let mut seen = HashSet::new();
    for entry in &descriptor.categories {
        if !seen.insert(entry.category) {
            return Err(AppError::Descriptor(format!(
                "{origin}: category '{}' is declared more than once",
                entry.category
            )));
        }
        // Matching is case-insensitive, so "PR" and "pr" are the same trigger.
        let mut triggers = HashSet::new();
        for trigger in &entry.triggers {
            let normalized = trigger.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(AppError::Descriptor(format!(
                    "{origin}: category '{}' has an empty trigger",
                    entry.category
                )));
            }
            if !triggers.insert(normalized) {
                return Err(AppError::Descriptor(format!(
                    "{origin}: category '{}' repeats trigger '{}'",
                    entry.category,
                    trigger.trim()
                )));
            }
        }
    }

    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_descriptor() {
        let yaml = r#"
name: cpp-code-review
categories:
  - category: security
    documents: [security-checklist, severity-levels]
    triggers: [vulnerability, buffer overflow]
"#;
        let descriptor = parse_descriptor(yaml, "inline").unwrap();
        assert_eq!(descriptor.name, "cpp-code-review");
        assert_eq!(descriptor.version, None);
        let security = descriptor.entry(Category::Security).unwrap();
        assert_eq!(security.documents, vec!["security-checklist", "severity-levels"]);
        assert_eq!(security.triggers.len(), 2);
        assert!(descriptor.entry(Category::Review).is_none());
    }

    #[test]
    fn unknown_category_tag_is_rejected() {
        let yaml = "name: x\ncategories:\n  - category: bogus\n";
        let err = parse_descriptor(yaml, "agent.yaml").unwrap_err();
        assert!(matches!(err, AppError::Common(_)));
        assert!(err.to_string().contains("agent.yaml"));
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let yaml = "name: x\ncategories:\n  - category: review\n  - category: review\n";
        let err = parse_descriptor(yaml, "agent.yaml").unwrap_err();
        assert!(matches!(err, AppError::Descriptor(_)));
    }

    #[test]
    fn repeated_trigger_is_rejected_ignoring_case() {
        let yaml = "name: x\ncategories:\n  - category: review\n    triggers: [x, x]\n";
        let err = parse_descriptor(yaml, "agent.yaml").unwrap_err();
        assert!(matches!(err, AppError::Descriptor(_)));
        assert!(err.to_string().contains("repeats trigger 'x'"));

        let yaml = "name: x\ncategories:\n  - category: review\n    triggers: [PR, ' pr ']\n";
        assert!(matches!(
            parse_descriptor(yaml, "agent.yaml"),
            Err(AppError::Descriptor(_))
        ));

        // The same trigger in two different categories is fine.
        let yaml = "name: x\ncategories:\n  - category: review\n    triggers: [x]\n  - category: security\n    triggers: [x]\n";
        assert!(parse_descriptor(yaml, "agent.yaml").is_ok());
    }

    #[test]
    fn category_tags_parse_like_tool_input() {
        let yaml = "name: x\ncategories:\n  - category: Security\n  - category: ' PERFORMANCE '\n";
        let descriptor = parse_descriptor(yaml, "agent.yaml").unwrap();
        assert!(descriptor.entry(Category::Security).is_some());
        assert!(descriptor.entry(Category::Performance).is_some());
    }

    #[test]
    fn blank_name_and_blank_trigger_are_rejected() {
        assert!(parse_descriptor("name: '  '\n", "agent.yaml").is_err());
        let yaml = "name: x\ncategories:\n  - category: review\n    triggers: ['']\n";
        assert!(matches!(
            parse_descriptor(yaml, "agent.yaml"),
            Err(AppError::Descriptor(_))
        ));
    }
}
