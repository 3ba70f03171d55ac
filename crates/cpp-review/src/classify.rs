/// Routes free-form request text to review categories using the descriptor's
/// trigger keywords.
use regex::Regex;

use crate::descriptor::AgentDescriptor;
use crate::error::AppError;
use crate::model::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category: Category,
    pub matched_triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Best match first. Never empty.
    pub matches: Vec<CategoryMatch>,
    /// No trigger matched; general review was chosen.
    pub fallback: bool,
}

impl Classification {
    pub fn primary(&self) -> Category {
        self.matches
            .first()
            .map(|m| m.category)
            .unwrap_or(Category::Review)
    }
}

struct Trigger {
    keyword: String,
    pattern: Regex,
}

pub struct Classifier {
    triggers: Vec<(Category, Vec<Trigger>)>,
}

impl Classifier {
    pub fn new(descriptor: &AgentDescriptor) -> Result<Self, AppError> {
        let mut triggers = Vec::new();
        for category in Category::ALL {
            let Some(entry) = descriptor.entry(category) else {
                continue;
            };
            let compiled = entry
                .triggers
                .iter()
                .map(|keyword| compile_trigger(category, keyword))
                .collect::<Result<Vec<_>, _>>()?;
            triggers.push((category, compiled));
        }
        Ok(Self { triggers })
    }

    pub fn classify(&self, request: &str) -> Classification {
        let mut matches: Vec<CategoryMatch> = self
            .triggers
            .iter()
            .filter_map(|(category, triggers)| {
                let matched: Vec<String> = triggers
                    .iter()
                    .filter(|t| t.pattern.is_match(request))
                    .map(|t| t.keyword.clone())
                    .collect();
                (!matched.is_empty()).then(|| CategoryMatch {
                    category: *category,
                    matched_triggers: matched,
                })
            })
            .collect();

        if matches.is_empty() {
            return Classification {
                matches: vec![CategoryMatch {
                    category: Category::Review,
                    matched_triggers: Vec::new(),
                }],
                fallback: true,
            };
        }

        // Stable sort keeps enumeration order among equal hit counts.
        matches.sort_by(|a, b| b.matched_triggers.len().cmp(&a.matched_triggers.len()));
        Classification {
            matches,
            fallback: false,
        }
    }
}

/// Case-insensitive match on word boundaries. A boundary is only required where the
/// keyword itself starts or ends with a word character, so "C++" still matches.
fn compile_trigger(category: Category, keyword: &str) -> Result<Trigger, AppError> {
    let keyword = keyword.trim();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let prefix = if keyword.starts_with(is_word) { r"\b" } else { "" };
    let suffix = if keyword.ends_with(is_word) { r"\b" } else { "" };

    let pattern = Regex::new(&format!("(?i){prefix}{}{suffix}", regex::escape(keyword)))
        .map_err(|e| {
            AppError::Descriptor(format!(
                "invalid trigger '{keyword}' for category '{category}': {e}"
            ))
        })?;

    Ok(Trigger {
        keyword: keyword.to_string(),
        pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::parse_descriptor;

    fn classifier() -> Classifier {
        let yaml = r#"
name: test
categories:
  - category: review
    triggers: [review, PR]
  - category: security
    triggers: [security, buffer overflow, buffer overflows, use-after-free]
  - category: performance
    triggers: [slow, hot path]
  - category: modernization
    triggers: [C++11, legacy]
"#;
        Classifier::new(&parse_descriptor(yaml, "inline").unwrap()).unwrap()
    }

    #[test]
    fn security_request_routes_to_security() {
        let result = classifier().classify("check this for buffer overflows");
        assert!(!result.fallback);
        assert_eq!(result.primary(), Category::Security);
        assert_eq!(result.matches[0].matched_triggers, vec!["buffer overflows"]);
    }

    #[test]
    fn triggers_need_word_boundaries() {
        let result = classifier().classify("please preview the output");
        assert!(result.fallback, "'preview' must not match 'review'");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let result = classifier().classify("SECURITY audit of this pr");
        let categories: Vec<Category> = result.matches.iter().map(|m| m.category).collect();
        assert_eq!(categories, vec![Category::Review, Category::Security]);
    }

    #[test]
    fn more_hits_rank_first() {
        let result = classifier().classify("review this: the hot path is slow");
        assert_eq!(result.matches[0].category, Category::Performance);
        assert_eq!(result.matches[0].matched_triggers, vec!["slow", "hot path"]);
        assert_eq!(result.matches[1].category, Category::Review);

        // Equal hit counts keep enumeration order.
        let tied = classifier().classify("review this PR, the hot path is slow");
        assert_eq!(tied.matches[0].category, Category::Review);
        assert_eq!(tied.matches[1].category, Category::Performance);
    }

    #[test]
    fn non_word_edges_still_match() {
        let result = classifier().classify("port this to C++11 please");
        assert_eq!(result.primary(), Category::Modernization);
        let result = classifier().classify("possible use-after-free in dtor");
        assert_eq!(result.primary(), Category::Security);
    }

    #[test]
    fn no_trigger_falls_back_to_review() {
        let result = classifier().classify("what do you think of this function?");
        assert!(result.fallback);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.primary(), Category::Review);
        assert!(result.matches[0].matched_triggers.is_empty());
    }
}
