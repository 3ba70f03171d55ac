/// Keyword search over reference document sections.
///
/// Scoring per section: each query term counts 3 per hit in the document title,
/// 2 per hit in the section heading and 1 per hit in the section content.
use std::cmp::Reverse;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::Document;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;
const MAX_SUMMARY_LEN: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub document_id: String,
    pub title: String,
    pub section: String,
    pub score: u32,
    pub summary: String,
}

fn term_regex() -> &'static Regex {
    static TERM_RE: OnceLock<Regex> = OnceLock::new();
    TERM_RE.get_or_init(|| Regex::new(r"[a-z0-9_+#]+").expect("valid regex"))
}

fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    term_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct lowercase query terms of two or more characters, sorted.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = words(text)
        .into_iter()
        .filter(|t| t.chars().count() >= 2)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

/// Rank sections of `documents` against `query`. Documents are expected in a
/// stable order; ties fall back to document id, then section order.
pub fn search<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
    query: &str,
    limit: usize,
) -> Vec<SearchHit> {
    let terms = tokenize(query);
    if terms.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &str, usize, SearchHit)> = Vec::new();
    for doc in documents {
        let title_hits = count_hits(&doc.title, &terms) * 3;
        for (index, section) in doc.sections.iter().enumerate() {
            let score = title_hits
                + count_hits(&section.heading, &terms) * 2
                + count_hits(&section.content, &terms);
            if score == 0 {
                continue;
            }
            scored.push((
                score,
                doc.id.as_str(),
                index,
                SearchHit {
                    document_id: doc.id.clone(),
                    title: doc.title.clone(),
                    section: section.heading.clone(),
                    score,
                    summary: summarize(&section.content),
                },
            ));
        }
    }

    scored.sort_by_key(|(score, id, index, _)| (Reverse(*score), *id, *index));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, _, hit)| hit)
        .collect()
}

/// Occurrences of any of `terms` (sorted) among the words of `text`.
fn count_hits(text: &str, terms: &[String]) -> u32 {
    words(text)
        .iter()
        .filter(|w| terms.binary_search(w).is_ok())
        .count() as u32
}

fn summarize(content: &str) -> String {
    if content.chars().count() > MAX_SUMMARY_LEN {
        let mut summary: String = content.chars().take(MAX_SUMMARY_LEN).collect();
        summary.push_str("...");
        summary
    } else {
        content.to_string()
    }
}
