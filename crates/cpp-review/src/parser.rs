/// Parser for reference markdown documents.
///
/// Documents follow a fixed shape:
/// - Title: the first `# Heading` line
/// - Sections: `## Heading` lines; a section ends at the next `#` or `##` heading or EOF
/// - Text between the title and the first `##` becomes a section named after the title
///
/// Headings inside fenced code blocks (``` or ~~~, three or more) are ignored. A fence
/// closes only on a run of the same character at least as long as the opener.
/// The body is kept verbatim.
use regex::Regex;

use mcp_common::source::content_digest;

use crate::error::AppError;
use crate::model::{Document, DocumentSection};

pub fn parse_document(id: &str, content: &str) -> Result<Document, AppError> {
    let heading_re = Regex::new(r"^(#{1,2})\s+(.+?)\s*$").expect("valid regex");
    let fence_re = Regex::new(r"^ {0,3}(`{3,}|~{3,})(.*)$").expect("valid regex");

    let mut title: Option<String> = None;
    let mut sections: Vec<DocumentSection> = Vec::new();
    let mut current_heading: Option<String> = None;
    let mut current_lines: Vec<&str> = Vec::new();
    // Open fence: marker character and run length.
    let mut fence: Option<(char, usize)> = None;

    for line in content.lines() {
        let was_fenced = fence.is_some();
        if let Some(caps) = fence_re.captures(line) {
            let marker = &caps[1];
            let ch = marker.chars().next().unwrap_or('`');
            let len = marker.len();
            match fence {
                None => fence = Some((ch, len)),
                Some((open_ch, open_len))
                    if ch == open_ch && len >= open_len && caps[2].trim().is_empty() =>
                {
                    fence = None
                }
                Some(_) => {}
            }
        }

        let heading = if was_fenced || fence.is_some() {
            None
        } else {
            heading_re.captures(line)
        };

        let Some(caps) = heading else {
            if current_heading.is_some() {
                current_lines.push(line);
            }
            continue;
        };

        let text = caps[2].to_string();
        if caps[1].len() == 1 && title.is_none() {
            title = Some(text.clone());
            current_heading = Some(text);
            current_lines.clear();
            continue;
        }

        flush_section(&mut sections, current_heading.take(), &current_lines);
        current_lines.clear();
        current_heading = Some(text);
    }
    flush_section(&mut sections, current_heading.take(), &current_lines);

    let title = title.ok_or_else(|| AppError::Parse {
        line: first_content_line(content),
        message: format!("missing '# ' title heading in document '{id}'"),
    })?;

    Ok(Document {
        id: id.to_string(),
        title,
        body: content.to_string(),
        sections,
        digest: content_digest(content),
    })
}

/// 1-based line of the first non-blank line, where a title heading was expected.
fn first_content_line(content: &str) -> usize {
    content
        .lines()
        .position(|l| !l.trim().is_empty())
        .map_or(1, |i| i + 1)
}

/// Empty sections (a heading directly followed by another heading) are dropped.
fn flush_section(sections: &mut Vec<DocumentSection>, heading: Option<String>, lines: &[&str]) {
    let Some(heading) = heading else {
        return;
    };
    let content = lines.join("\n").trim().to_string();
    if !content.is_empty() {
        sections.push(DocumentSection { heading, content });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_title_and_sections() {
        let content = r#"# C/C++ Security Review Checklist

Security findings default to P0 or P1.

## Memory Safety

- [ ] Buffer writes are bounded.

## Input Validation

- [ ] Validate lengths.
"#;
        let doc = parse_document("security-checklist", content).unwrap();
        assert_eq!(doc.id, "security-checklist");
        assert_eq!(doc.title, "C/C++ Security Review Checklist");
        assert_eq!(doc.body, content);
        assert_eq!(doc.sections.len(), 3);
        assert_eq!(doc.sections[0].heading, "C/C++ Security Review Checklist");
        assert_eq!(doc.sections[0].content, "Security findings default to P0 or P1.");
        assert_eq!(doc.sections[1].heading, "Memory Safety");
        assert_eq!(doc.sections[1].content, "- [ ] Buffer writes are bounded.");
        assert_eq!(doc.sections[2].heading, "Input Validation");
    }

    #[test]
    fn headings_inside_code_fences_are_ignored() {
        let content = "# Anti-Patterns\n\n## Macros\n\n```c\n# define MAX 10\n## not a heading\n```\n\nUse constexpr.\n";
        let doc = parse_document("anti-patterns", content).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "Macros");
        assert!(doc.sections[0].content.contains("## not a heading"));
        assert!(doc.sections[0].content.ends_with("Use constexpr."));
    }

    #[test]
    fn tilde_fences_hide_headings() {
        let content = "# T\n\n## A\n\n~~~c\n# define X 1\n~~~\n\nafter\n";
        let doc = parse_document("t", content).unwrap();
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["A"]);
        assert!(doc.sections[0].content.contains("# define X 1"));
        assert!(doc.sections[0].content.ends_with("after"));
    }

    #[test]
    fn fence_closes_only_on_matching_marker() {
        let content = "# T\n\n## A\n\n````md\n```\n## inner\n~~~\n````\n\n## B\n\ntext\n";
        let doc = parse_document("t", content).unwrap();
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["A", "B"]);
        assert!(doc.sections[0].content.contains("## inner"));
    }

    #[test]
    fn level_three_headings_stay_in_their_section() {
        let content = "# Guide\n\n## Levels\n\n### P0\n\nCritical.\n";
        let doc = parse_document("guide", content).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].content.contains("### P0"));
    }

    #[test]
    fn missing_title_is_a_parse_error() {
        let err = parse_document("untitled", "## Only a section\n\ntext\n").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 1, .. }));
        assert!(err.to_string().contains("untitled"));

        let err = parse_document("late", "\n\n## Section\n\ntext\n").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 3, .. }));
        assert!(matches!(
            parse_document("empty", ""),
            Err(AppError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn digest_tracks_body() {
        let a = parse_document("a", "# A\n").unwrap();
        let b = parse_document("b", "# A\n").unwrap();
        let c = parse_document("c", "# C\n").unwrap();
        assert_eq!(a.digest, b.digest);
        assert_ne!(a.digest, c.digest);
    }
}
