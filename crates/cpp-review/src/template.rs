use std::fmt::Write;

use crate::model::{Category, Severity};

/// Render the severity-tagged report skeleton the agent fills in for `category`.
pub fn render_output_template(category: Category) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## C/C++ {}", category.report_title());
    out.push('\n');
    out.push_str("**Scope:** <files, commit or PR reviewed>\n\n");
    out.push_str("**Summary:** <one paragraph: overall assessment and the most important risk>\n");

    for severity in Severity::ALL {
        out.push('\n');
        let _ = writeln!(out, "### {} - {}", severity.as_str(), severity.label());
        out.push('\n');
        let _ = writeln!(out, "_{}_", severity.description());
        out.push('\n');
        let _ = writeln!(
            out,
            "- **[{}]** <file>:<line> - <issue>\n  Recommendation: <fix>",
            severity.as_str()
        );
    }

    out.push_str("\nWrite \"None.\" under any level without findings.\n");
    out
}
