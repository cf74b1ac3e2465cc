//! Markdown rendering for audit reports.

use crate::audit::{Issue, IssueSet, Severity};
use std::fmt::Write;

use super::{sections, ReportOptions};

/// Convert an audit result to a Markdown report.
pub fn to_markdown(issues: &IssueSet, options: &ReportOptions) -> String {
    let summary = issues.summary();
    let mut out = String::new();

    let _ = writeln!(out, "# Accessibility Audit Report\n");
    let _ = writeln!(out, "**Notebook:** `{}`\n", options.notebook_label());

    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(out, "| Severity | Count |");
    let _ = writeln!(out, "| --- | --- |");
    let _ = writeln!(out, "| Critical | {} |", summary.critical);
    let _ = writeln!(out, "| Warning | {} |", summary.warning);
    let _ = writeln!(out, "| Success | {} |", summary.success);

    for (severity, title, list) in sections(issues, options) {
        let _ = writeln!(out, "\n## {}\n", title);
        for issue in list {
            render_issue(&mut out, severity, issue);
        }
    }

    if !issues.diagnostics().is_empty() {
        let _ = writeln!(out, "\n## Skipped Checks\n");
        for diagnostic in issues.diagnostics() {
            let _ = writeln!(out, "- `{}`: {}", diagnostic.rule, escape(&diagnostic.message));
        }
    }

    out
}

fn render_issue(out: &mut String, severity: Severity, issue: &Issue) {
    if severity == Severity::Success {
        let _ = writeln!(
            out,
            "- **{}** ({}): {}",
            issue.category(),
            issue.location(),
            escape(issue.message())
        );
        return;
    }

    let _ = writeln!(out, "### {} ({})\n", issue.category(), issue.location());
    let _ = writeln!(out, "{}\n", escape(issue.message()));
    if let Some(wcag) = issue.wcag() {
        let _ = writeln!(out, "- **WCAG:** {}", wcag);
    }
    if let Some(fix) = issue.remediation() {
        let _ = writeln!(out, "- **How to Fix:** {}", escape(fix));
    }
    if issue.wcag().is_some() || issue.remediation().is_some() {
        out.push('\n');
    }
}

/// Escape characters that would turn finding text into markup.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
