//! HTML rendering for audit reports.

use crate::audit::{IssueSet, Severity};
use std::fmt::Write;

use super::{sections, ReportOptions};

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; \
line-height: 1.6; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; color: #222; }
.summary, .section { background: #fff; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
.summary-stats { display: flex; gap: 20px; margin-top: 15px; }
.stat { flex: 1; padding: 15px; border-radius: 4px; text-align: center; }
.stat-number { font-size: 2em; font-weight: bold; }
.critical { background: #fee; border-left: 4px solid #b00; }
.warning { background: #ffe; border-left: 4px solid #a60; }
.success { background: #efe; border-left: 4px solid #070; }
.issue { padding: 15px; margin-bottom: 15px; border-left: 4px solid #ccc; background: #fafafa; }
.issue-critical { border-left-color: #b00; }
.issue-warning { border-left-color: #a60; }
.issue-success { border-left-color: #070; }
.issue-type { font-weight: bold; }
.issue-location { color: #555; font-size: 0.9em; }
.issue-wcag { color: #0055aa; font-size: 0.9em; }
.issue-remediation { background: #fff; padding: 10px; margin-top: 10px; border: 1px solid #ddd; }
";

/// Convert an audit result to a standalone HTML page.
pub fn to_html(issues: &IssueSet, options: &ReportOptions) -> String {
    let name = escape(options.notebook_label());
    let summary = issues.summary();
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"UTF-8\">");
    let _ = writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    );
    let _ = writeln!(out, "<title>Accessibility Audit Report - {}</title>", name);
    let _ = writeln!(out, "<style>\n{}</style>", STYLE);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<main>");
    let _ = writeln!(out, "<h1>Jupyter Notebook Accessibility Audit Report</h1>");

    let _ = writeln!(out, "<section class=\"summary\" aria-labelledby=\"summary-heading\">");
    let _ = writeln!(out, "<h2 id=\"summary-heading\">Notebook: {}</h2>", name);
    let _ = writeln!(out, "<div class=\"summary-stats\">");
    for (class, count, label) in [
        ("critical", summary.critical, "Critical Issues"),
        ("warning", summary.warning, "Warnings"),
        ("success", summary.success, "Successful Checks"),
    ] {
        let _ = writeln!(
            out,
            "<div class=\"stat {}\"><div class=\"stat-number\">{}</div><div>{}</div></div>",
            class, count, label
        );
    }
    let _ = writeln!(out, "</div>");
    let _ = writeln!(out, "</section>");

    for (severity, title, list) in sections(issues, options) {
        let class = severity.as_str();
        let _ = writeln!(out, "<section class=\"section\">");
        let _ = writeln!(out, "<h2>{}</h2>", title);
        for issue in list {
            let _ = writeln!(out, "<div class=\"issue issue-{}\">", class);
            let _ = writeln!(
                out,
                "<div class=\"issue-type\">{}</div>",
                escape(issue.category().as_str())
            );
            if severity == Severity::Success {
                let _ = writeln!(
                    out,
                    "<div>{} ({})</div>",
                    escape(issue.message()),
                    issue.location()
                );
            } else {
                let _ = writeln!(
                    out,
                    "<div class=\"issue-location\">Location: {}</div>",
                    issue.location()
                );
                let _ = writeln!(out, "<div>{}</div>", escape(issue.message()));
                if let Some(wcag) = issue.wcag() {
                    let _ = writeln!(out, "<div class=\"issue-wcag\">WCAG: {}</div>", escape(wcag));
                }
                if let Some(fix) = issue.remediation() {
                    let _ = writeln!(
                        out,
                        "<div class=\"issue-remediation\"><strong>How to Fix:</strong> {}</div>",
                        escape(fix)
                    );
                }
            }
            let _ = writeln!(out, "</div>");
        }
        let _ = writeln!(out, "</section>");
    }

    if !issues.diagnostics().is_empty() {
        let _ = writeln!(out, "<section class=\"section\">");
        let _ = writeln!(out, "<h2>Skipped Checks</h2>");
        let _ = writeln!(out, "<ul>");
        for diagnostic in issues.diagnostics() {
            let _ = writeln!(out, "<li>{}</li>", escape(&diagnostic.to_string()));
        }
        let _ = writeln!(out, "</ul>");
        let _ = writeln!(out, "</section>");
    }

    let _ = writeln!(out, "</main>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Escape text for use in HTML content and attribute values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
