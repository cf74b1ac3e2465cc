//! Plain text rendering for audit reports.

use crate::audit::{IssueSet, Severity};
use std::fmt::Write;

use super::{sections, ReportOptions};

const RULE_WIDTH: usize = 80;

/// Convert an audit result to a plain text report.
pub fn to_text(issues: &IssueSet, options: &ReportOptions) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let summary = issues.summary();
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "JUPYTER NOTEBOOK ACCESSIBILITY AUDIT REPORT");
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "Notebook: {}", options.notebook_label());
    let _ = writeln!(out);

    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{}", light);
    let _ = writeln!(out, "Critical Issues: {}", summary.critical);
    let _ = writeln!(out, "Warnings: {}", summary.warning);
    let _ = writeln!(out, "Successful Checks: {}", summary.success);
    let _ = writeln!(out);

    for (severity, _, list) in sections(issues, options) {
        let _ = writeln!(out, "{}", banner(severity));
        let _ = writeln!(out, "{}", light);
        for (i, issue) in list.iter().enumerate() {
            if severity == Severity::Success {
                let _ = writeln!(
                    out,
                    "{}. {}: {} ({})",
                    i + 1,
                    issue.category(),
                    issue.message(),
                    issue.location()
                );
                continue;
            }
            let _ = writeln!(out, "{}. {}", i + 1, issue.category());
            let _ = writeln!(out, "   Location: {}", issue.location());
            let _ = writeln!(out, "   Message: {}", issue.message());
            if let Some(wcag) = issue.wcag() {
                let _ = writeln!(out, "   WCAG: {}", wcag);
            }
            if let Some(fix) = issue.remediation() {
                let _ = writeln!(out, "   How to Fix: {}", fix);
            }
            let _ = writeln!(out);
        }
    }

    if !issues.diagnostics().is_empty() {
        let _ = writeln!(out, "SKIPPED CHECKS");
        let _ = writeln!(out, "{}", light);
        for diagnostic in issues.diagnostics() {
            let _ = writeln!(out, "- {}", diagnostic);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "END OF REPORT");
    let _ = write!(out, "{}", heavy);
    out
}

fn banner(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "CRITICAL ISSUES (Must Fix)",
        Severity::Warning => "WARNINGS (Should Fix)",
        Severity::Success => "SUCCESSFUL CHECKS",
    }
}
