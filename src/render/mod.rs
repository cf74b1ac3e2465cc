//! Rendering module for turning audit results into reports.

mod html;
mod json;
mod markdown;
mod options;
mod text;

pub use html::to_html;
pub use json::{to_json, JsonFormat};
pub use markdown::to_markdown;
pub use options::{ReportFormat, ReportOptions};
pub use text::to_text;

use crate::audit::{Issue, IssueSet, Severity};
use crate::error::Result;

/// Render an audit result in the given format.
pub fn render(issues: &IssueSet, format: ReportFormat, options: &ReportOptions) -> Result<String> {
    log::debug!("Rendering {} report ({})", format, issues.summary());
    match format {
        ReportFormat::Text => Ok(to_text(issues, options)),
        ReportFormat::Markdown => Ok(to_markdown(issues, options)),
        ReportFormat::Html => Ok(to_html(issues, options)),
        ReportFormat::Json => to_json(issues, options),
    }
}

/// Non-empty severity sections in report order.
fn sections<'a>(
    issues: &'a IssueSet,
    options: &ReportOptions,
) -> Vec<(Severity, &'static str, &'a [Issue])> {
    Severity::ALL
        .into_iter()
        .filter(|&s| s != Severity::Success || options.include_successes)
        .map(|s| (s, section_title(s), issues.get(s)))
        .filter(|(_, _, list)| !list.is_empty())
        .collect()
}

fn section_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "Critical Issues (Must Fix)",
        Severity::Warning => "Warnings (Should Fix)",
        Severity::Success => "Successful Checks",
    }
}
