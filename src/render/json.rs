//! JSON rendering for audit reports.

use crate::audit::{Diagnostic, Issue, IssueSet, Summary};
use crate::error::{Error, Result};
use serde::Serialize;

use super::ReportOptions;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    notebook: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    summary: Summary,
    critical: &'a [Issue],
    warning: &'a [Issue],
    success: &'a [Issue],
    diagnostics: &'a [Diagnostic],
}

/// Convert an audit result to JSON.
pub fn to_json(issues: &IssueSet, options: &ReportOptions) -> Result<String> {
    let report = JsonReport {
        notebook: options.notebook_name.as_deref(),
        generated_at: options
            .timestamp
            .then(|| chrono::Local::now().to_rfc3339()),
        summary: issues.summary(),
        critical: issues.critical(),
        warning: issues.warnings(),
        success: if options.include_successes {
            issues.successes()
        } else {
            &[]
        },
        diagnostics: issues.diagnostics(),
    };

    let result = match options.json_format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&report),
        JsonFormat::Compact => serde_json::to_string(&report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Category, Location};
    use serde_json::Value;

    fn sample() -> IssueSet {
        IssueSet::from_issues([
            Issue::critical(Category::MISSING_ALT_TEXT, Location::Cell(2), "no alt")
                .with_wcag("1.1.1 Non-text Content (Level A)"),
            Issue::success(Category::HAS_TITLE, Location::Document, "has title"),
        ])
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&sample(), &ReportOptions::new().with_notebook_name("a.ipynb")).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["notebook"], "a.ipynb");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["summary"]["critical"], 1);
        assert_eq!(value["critical"][0]["category"], "MISSING_ALT_TEXT");
        assert_eq!(value["critical"][0]["severity"], "critical");
        assert_eq!(value["critical"][0]["location"], "Cell 2");
        assert!(value["critical"][0].get("remediation").is_none());
        assert_eq!(value["success"].as_array().unwrap().len(), 1);
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_without_successes() {
        let options = ReportOptions::new()
            .with_json_format(JsonFormat::Compact)
            .with_successes(false)
            .with_timestamp(false);
        let json = to_json(&sample(), &options).unwrap();
        assert!(!json.contains('\n'));

        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("generated_at").is_none());
        assert_eq!(value["summary"]["success"], 1);
        assert!(value["success"].as_array().unwrap().is_empty());
    }
}
