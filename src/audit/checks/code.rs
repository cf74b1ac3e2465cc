//! Code cell context and documentation (WCAG 3.1.5).

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;

/// Markers that indicate a comment or docstring in common notebook languages.
const COMMENT_MARKERS: &[&str] = &["#", "//", "/*", "\"\"\"", "'''"];

/// Checks that code cells are explained by prose or comments.
pub struct CodeCheck;

impl Check for CodeCheck {
    fn name(&self) -> &str {
        "code"
    }

    fn description(&self) -> &str {
        "Code cells are introduced by markdown and long cells carry comments"
    }

    fn check(&self, notebook: &Notebook, options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        let code_count = notebook.code_cells().count();
        if code_count > 0 {
            issues.push(Issue::success(
                Category::CODE_CELLS,
                Location::Document,
                format!("Found {} code cells", code_count),
            ));
        }

        let mut previous_was_code = false;
        for (idx, cell) in notebook.cells().iter().enumerate() {
            if cell.is_markdown() {
                previous_was_code = false;
                continue;
            }
            if !cell.is_code() {
                continue;
            }

            if previous_was_code {
                issues.push(
                    Issue::warning(
                        Category::CODE_CONTEXT,
                        Location::cell(idx),
                        format!(
                            "Code cell follows another code cell (cell {}) without markdown explanation",
                            idx
                        ),
                    )
                    .with_wcag(wcag::READING_LEVEL)
                    .with_remediation("Add a markdown cell explaining what the code does"),
                );
            }
            previous_was_code = true;

            let source = cell.text();
            let trimmed = source.trim();
            if trimmed.chars().count() > options.min_documented_code_len
                && !COMMENT_MARKERS.iter().any(|m| trimmed.contains(m))
            {
                issues.push(
                    Issue::warning(
                        Category::CODE_COMMENTS,
                        Location::cell(idx),
                        format!(
                            "Code cell has {} characters and no comments",
                            trimmed.chars().count()
                        ),
                    )
                    .with_wcag(wcag::READING_LEVEL)
                    .with_remediation("Add comments describing what the code does"),
                );
            }
        }

        Ok(issues)
    }
}
