//! Presence of explanatory prose.

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;

/// Checks that the notebook has markdown cells at all.
pub struct StructureCheck;

impl Check for StructureCheck {
    fn name(&self) -> &str {
        "structure"
    }

    fn description(&self) -> &str {
        "Notebook contains markdown cells that give context"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let markdown_count = notebook.markdown_cells().count();

        let issue = if markdown_count == 0 {
            Issue::warning(
                Category::NO_MARKDOWN,
                Location::Document,
                "Notebook has no markdown cells for context",
            )
            .with_wcag(wcag::PAGE_TITLED)
            .with_remediation("Add markdown cells to explain the notebook purpose and code")
        } else {
            Issue::success(
                Category::HAS_MARKDOWN,
                Location::Document,
                format!("Notebook has {} markdown cells for context", markdown_count),
            )
        };

        Ok(vec![issue])
    }
}
