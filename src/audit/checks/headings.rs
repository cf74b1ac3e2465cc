//! Title and heading hierarchy (WCAG 2.4.2, 1.3.1).

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{fenced_lines, heading};

/// Checks for a level-1 title and for skipped heading levels.
pub struct HeadingCheck;

struct Heading {
    level: usize,
    location: Location,
    text: String,
}

impl Check for HeadingCheck {
    fn name(&self) -> &str {
        "headings"
    }

    fn description(&self) -> &str {
        "Notebook has an H1 title and heading levels do not skip"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let headings = collect_headings(notebook);
        let mut issues = Vec::new();

        match headings.iter().find(|h| h.level == 1) {
            Some(title) => issues.push(Issue::success(
                Category::HAS_TITLE,
                Location::Document,
                format!("Notebook has a main title: \"{}\"", title.text),
            )),
            None => issues.push(
                Issue::warning(
                    Category::MISSING_TITLE,
                    Location::Document,
                    "Notebook is missing a main title (H1 heading)",
                )
                .with_wcag(wcag::PAGE_TITLED)
                .with_remediation("Add a # Main Title at the beginning of the notebook"),
            ),
        }

        if let Some(first) = headings.first().filter(|h| h.level != 1) {
            issues.push(
                Issue::warning(
                    Category::FIRST_HEADING_LEVEL,
                    first.location,
                    format!(
                        "First heading is H{} (\"{}\") instead of H1",
                        first.level, first.text
                    ),
                )
                .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                .with_remediation("Start the notebook with a level-1 heading"),
            );
        }

        for pair in headings.windows(2) {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.level > prev.level + 1 {
                issues.push(
                    Issue::warning(
                        Category::HEADING_HIERARCHY,
                        current.location,
                        format!(
                            "Heading level skipped (jumped from H{} to H{})",
                            prev.level, current.level
                        ),
                    )
                    .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                    .with_remediation("Use sequential heading levels (H1, H2, H3...)"),
                );
            }
        }

        Ok(issues)
    }
}

/// Headings of all markdown cells in document order, fenced code excluded.
fn collect_headings(notebook: &Notebook) -> Vec<Heading> {
    let mut headings = Vec::new();
    for (idx, cell) in notebook.markdown_cells() {
        let lines = cell.source.lines();
        let fenced = fenced_lines(&lines);
        for (line, in_fence) in lines.iter().zip(fenced) {
            if in_fence {
                continue;
            }
            if let Some((level, text)) = heading(line) {
                headings.push(Heading {
                    level,
                    location: Location::cell(idx),
                    text: text.to_string(),
                });
            }
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::checks::run;
    use crate::model::Cell;

    fn categories(issues: &[Issue]) -> Vec<Category> {
        issues.iter().map(Issue::category).collect()
    }

    #[test]
    fn test_skipped_levels() {
        let issues = run(
            &HeadingCheck,
            vec![Cell::markdown("## Section\n"), Cell::markdown("#### Sub\n")],
        );
        assert_eq!(
            categories(&issues),
            vec![
                Category::MISSING_TITLE,
                Category::FIRST_HEADING_LEVEL,
                Category::HEADING_HIERARCHY
            ]
        );
        assert_eq!(issues[2].location(), Location::Cell(2));
    }

    #[test]
    fn test_one_warning_per_jump() {
        let issues = run(
            &HeadingCheck,
            vec![Cell::markdown("# T\n### A\n## B\n##### C\n# D\n## E")],
        );
        let jumps = issues
            .iter()
            .filter(|i| i.category() == Category::HEADING_HIERARCHY)
            .count();
        assert_eq!(jumps, 2);
        assert_eq!(issues[0].category(), Category::HAS_TITLE);
    }

    #[test]
    fn test_fenced_comments_are_not_headings() {
        let issues = run(
            &HeadingCheck,
            vec![Cell::markdown("# Title\n```python\n### comment\n```\n## Next")],
        );
        assert_eq!(categories(&issues), vec![Category::HAS_TITLE]);
    }

    #[test]
    fn test_code_cells_ignored() {
        let issues = run(&HeadingCheck, vec![Cell::code("# just a comment")]);
        assert_eq!(categories(&issues), vec![Category::MISSING_TITLE]);
    }
}
