//! Table header structure (WCAG 1.3.1).

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{fenced_lines, is_table_separator, table_blocks, HTML_TABLE};

/// Checks markdown and HTML tables for header rows.
pub struct TableCheck;

impl Check for TableCheck {
    fn name(&self) -> &str {
        "tables"
    }

    fn description(&self) -> &str {
        "Markdown tables, HTML tables and table outputs declare header rows"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for (idx, cell) in notebook.markdown_cells() {
            let location = Location::cell(idx);
            let lines = cell.source.lines();
            let fenced = fenced_lines(&lines);
            let rows: Vec<&String> = table_blocks(&lines, &fenced)
                .into_iter()
                .flat_map(|block| &lines[block])
                .collect();

            if !rows.is_empty() {
                if rows.iter().any(|row| is_table_separator(row)) {
                    issues.push(Issue::success(
                        Category::TABLE_HEADER,
                        location,
                        "Table has proper header row",
                    ));
                } else {
                    issues.push(
                        Issue::warning(
                            Category::TABLE_NO_HEADER,
                            location,
                            "Table may be missing header row",
                        )
                        .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                        .with_remediation("Add header separator line with |---|---| format"),
                    );
                }
            }

            let source = cell.text();
            for table in HTML_TABLE.find_iter(&source) {
                let table = table.as_str().to_lowercase();
                if !table.contains("<th") {
                    issues.push(
                        Issue::warning(
                            Category::HTML_TABLE_NO_HEADER,
                            location,
                            "HTML table is missing header cells (th)",
                        )
                        .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                        .with_remediation("Use <th> tags for header cells instead of <td>"),
                    );
                    continue;
                }

                issues.push(Issue::success(
                    Category::HTML_TABLE_HEADER,
                    location,
                    "HTML table has header cells (th)",
                ));
                if !table.contains("scope=") {
                    issues.push(
                        Issue::warning(
                            Category::TABLE_SCOPE,
                            location,
                            "HTML table headers missing scope attribute",
                        )
                        .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                        .with_remediation("Add scope=\"col\" or scope=\"row\" to <th> elements"),
                    );
                }
            }
        }

        for (idx, cell) in notebook.code_cells() {
            for output in cell.outputs().iter().filter(|o| o.is_rich_display()) {
                let Some(html) = output.payload_text("text/html") else {
                    continue;
                };
                let html = html.to_lowercase();
                if !html.contains("<table") {
                    continue;
                }

                if html.contains("<th") {
                    issues.push(Issue::success(
                        Category::OUTPUT_TABLE_HEADER,
                        Location::cell(idx),
                        "Table output has header cells (th)",
                    ));
                } else {
                    issues.push(
                        Issue::warning(
                            Category::OUTPUT_TABLE_NO_HEADER,
                            Location::cell(idx),
                            "Table output may lack proper headers",
                        )
                        .with_wcag(wcag::INFO_AND_RELATIONSHIPS)
                        .with_remediation(
                            "Display tables with named columns so the HTML output has <th> headers",
                        ),
                    );
                }
            }
        }

        Ok(issues)
    }
}
