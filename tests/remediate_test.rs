//! Integration tests for remediation.

use std::sync::Arc;
use notebook_a11y::audit::{Category, Severity};
use notebook_a11y::error::{Error, Result};
use notebook_a11y::model::{Cell, Notebook, Source};
use notebook_a11y::remediate::{
    AltTextFix, ChangeLog, Fix, RemediateOptions, Remediator, TableHeaderFix, DEFAULT_PLACEHOLDER,
};

/// Fix that appends a cell before failing.
struct FailingFix;

impl Fix for FailingFix {
    fn name(&self) -> &str {
        "failing"
    }

    fn description(&self) -> &str {
        "Fails after touching the notebook"
    }

    fn apply(
        &self,
        notebook: &mut Notebook,
        _options: &RemediateOptions,
        changes: &mut ChangeLog,
    ) -> Result<()> {
        notebook.push_cell(Cell::markdown("garbage"));
        changes.push("Appended garbage");
        Err(Error::rule("failing", "disk on fire"))
    }
}

#[test]
fn test_scenario_alt_text() {
    let mut nb = Notebook::with_cells(vec![Cell::markdown("![](img.png)\n")]);
    let report = Remediator::empty()
        .with_fix(Arc::new(AltTextFix))
        .remediate(&mut nb);

    assert_eq!(
        nb.cells[0].text(),
        format!("![{}](img.png)\n", DEFAULT_PLACEHOLDER)
    );
    assert_eq!(report.changes.len(), 1);

    let issues = notebook_a11y::audit(&nb);
    assert!(issues.critical().is_empty());
    let alt_successes = issues
        .successes()
        .iter()
        .filter(|i| i.category() == Category::IMAGE_ALT_TEXT)
        .count();
    assert_eq!(alt_successes, 1);
}

#[test]
fn test_scenario_table_header() {
    let mut nb = Notebook::with_cells(vec![Cell {
        source: Source::Lines(vec![
            "| Name | Score |\n".to_string(),
            "| Alice | 95 |\n".to_string(),
        ]),
        ..Cell::markdown("")
    }]);
    Remediator::empty()
        .with_fix(Arc::new(TableHeaderFix))
        .remediate(&mut nb);

    assert_eq!(
        nb.cells[0].source,
        Source::Lines(vec![
            "| Name | Score |\n".to_string(),
            "| --- | --- |\n".to_string(),
            "| Alice | 95 |\n".to_string(),
        ])
    );
    let issues = notebook_a11y::audit(&nb);
    assert!(issues.categories(Severity::Success).contains(&Category::TABLE_HEADER));
    assert!(!issues.categories(Severity::Warning).contains(&Category::TABLE_NO_HEADER));
}

#[test]
fn test_full_remediation_clears_fixable_findings() {
    let mut nb = Notebook::with_cells(vec![
        Cell::code("import pandas as pd"),
        Cell::markdown(
            "## Data\n![](chart.png)\n<img src=\"logo.png\">\n| a | b |\n| 1 | 2 |\nSource: https://data.gov/sales\n",
        ),
    ]);
    let before = notebook_a11y::audit(&nb);
    assert!(before.has_critical());

    let report = notebook_a11y::remediate_with_options(
        &mut nb,
        RemediateOptions::new().with_title("Sales Analysis"),
    );
    assert_eq!(report.changes.len(), 5);
    assert!(report.diagnostics.is_empty());

    let after = notebook_a11y::audit(&nb);
    assert!(after.critical().is_empty());
    let warnings = after.categories(Severity::Warning);
    for fixed in [
        Category::MISSING_TITLE,
        Category::TABLE_NO_HEADER,
        Category::BARE_URL,
    ] {
        assert!(!warnings.contains(&fixed), "{} still reported", fixed);
    }
    assert!(nb.cells[1].text().starts_with("# Sales Analysis\n\n## Data\n"));
}

#[test]
fn test_remediation_is_idempotent() {
    let mut nb = Notebook::with_cells(vec![
        Cell::code("x = 1"),
        Cell::markdown("![]( a.png )\n<IMG ALT='' SRC=b.png>\n| h |\n| v |\nhttps://example.com/x"),
    ]);
    notebook_a11y::remediate(&mut nb);
    let once = nb.clone();

    let second = notebook_a11y::remediate(&mut nb);
    assert!(second.changes.is_empty());
    assert_eq!(nb, once);
}

#[test]
fn test_notebook_without_markdown_gets_title_cell() {
    let mut nb = Notebook::with_cells(vec![Cell::code("print('hi')")]);
    let report = notebook_a11y::remediate(&mut nb);

    assert_eq!(nb.cell_count(), 2);
    assert!(nb.cells[0].is_markdown());
    assert!(nb.cells[0].text().starts_with("# Untitled Notebook\n"));
    assert_eq!(report.changes.len(), 1);
}

#[test]
fn test_failing_fix_is_isolated() {
    let mut nb = Notebook::with_cells(vec![Cell::markdown("| a |\n| 1 |\n")]);
    let report = Remediator::empty()
        .with_fix(Arc::new(FailingFix))
        .with_fix(Arc::new(TableHeaderFix))
        .remediate(&mut nb);

    assert_eq!(nb.cell_count(), 1);
    assert_eq!(nb.cells[0].text(), "| a |\n| --- |\n| 1 |\n");
    assert_eq!(report.changes.entries(), ["Added header separator to table in cell 1"]);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].rule, "failing");
}

#[test]
fn test_unrelated_content_is_untouched() {
    let untouched = Cell::code("![](not-markdown.png)  # code cells are never rewritten");
    let mut nb = Notebook::with_cells(vec![
        Cell::markdown("# Title\n![](a.png)"),
        untouched.clone(),
    ]);
    notebook_a11y::remediate(&mut nb);
    assert_eq!(nb.cells[1], untouched);
}
