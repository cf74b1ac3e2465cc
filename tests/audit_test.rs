//! Integration tests for the audit engine.

use std::sync::Arc;

use notebook_a11y::audit::{
    AuditOptions, Auditor, Category, Check, CheckRegistry, Issue, Location, Severity,
};
use notebook_a11y::error::{Error, Result};
use notebook_a11y::model::{Cell, Notebook, Output};
use serde_json::json;

/// Check that flags every raw cell.
struct RawCellCheck;

impl Check for RawCellCheck {
    fn name(&self) -> &str {
        "raw-cells"
    }

    fn description(&self) -> &str {
        "Flags raw cells"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        Ok(notebook
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_markdown() && !c.is_code())
            .map(|(idx, _)| {
                Issue::warning(Category::new("RAW_CELL"), Location::cell(idx), "Raw cell")
            })
            .collect())
    }
}

/// Check that always fails.
struct BrokenCheck;

impl Check for BrokenCheck {
    fn name(&self) -> &str {
        "broken"
    }

    fn description(&self) -> &str {
        "Always fails"
    }

    fn check(&self, _notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        Err(Error::rule("broken", "cannot evaluate"))
    }
}

#[test]
fn test_scenario_skipped_heading_levels() {
    let nb = Notebook::with_cells(vec![
        Cell::markdown("## Section\n"),
        Cell::markdown("#### Sub\n"),
    ]);
    let issues = notebook_a11y::audit(&nb);

    let warnings = issues.categories(Severity::Warning);
    assert!(warnings.contains(&Category::MISSING_TITLE));
    assert!(warnings.contains(&Category::HEADING_HIERARCHY));

    let jump = issues
        .warnings()
        .iter()
        .find(|i| i.category() == Category::HEADING_HIERARCHY)
        .unwrap();
    assert_eq!(jump.location(), Location::Cell(2));
    assert!(jump.message().contains("H2 to H4"));
    assert!(!issues.has_critical());
}

#[test]
fn test_scenario_image_without_alt() {
    let nb = Notebook::with_cells(vec![Cell::markdown("![](img.png)\n")]);
    let issues = notebook_a11y::audit(&nb);

    assert_eq!(issues.critical().len(), 1);
    assert_eq!(issues.critical()[0].category(), Category::MISSING_ALT_TEXT);
    assert_eq!(issues.critical()[0].location(), Location::Cell(1));
}

#[test]
fn test_scenario_table_without_header() {
    let nb = Notebook::with_cells(vec![Cell::markdown("| Name | Score |\n| Alice | 95 |\n")]);
    let issues = notebook_a11y::audit(&nb);
    assert!(issues.categories(Severity::Warning).contains(&Category::TABLE_NO_HEADER));
}

#[test]
fn test_scenario_empty_notebook() {
    let issues = notebook_a11y::audit(&Notebook::new());

    let warnings = issues.categories(Severity::Warning);
    assert!(warnings.contains(&Category::NO_MARKDOWN));
    assert!(warnings.contains(&Category::MISSING_TITLE));
    assert!(issues.critical().is_empty());
    assert!(issues.successes().is_empty());
}

#[test]
fn test_code_output_images() {
    let described = Output::display_data(
        json!({"image/png": "iVBOR...", "text/markdown": "Line chart of monthly sales"})
            .as_object()
            .unwrap()
            .clone(),
    );
    let bare =
        Output::display_data(json!({"image/jpeg": "/9j/..."}).as_object().unwrap().clone());

    let nb = Notebook::with_cells(vec![
        Cell::markdown("# Sales\nMonthly figures."),
        Cell::code("plot(sales)").with_output(described),
        Cell::markdown("And the outliers:"),
        Cell::code("plot(outliers)").with_output(bare),
    ]);
    let issues = notebook_a11y::audit(&nb);

    assert_eq!(issues.critical().len(), 1);
    assert_eq!(issues.critical()[0].category(), Category::MISSING_ALT_TEXT);
    assert_eq!(issues.critical()[0].location(), Location::Cell(4));
    assert!(issues.categories(Severity::Success).contains(&Category::IMAGE_ALT_TEXT));
}

#[test]
fn test_well_formed_notebook_has_no_findings_to_fix() {
    let nb = Notebook::with_cells(vec![
        Cell::markdown("# Analysis\n\n## Data\n\n![Bar chart of revenue](revenue.png)"),
        Cell::code("import pandas as pd"),
        Cell::markdown(
            "## Results\n\n| Year | Revenue |\n| --- | --- |\n| 2024 | 10 |\n\n\
             See [the dataset documentation](https://data.gov/docs).",
        ),
        Cell::code("df.describe()"),
    ]);
    let issues = notebook_a11y::audit(&nb);

    assert!(issues.critical().is_empty(), "{:?}", issues.critical());
    assert!(issues.warnings().is_empty(), "{:?}", issues.warnings());
    let successes = issues.categories(Severity::Success);
    for category in [
        Category::IMAGE_ALT_TEXT,
        Category::HAS_TITLE,
        Category::TABLE_HEADER,
        Category::CODE_CELLS,
        Category::HAS_MARKDOWN,
        Category::LINK_TEXT,
    ] {
        assert!(successes.contains(&category), "missing {}", category);
    }
}

#[test]
fn test_custom_check_runs_after_defaults() {
    let mut auditor = Auditor::new();
    auditor.register(Arc::new(RawCellCheck));

    let nb = Notebook::with_cells(vec![Cell::markdown("# T"), Cell::raw("raw text")]);
    let issues = auditor.audit(&nb);

    let last = issues.warnings().last().unwrap();
    assert_eq!(last.category(), Category::new("RAW_CELL"));
    assert_eq!(last.location(), Location::Cell(2));
    assert_eq!(auditor.registry().names().last(), Some(&"raw-cells"));
}

#[test]
fn test_failing_check_is_isolated() {
    let mut registry = CheckRegistry::with_defaults();
    registry.register(Arc::new(BrokenCheck));
    let auditor = Auditor::new().with_registry(registry);

    let nb = Notebook::with_cells(vec![Cell::markdown("![](a.png)")]);
    let issues = auditor.audit(&nb);

    assert_eq!(issues.critical().len(), 1);
    assert_eq!(issues.diagnostics().len(), 1);
    assert_eq!(issues.diagnostics()[0].rule, "broken");
    assert_eq!(issues.diagnostics()[0].message, "cannot evaluate");
}

#[test]
fn test_skip_check_by_name() {
    let nb = Notebook::with_cells(vec![Cell::markdown("![](a.png)")]);
    let issues =
        notebook_a11y::audit_with_options(&nb, AuditOptions::new().skip_check("images"));
    assert!(issues.critical().is_empty());
}

#[test]
fn test_parallel_matches_sequential() {
    let nb = Notebook::with_cells(vec![
        Cell::markdown("## A\n![](x.png)\n<img src=\"y.png\">"),
        Cell::code("x = 1"),
        Cell::code("y = 2"),
        Cell::markdown("#### B\n| a |\n| 1 |\nSee the red bars at https://example.com"),
    ]);
    let parallel = notebook_a11y::audit_with_options(&nb, AuditOptions::new());
    let sequential = notebook_a11y::audit_with_options(&nb, AuditOptions::new().sequential());
    assert_eq!(parallel, sequential);
}
