//! Integration tests for loading and saving notebooks.

use std::fs;

use notebook_a11y::model::Source;
use notebook_a11y::{
    parse_bytes, parse_bytes_with_options, parse_file, save_file, to_bytes, Category, Error,
    Location, NotebookA11y, ParseOptions, ReportFormat, Severity,
};
use serde_json::Value;
use tempfile::tempdir;

const NOTEBOOK: &str = r###"{
 "cells": [
  {
   "cell_type": "markdown",
   "id": "a1",
   "metadata": {"tags": ["intro"]},
   "source": ["## Results\n", "![](plot.png)\n"]
  },
  {
   "cell_type": "code",
   "execution_count": 3,
   "id": "b2",
   "metadata": {},
   "outputs": [
    {
     "data": {"text/plain": ["42"]},
     "execution_count": 3,
     "metadata": {},
     "output_type": "execute_result"
    }
   ],
   "source": "answer = 42\nanswer"
  }
 ],
 "metadata": {
  "kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"}
 },
 "nbformat": 4,
 "nbformat_minor": 5
}
"###;

#[test]
fn test_round_trip_keeps_unknown_fields() {
    let nb = parse_bytes(NOTEBOOK.as_bytes()).unwrap();
    let saved = to_bytes(&nb).unwrap();

    let original: Value = serde_json::from_str(NOTEBOOK).unwrap();
    let written: Value = serde_json::from_slice(&saved).unwrap();
    assert_eq!(original, written);
    assert!(saved.ends_with(b"\n"));
}

#[test]
fn test_source_spelling_survives() {
    let nb = parse_bytes(NOTEBOOK.as_bytes()).unwrap();
    assert!(matches!(nb.cells[0].source, Source::Lines(_)));
    assert!(matches!(nb.cells[1].source, Source::Text(_)));
}

#[test]
fn test_remediate_file_writes_accessible_copy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sales_report.ipynb");
    let output = dir.path().join("sales_report_accessible.ipynb");
    fs::write(&input, NOTEBOOK).unwrap();

    let report = notebook_a11y::remediate_file(&input, &output).unwrap();
    assert!(report.has_changes());

    let fixed = parse_file(&output).unwrap();
    assert_eq!(
        fixed.cells[0].text(),
        "# Sales Report\n\n## Results\n![Image description needed](plot.png)\n"
    );
    assert_eq!(fixed.cells[1], parse_file(&input).unwrap().cells[1]);
    assert!(!notebook_a11y::audit(&fixed).has_critical());
}

#[test]
fn test_builder_load_and_save() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.ipynb");
    fs::write(&input, NOTEBOOK).unwrap();

    let mut loaded = NotebookA11y::new().with_title("Field Notes").load(&input).unwrap();
    let before = loaded.report(ReportFormat::Text).unwrap();
    assert!(before.contains("Notebook: notes.ipynb"));
    assert!(before.contains("MISSING_ALT_TEXT"));

    loaded.remediate();
    let out = dir.path().join("out.ipynb");
    loaded.save(&out).unwrap();
    assert!(parse_file(&out).unwrap().cells[0]
        .text()
        .starts_with("# Field Notes\n"));
}

#[test]
fn test_missing_file_is_file_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.ipynb");

    let err = parse_file(&missing).unwrap_err();
    assert!(matches!(err, Error::File { .. }));

    let issues = notebook_a11y::audit_file(&missing);
    assert_eq!(issues.critical().len(), 1);
    assert_eq!(issues.critical()[0].category(), Category::FILE_ERROR);
    assert!(issues.warnings().is_empty() && issues.successes().is_empty());
}

#[test]
fn test_invalid_json_is_file_error_set() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.ipynb");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(parse_file(&path), Err(Error::Format(_))));
    let issues = notebook_a11y::audit_file(&path);
    assert_eq!(issues.critical()[0].category(), Category::FILE_ERROR);
}

#[test]
fn test_lenient_skips_malformed_cells() {
    let data = br##"{"cells": [{"source": "no type"}, {"cell_type": "markdown", "source": "# Ok"}], "nbformat": 4}"##;

    assert!(matches!(parse_bytes(data), Err(Error::Format(_))));

    let nb = parse_bytes_with_options(data, ParseOptions::new().lenient()).unwrap();
    assert_eq!(nb.cell_count(), 1);
    assert!(nb.cells[0].is_markdown());
}

#[test]
fn test_mistyped_cell_values_do_not_block_the_audit() {
    let data = br##"{
 "cells": [
  {"cell_type": "markdown", "metadata": {}, "source": {"a": 1}},
  {"cell_type": "code", "metadata": {}, "source": "plot()",
   "outputs": [{"output_type": "display_data", "data": [], "metadata": {}}]},
  {"cell_type": "markdown", "metadata": {}, "source": "# Title\n![](x.png)"}
 ],
 "metadata": {},
 "nbformat": 4,
 "nbformat_minor": 5
}"##;

    let nb = parse_bytes(data).unwrap();
    assert_eq!(nb.cell_count(), 3);
    assert_eq!(nb.cells[0].text(), r#"{"a":1}"#);

    let issues = notebook_a11y::audit(&nb);
    assert_eq!(issues.categories(Severity::Critical), vec![Category::MISSING_ALT_TEXT]);
    assert_eq!(issues.critical()[0].location(), Location::Cell(3));

    let saved: Value = serde_json::from_slice(&to_bytes(&nb).unwrap()).unwrap();
    assert_eq!(saved["cells"][1]["outputs"][0]["data"], serde_json::json!([]));
}

#[test]
fn test_save_to_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let nb = parse_bytes(NOTEBOOK.as_bytes()).unwrap();
    let err = save_file(&nb, dir.path().join("missing").join("out.ipynb")).unwrap_err();
    assert!(matches!(err, Error::File { .. }));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_parse_file_async() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("async.ipynb");
    fs::write(&path, NOTEBOOK).unwrap();

    let nb = notebook_a11y::parse_file_async(&path).await.unwrap();
    assert_eq!(nb.cell_count(), 2);
}
