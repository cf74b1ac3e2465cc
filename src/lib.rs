//! # notebook-a11y
//!
//! Accessibility auditing and remediation for Jupyter notebooks.
//!
//! This library checks `.ipynb` documents against a catalogue of
//! accessibility rules derived from WCAG 2.1, reports the findings as text,
//! Markdown, HTML or JSON, and rewrites notebooks to fix the problems that
//! can be fixed mechanically.
//!
//! ## Quick Start
//!
//! ```no_run
//! use notebook_a11y::{audit, parse_file, render};
//!
//! fn main() -> notebook_a11y::Result<()> {
//!     // Load a notebook
//!     let nb = parse_file("analysis.ipynb")?;
//!
//!     // Run every check
//!     let issues = audit(&nb);
//!
//!     // Print a text report
//!     let options = render::ReportOptions::new().with_notebook_name("analysis.ipynb");
//!     let report = render::render(&issues, render::ReportFormat::Text, &options)?;
//!     println!("{}", report);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Open rule set**: images, headings, tables, code, structure, color, links
//! - **Idempotent fixes**: alt text, titles, table headers, bare URLs
//! - **Lossless I/O**: unknown notebook keys survive a load/save cycle
//! - **Fault isolation**: a failing rule never blanks out the rest of the audit
//! - **Parallel checks**: uses Rayon to evaluate independent rules

pub mod audit;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
mod patterns;
pub mod remediate;
pub mod render;

// Re-export commonly used types
pub use audit::{
    AuditOptions, Auditor, Category, Check, CheckRegistry, Diagnostic, Issue, IssueSet, Location,
    Severity, Summary,
};
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_notebook_path, NotebookFormat,
};
pub use error::{Error, Result};
pub use model::{Cell, CellKind, Notebook, Output, Source};
pub use parser::{save_file, to_bytes, ErrorMode, NotebookParser, ParseOptions};
pub use remediate::{ChangeLog, Fix, RemediateOptions, RemediationReport, Remediator};
pub use render::{JsonFormat, ReportFormat, ReportOptions};

use std::io::Read;
use std::path::Path;

/// Parse a notebook file.
///
/// # Arguments
///
/// * `path` - Path to the `.ipynb` file
///
/// # Example
///
/// ```no_run
/// use notebook_a11y::parse_file;
///
/// let nb = parse_file("analysis.ipynb").unwrap();
/// println!("Cells: {}", nb.cell_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    NotebookParser::open(path)?.parse()
}

/// Parse a notebook file with custom options.
///
/// # Example
///
/// ```no_run
/// use notebook_a11y::{parse_file_with_options, ParseOptions};
///
/// let nb = parse_file_with_options("broken.ipynb", ParseOptions::new().lenient()).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Notebook> {
    NotebookParser::open_with_options(path, options)?.parse()
}

/// Parse a notebook from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Notebook> {
    NotebookParser::from_bytes(data)?.parse()
}

/// Parse a notebook from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Notebook> {
    NotebookParser::from_bytes_with_options(data, options)?.parse()
}

/// Parse a notebook from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Notebook> {
    NotebookParser::from_reader(reader)?.parse()
}

/// Parse a notebook file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let path = path.as_ref();
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| Error::file(path, e))?;
    parse_bytes(&data)
}

/// Audit a notebook with every built-in check.
pub fn audit(notebook: &Notebook) -> IssueSet {
    Auditor::new().audit(notebook)
}

/// Audit a notebook with custom options.
pub fn audit_with_options(notebook: &Notebook, options: AuditOptions) -> IssueSet {
    Auditor::new().with_options(options).audit(notebook)
}

/// Load and audit a notebook file.
///
/// A notebook that cannot be loaded yields a single CRITICAL
/// [`Category::FILE_ERROR`] finding instead of an error.
///
/// # Example
///
/// ```no_run
/// let issues = notebook_a11y::audit_file("analysis.ipynb");
/// if issues.has_critical() {
///     std::process::exit(1);
/// }
/// ```
pub fn audit_file<P: AsRef<Path>>(path: P) -> IssueSet {
    let path = path.as_ref();
    match parse_file(path) {
        Ok(notebook) => audit(&notebook),
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            IssueSet::file_error(path, &e)
        }
    }
}

/// Apply every built-in fix to a notebook.
pub fn remediate(notebook: &mut Notebook) -> RemediationReport {
    Remediator::new().remediate(notebook)
}

/// Apply every built-in fix with custom options.
pub fn remediate_with_options(
    notebook: &mut Notebook,
    options: RemediateOptions,
) -> RemediationReport {
    Remediator::new().with_options(options).remediate(notebook)
}

/// Load a notebook, fix it and save the result.
///
/// Untitled notebooks get a title derived from the input file name.
///
/// # Example
///
/// ```no_run
/// let report = notebook_a11y::remediate_file("sales_report.ipynb", "sales_report_accessible.ipynb")?;
/// println!("{} changes", report.changes.len());
/// # Ok::<(), notebook_a11y::Error>(())
/// ```
pub fn remediate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<RemediationReport> {
    let input = input.as_ref();
    let mut notebook = parse_file(input)?;
    let options = RemediateOptions::new().with_default_title(title_from_path(input));
    let report = remediate_with_options(&mut notebook, options);
    save_file(&notebook, output)?;
    Ok(report)
}

/// Human-readable title derived from a file name, e.g. `Sales Report`.
pub fn title_from_path<P: AsRef<Path>>(path: P) -> Option<String> {
    let stem = path.as_ref().file_stem()?.to_str()?;
    patterns::humanize(stem)
}

/// Builder for auditing and fixing notebooks.
///
/// # Example
///
/// ```no_run
/// use notebook_a11y::{NotebookA11y, ReportFormat};
///
/// let mut loaded = NotebookA11y::new()
///     .sequential()
///     .skip_check("color")
///     .with_placeholder("Figure description pending")
///     .lenient()
///     .load("analysis.ipynb")?;
///
/// println!("{}", loaded.report(ReportFormat::Markdown)?);
/// loaded.remediate();
/// loaded.save("analysis_accessible.ipynb")?;
/// # Ok::<(), notebook_a11y::Error>(())
/// ```
pub struct NotebookA11y {
    parse_options: ParseOptions,
    audit_options: AuditOptions,
    remediate_options: RemediateOptions,
    report_options: ReportOptions,
}

impl NotebookA11y {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            audit_options: AuditOptions::default(),
            remediate_options: RemediateOptions::default(),
            report_options: ReportOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel check evaluation.
    pub fn sequential(mut self) -> Self {
        self.audit_options = self.audit_options.sequential();
        self
    }

    /// Skip a check by name.
    pub fn skip_check(mut self, name: impl Into<String>) -> Self {
        self.audit_options = self.audit_options.skip_check(name);
        self
    }

    /// Skip a fix by name.
    pub fn skip_fix(mut self, name: impl Into<String>) -> Self {
        self.remediate_options = self.remediate_options.skip_fix(name);
        self
    }

    /// Set the alt text placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.remediate_options = self.remediate_options.with_placeholder(placeholder);
        self
    }

    /// Set the title inserted into untitled notebooks.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.remediate_options = self.remediate_options.with_title(title);
        self
    }

    /// Omit passed checks from reports.
    pub fn without_successes(mut self) -> Self {
        self.report_options = self.report_options.with_successes(false);
        self
    }

    /// Load a notebook file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<LoadedNotebook> {
        let path = path.as_ref();
        let notebook =
            NotebookParser::open_with_options(path, self.parse_options.clone())?.parse()?;

        let mut loaded = self.finish(notebook);
        loaded.remediate_options = loaded
            .remediate_options
            .with_default_title(title_from_path(path));
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            loaded.report_options = loaded.report_options.with_notebook_name(name);
        }
        Ok(loaded)
    }

    /// Load a notebook from bytes.
    pub fn load_bytes(self, data: &[u8]) -> Result<LoadedNotebook> {
        let notebook =
            NotebookParser::from_bytes_with_options(data, self.parse_options.clone())?.parse()?;
        Ok(self.finish(notebook))
    }

    fn finish(self, notebook: Notebook) -> LoadedNotebook {
        LoadedNotebook {
            notebook,
            audit_options: self.audit_options,
            remediate_options: self.remediate_options,
            report_options: self.report_options,
        }
    }
}

impl Default for NotebookA11y {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded notebook with the options it was loaded with.
pub struct LoadedNotebook {
    notebook: Notebook,
    audit_options: AuditOptions,
    remediate_options: RemediateOptions,
    report_options: ReportOptions,
}

impl LoadedNotebook {
    /// Audit the notebook in its current state.
    pub fn audit(&self) -> IssueSet {
        audit_with_options(&self.notebook, self.audit_options.clone())
    }

    /// Audit the notebook and render the findings.
    pub fn report(&self, format: ReportFormat) -> Result<String> {
        render::render(&self.audit(), format, &self.report_options)
    }

    /// Apply every fix that is not skipped.
    pub fn remediate(&mut self) -> RemediationReport {
        Remediator::new()
            .with_options(self.remediate_options.clone())
            .remediate(&mut self.notebook)
    }

    /// Save the notebook.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_file(&self.notebook, path)
    }

    /// Get the notebook.
    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    /// Take the notebook.
    pub fn into_notebook(self) -> Notebook {
        self.notebook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNTITLED: &[u8] = br#"{
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": ["![](plot.png)\n"]},
            {"cell_type": "code", "execution_count": null, "metadata": {}, "outputs": [], "source": "x = 1"}
        ],
        "metadata": {},
        "nbformat": 4,
        "nbformat_minor": 5
    }"#;

    #[test]
    fn test_builder_options() {
        let builder = NotebookA11y::new()
            .lenient()
            .sequential()
            .skip_check("color")
            .skip_fix("bare-urls")
            .with_placeholder("Describe")
            .with_title("Report")
            .without_successes();

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(!builder.audit_options.parallel);
        assert!(builder.audit_options.is_skipped("color"));
        assert!(builder.remediate_options.is_skipped("bare-urls"));
        assert_eq!(builder.remediate_options.placeholder, "Describe");
        assert_eq!(builder.remediate_options.title(), "Report");
        assert!(!builder.report_options.include_successes);
    }

    #[test]
    fn test_loaded_notebook_cycle() {
        let mut loaded = NotebookA11y::new().load_bytes(UNTITLED).unwrap();
        assert!(loaded.audit().has_critical());

        let report = loaded.remediate();
        assert!(report.has_changes());
        assert!(!loaded.audit().has_critical());
        assert!(loaded.notebook().cells[0].text().starts_with("# Untitled Notebook\n"));
    }

    #[test]
    fn test_parse_bytes_rejects_non_notebooks() {
        assert!(parse_bytes(b"").is_err());
        assert!(parse_bytes(b"[1, 2, 3]").is_err());
        assert!(matches!(parse_bytes(b"{\"nbformat\": 4}"), Err(Error::Format(_))));
    }

    #[test]
    fn test_audit_file_missing() {
        let issues = audit_file("definitely/not/here.ipynb");
        assert_eq!(issues.summary().total(), 1);
        assert_eq!(issues.critical()[0].category(), Category::FILE_ERROR);
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(
            title_from_path("data/sales_report-2024.ipynb").as_deref(),
            Some("Sales Report 2024")
        );
        assert_eq!(title_from_path("___.ipynb"), None);
    }
}
