//! Audit findings and their severity-indexed collection.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::error::Error;

/// Severity of an audit finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must fix
    Critical,
    /// Should fix
    Warning,
    /// Passed check
    Success,
}

impl Severity {
    /// All severities in report order.
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Success];

    /// Lowercase identifier used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Success => write!(f, "SUCCESS"),
        }
    }
}

/// Stable identifier of a finding type.
///
/// Built-in categories are associated constants. Custom checks declare
/// their own with [`Category::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(&'static str);

impl Category {
    /// Notebook could not be loaded.
    pub const FILE_ERROR: Category = Category("FILE_ERROR");
    /// Image without a text alternative.
    pub const MISSING_ALT_TEXT: Category = Category("MISSING_ALT_TEXT");
    /// `<img>` tag without an `alt` attribute.
    pub const MISSING_ALT_ATTRIBUTE: Category = Category("MISSING_ALT_ATTRIBUTE");
    /// `<img>` tag with a blank `alt` attribute.
    pub const EMPTY_ALT_TEXT: Category = Category("EMPTY_ALT_TEXT");
    /// Image with a text alternative.
    pub const IMAGE_ALT_TEXT: Category = Category("IMAGE_ALT_TEXT");
    /// Notebook contains no images.
    pub const NO_IMAGES: Category = Category("NO_IMAGES");
    /// No level-1 heading.
    pub const MISSING_TITLE: Category = Category("MISSING_TITLE");
    /// A level-1 heading exists.
    pub const HAS_TITLE: Category = Category("HAS_TITLE");
    /// First heading is not level 1.
    pub const FIRST_HEADING_LEVEL: Category = Category("FIRST_HEADING_LEVEL");
    /// Heading levels skip forward.
    pub const HEADING_HIERARCHY: Category = Category("HEADING_HIERARCHY");
    /// Markdown table with a header separator.
    pub const TABLE_HEADER: Category = Category("TABLE_HEADER");
    /// Markdown table without a header separator.
    pub const TABLE_NO_HEADER: Category = Category("TABLE_NO_HEADER");
    /// HTML table with header cells.
    pub const HTML_TABLE_HEADER: Category = Category("HTML_TABLE_HEADER");
    /// HTML table without header cells.
    pub const HTML_TABLE_NO_HEADER: Category = Category("HTML_TABLE_NO_HEADER");
    /// HTML table header cells without `scope`.
    pub const TABLE_SCOPE: Category = Category("TABLE_SCOPE");
    /// HTML table output with header cells.
    pub const OUTPUT_TABLE_HEADER: Category = Category("OUTPUT_TABLE_HEADER");
    /// HTML table output without header cells.
    pub const OUTPUT_TABLE_NO_HEADER: Category = Category("OUTPUT_TABLE_NO_HEADER");
    /// Link with descriptive text.
    pub const LINK_TEXT: Category = Category("LINK_TEXT");
    /// Link whose text does not describe its target.
    pub const NON_DESCRIPTIVE_LINK: Category = Category("Non-descriptive Link Text");
    /// URL pasted outside link syntax.
    pub const BARE_URL: Category = Category("Bare URL");
    /// Inline CSS color.
    pub const INLINE_COLOR_STYLE: Category = Category("INLINE_COLOR_STYLE");
    /// `<font color>` tag.
    pub const FONT_COLOR: Category = Category("FONT_COLOR");
    /// Prose that relies on color to convey meaning.
    pub const COLOR_ONLY: Category = Category("COLOR_ONLY");
    /// Plot that may encode data by color alone.
    pub const PLOT_COLOR: Category = Category("PLOT_COLOR");
    /// Chart with a nearby markdown description.
    pub const CHART_DESCRIBED: Category = Category("CHART_DESCRIBED");
    /// Chart without a nearby markdown description.
    pub const CHART_DESCRIPTION: Category = Category("CHART_DESCRIPTION");
    /// Notebook has code cells.
    pub const CODE_CELLS: Category = Category("CODE_CELLS");
    /// Consecutive code cells without explanation.
    pub const CODE_CONTEXT: Category = Category("CODE_CONTEXT");
    /// Long code cell without comments.
    pub const CODE_COMMENTS: Category = Category("CODE_COMMENTS");
    /// Notebook has no markdown cells.
    pub const NO_MARKDOWN: Category = Category("NO_MARKDOWN");
    /// Notebook has markdown cells.
    pub const HAS_MARKDOWN: Category = Category("HAS_MARKDOWN");

    /// Declare a custom category.
    pub const fn new(id: &'static str) -> Self {
        Category(id)
    }

    /// The identifier string.
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// Where a finding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// The notebook as a whole
    Document,
    /// A cell, numbered from 1
    Cell(usize),
}

impl Location {
    /// Location of the cell at a 0-based index.
    pub fn cell(index: usize) -> Self {
        Location::Cell(index + 1)
    }

    /// The 0-based cell index, if this is a cell location.
    pub fn cell_index(&self) -> Option<usize> {
        match self {
            Location::Document => None,
            Location::Cell(n) => Some(n - 1),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Document => write!(f, "Global"),
            Location::Cell(n) => write!(f, "Cell {}", n),
        }
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    category: Category,
    severity: Severity,
    location: Location,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    wcag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remediation: Option<String>,
}

impl Issue {
    /// Create a new finding.
    pub fn new(
        category: Category,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity,
            location,
            message: message.into(),
            wcag: None,
            remediation: None,
        }
    }

    /// Create a CRITICAL finding.
    pub fn critical(category: Category, location: Location, message: impl Into<String>) -> Self {
        Self::new(category, Severity::Critical, location, message)
    }

    /// Create a WARNING finding.
    pub fn warning(category: Category, location: Location, message: impl Into<String>) -> Self {
        Self::new(category, Severity::Warning, location, message)
    }

    /// Create a SUCCESS finding.
    pub fn success(category: Category, location: Location, message: impl Into<String>) -> Self {
        Self::new(category, Severity::Success, location, message)
    }

    /// Attach the WCAG criterion this finding relates to.
    pub fn with_wcag(mut self, wcag: impl Into<String>) -> Self {
        self.wcag = Some(wcag.into());
        self
    }

    /// Attach a fix hint.
    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn wcag(&self) -> Option<&str> {
        self.wcag.as_deref()
    }

    pub fn remediation(&self) -> Option<&str> {
        self.remediation.as_deref()
    }
}

/// A check or fix that failed while the rest of the run continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the failed check or fix
    pub rule: String,
    /// Failure description
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from a rule name and its error.
    pub fn from_error(rule: impl Into<String>, err: &Error) -> Self {
        let message = match err {
            Error::RuleEvaluation { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self {
            rule: rule.into(),
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Count of findings per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub critical: usize,
    pub warning: usize,
    pub success: usize,
}

impl Summary {
    /// Total number of findings.
    pub fn total(&self) -> usize {
        self.critical + self.warning + self.success
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} critical, {} warnings, {} passed",
            self.critical, self.warning, self.success
        )
    }
}

/// Findings of one audit run, grouped by severity in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueSet {
    critical: Vec<Issue>,
    warning: Vec<Issue>,
    success: Vec<Issue>,
    diagnostics: Vec<Diagnostic>,
}

impl IssueSet {
    /// Partition findings by severity, keeping their order.
    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut set = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => set.critical.push(issue),
                Severity::Warning => set.warning.push(issue),
                Severity::Success => set.success.push(issue),
            }
        }
        set
    }

    /// Partition findings and attach the diagnostics of failed checks.
    pub fn from_parts(
        issues: impl IntoIterator<Item = Issue>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            diagnostics,
            ..Self::from_issues(issues)
        }
    }

    /// The result of auditing a notebook that could not be loaded.
    pub fn file_error(path: &Path, err: &Error) -> Self {
        let issue = Issue::critical(
            Category::FILE_ERROR,
            Location::Document,
            format!("Could not load notebook '{}': {}", path.display(), err),
        )
        .with_remediation("Check that the file exists and is a valid Jupyter notebook");
        Self::from_issues([issue])
    }

    /// Findings of the given severity.
    pub fn get(&self, severity: Severity) -> &[Issue] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::Warning => &self.warning,
            Severity::Success => &self.success,
        }
    }

    pub fn critical(&self) -> &[Issue] {
        &self.critical
    }

    pub fn warnings(&self) -> &[Issue] {
        &self.warning
    }

    pub fn successes(&self) -> &[Issue] {
        &self.success
    }

    /// Number of findings of the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.get(severity).len()
    }

    /// Counts per severity.
    pub fn summary(&self) -> Summary {
        Summary {
            critical: self.critical.len(),
            warning: self.warning.len(),
            success: self.success.len(),
        }
    }

    /// Check if any CRITICAL finding exists.
    pub fn has_critical(&self) -> bool {
        !self.critical.is_empty()
    }

    /// All findings: critical, then warning, then success.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.critical
            .iter()
            .chain(&self.warning)
            .chain(&self.success)
    }

    /// Categories of the findings of one severity, in order.
    pub fn categories(&self, severity: Severity) -> Vec<Category> {
        self.get(severity).iter().map(Issue::category).collect()
    }

    /// Failures of individual checks.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
