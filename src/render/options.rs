//! Report options and configuration.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

use super::JsonFormat;

/// Options for rendering audit reports.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Name of the audited notebook shown in the report header
    pub notebook_name: Option<String>,

    /// List passed checks
    pub include_successes: bool,

    /// JSON indentation style
    pub json_format: JsonFormat,

    /// Stamp JSON reports with the generation time
    pub timestamp: bool,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the notebook name.
    pub fn with_notebook_name(mut self, name: impl Into<String>) -> Self {
        self.notebook_name = Some(name.into());
        self
    }

    /// Include or omit passed checks.
    pub fn with_successes(mut self, include: bool) -> Self {
        self.include_successes = include;
        self
    }

    /// Set the JSON indentation style.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Enable or disable the JSON timestamp.
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Notebook name, or a generic label.
    pub fn notebook_label(&self) -> &str {
        self.notebook_name.as_deref().unwrap_or("notebook")
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            notebook_name: None,
            include_successes: true,
            json_format: JsonFormat::default(),
            timestamp: true,
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportFormat {
    /// Plain text
    #[default]
    Text,
    /// Markdown document
    Markdown,
    /// Standalone HTML page
    Html,
    /// Structured JSON
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [
        ReportFormat::Text,
        ReportFormat::Markdown,
        ReportFormat::Html,
        ReportFormat::Json,
    ];

    /// Lowercase format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }

    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" | "htm" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Other(format!("Unknown report format: {}", other))),
        }
    }
}
