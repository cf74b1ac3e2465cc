//! Automated remediation.
//!
//! A [`Fix`] rewrites notebook text to resolve one kind of finding. Fixes
//! are idempotent: running one on already-fixed content changes nothing and
//! logs nothing. The [`Remediator`] applies its fixes in order, each on a
//! scratch copy that is only committed when the fix succeeds.
//!
//! # Example
//!
//! ```no_run
//! use notebook_a11y::remediate::{Remediator, RemediateOptions};
//!
//! fn main() -> notebook_a11y::Result<()> {
//!     let mut nb = notebook_a11y::parse_file("analysis.ipynb")?;
//!     let remediator = Remediator::new()
//!         .with_options(RemediateOptions::new().with_title("Sales Analysis"));
//!     let report = remediator.remediate(&mut nb);
//!     for change in report.changes.iter() {
//!         println!("{}", change);
//!     }
//!     notebook_a11y::save_file(&nb, "analysis_accessible.ipynb")?;
//!     Ok(())
//! }
//! ```

mod alt_text;
mod options;
mod tables;
mod title;
mod urls;

pub use alt_text::AltTextFix;
pub use options::{RemediateOptions, DEFAULT_PLACEHOLDER, DEFAULT_TITLE, DESCRIPTION_PLACEHOLDER};
pub use tables::TableHeaderFix;
pub use title::TitleFix;
pub use urls::BareUrlFix;

use crate::audit::Diagnostic;
use crate::error::Result;
use crate::model::Notebook;
use serde::Serialize;
use std::sync::Arc;

/// Trait for remediation rules.
pub trait Fix: Send + Sync {
    /// Unique name of this fix (e.g., `"alt-text"`).
    fn name(&self) -> &str;

    /// Short description of what this fix rewrites.
    fn description(&self) -> &str;

    /// Rewrite the notebook, logging one entry per mutation.
    fn apply(
        &self,
        notebook: &mut Notebook,
        options: &RemediateOptions,
        changes: &mut ChangeLog,
    ) -> Result<()>;
}

/// Built-in fixes in application order.
pub fn default_fixes() -> Vec<Arc<dyn Fix>> {
    vec![
        Arc::new(AltTextFix),
        Arc::new(TitleFix),
        Arc::new(TableHeaderFix),
        Arc::new(BareUrlFix),
    ]
}

/// Ordered list of human-readable change descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog(Vec<String>);

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation.
    pub fn push(&mut self, change: impl Into<String>) {
        self.0.push(change.into());
    }

    /// Append all entries of another log.
    pub fn append(&mut self, other: ChangeLog) {
        self.0.extend(other.0);
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ChangeLog {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome of a remediation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemediationReport {
    /// Mutations that were committed
    pub changes: ChangeLog,
    /// Fixes that failed and were rolled back
    pub diagnostics: Vec<Diagnostic>,
}

impl RemediationReport {
    /// Check if any fix changed the notebook.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Applies fixes to notebooks.
pub struct Remediator {
    fixes: Vec<Arc<dyn Fix>>,
    options: RemediateOptions,
}

impl Remediator {
    /// Create a remediator with the built-in fixes.
    pub fn new() -> Self {
        Self {
            fixes: default_fixes(),
            options: RemediateOptions::default(),
        }
    }

    /// Create a remediator without any fixes.
    pub fn empty() -> Self {
        Self {
            fixes: Vec::new(),
            options: RemediateOptions::default(),
        }
    }

    /// Append a fix.
    pub fn with_fix(mut self, fix: Arc<dyn Fix>) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Set remediation options.
    pub fn with_options(mut self, options: RemediateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RemediateOptions {
        &self.options
    }

    /// Registered fixes, in application order.
    pub fn fixes(&self) -> &[Arc<dyn Fix>] {
        &self.fixes
    }

    /// Apply every fix in order.
    ///
    /// A failing fix leaves the notebook as the previous fixes left it and
    /// is recorded as a diagnostic.
    pub fn remediate(&self, notebook: &mut Notebook) -> RemediationReport {
        let mut report = RemediationReport::default();

        for fix in &self.fixes {
            if self.options.is_skipped(fix.name()) {
                continue;
            }

            let mut scratch = notebook.clone();
            let mut changes = ChangeLog::new();
            match fix.apply(&mut scratch, &self.options, &mut changes) {
                Ok(()) => {
                    log::debug!("Fix '{}' made {} changes", fix.name(), changes.len());
                    if !changes.is_empty() {
                        *notebook = scratch;
                        report.changes.append(changes);
                    }
                }
                Err(e) => {
                    log::warn!("Fix '{}' failed and was rolled back: {}", fix.name(), e);
                    report.diagnostics.push(Diagnostic::from_error(fix.name(), &e));
                }
            }
        }

        report
    }
}

impl Default for Remediator {
    fn default() -> Self {
        Self::new()
    }
}
