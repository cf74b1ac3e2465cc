//! Accessibility rule engine.
//!
//! A [`Check`] inspects a notebook and returns findings. Checks are kept in
//! an ordered [`CheckRegistry`]; the [`Auditor`] evaluates them and collects
//! the findings into an [`IssueSet`].
//!
//! # Example
//!
//! ```no_run
//! use notebook_a11y::audit::{Auditor, AuditOptions};
//!
//! fn main() -> notebook_a11y::Result<()> {
//!     let nb = notebook_a11y::parse_file("analysis.ipynb")?;
//!     let auditor = Auditor::new().with_options(AuditOptions::new().skip_check("color"));
//!     let issues = auditor.audit(&nb);
//!     println!("{}", issues.summary());
//!     Ok(())
//! }
//! ```

pub mod checks;
mod issue;
mod options;
pub mod wcag;

pub use issue::{Category, Diagnostic, Issue, IssueSet, Location, Severity, Summary};
pub use options::{AuditOptions, DEFAULT_MIN_DOCUMENTED_CODE_LEN};

use crate::error::Result;
use crate::model::Notebook;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Trait for accessibility checks.
///
/// Implement this trait to add a rule. A check must not mutate shared
/// state; it may run concurrently with other checks on the same notebook.
pub trait Check: Send + Sync {
    /// Unique name of this check (e.g., `"images"`).
    fn name(&self) -> &str;

    /// Short description of what this check inspects.
    fn description(&self) -> &str;

    /// Inspect the notebook and return findings in emission order.
    fn check(&self, notebook: &Notebook, options: &AuditOptions) -> Result<Vec<Issue>>;
}

/// Ordered registry of checks.
///
/// Evaluation follows registration order. Registering a check whose name
/// is already present replaces it in place.
pub struct CheckRegistry {
    checks: Vec<Arc<dyn Check>>,
    by_name: HashMap<String, usize>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the built-in checks.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for check in checks::defaults() {
            registry.register(check);
        }
        registry
    }

    /// Register a check.
    pub fn register(&mut self, check: Arc<dyn Check>) {
        let key = check.name().to_lowercase();
        match self.by_name.get(&key) {
            Some(&index) => self.checks[index] = check,
            None => {
                self.by_name.insert(key, self.checks.len());
                self.checks.push(check);
            }
        }
    }

    /// Get a check by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Check>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| self.checks[index].clone())
    }

    /// Check if a check with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Names of the registered checks, in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Registered checks, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Check>> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Evaluates registered checks against notebooks.
pub struct Auditor {
    registry: CheckRegistry,
    options: AuditOptions,
}

impl Auditor {
    /// Create an auditor with the built-in checks and default options.
    pub fn new() -> Self {
        Self {
            registry: CheckRegistry::with_defaults(),
            options: AuditOptions::default(),
        }
    }

    /// Use a custom registry.
    pub fn with_registry(mut self, registry: CheckRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set audit options.
    pub fn with_options(mut self, options: AuditOptions) -> Self {
        self.options = options;
        self
    }

    /// Register an additional check.
    pub fn register(&mut self, check: Arc<dyn Check>) {
        self.registry.register(check);
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    /// Audit a notebook.
    ///
    /// A failing check is recorded as a diagnostic; the others still run.
    /// Parallel and sequential evaluation produce the same result.
    pub fn audit(&self, notebook: &Notebook) -> IssueSet {
        let checks: Vec<&dyn Check> = self
            .registry
            .iter()
            .map(|c| &**c)
            .filter(|c| !self.options.is_skipped(c.name()))
            .collect();

        let outcomes: Vec<Result<Vec<Issue>>> = if self.options.parallel {
            checks
                .par_iter()
                .map(|check| self.run_check(*check, notebook))
                .collect()
        } else {
            checks
                .iter()
                .map(|check| self.run_check(*check, notebook))
                .collect()
        };

        let mut issues = Vec::new();
        let mut diagnostics = Vec::new();
        for (check, outcome) in checks.iter().zip(outcomes) {
            match outcome {
                Ok(found) => issues.extend(found),
                Err(e) => {
                    log::warn!("Check '{}' failed: {}", check.name(), e);
                    diagnostics.push(Diagnostic::from_error(check.name(), &e));
                }
            }
        }

        IssueSet::from_parts(issues, diagnostics)
    }

    fn run_check(&self, check: &dyn Check, notebook: &Notebook) -> Result<Vec<Issue>> {
        let start = Instant::now();
        let result = check.check(notebook, &self.options);
        log::debug!(
            "Check '{}' finished in {:?} ({} findings)",
            check.name(),
            start.elapsed(),
            result.as_ref().map(Vec::len).unwrap_or(0)
        );
        result
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}
