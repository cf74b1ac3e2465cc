//! Audit options and configuration.

/// Default length above which an uncommented code cell is flagged.
pub const DEFAULT_MIN_DOCUMENTED_CODE_LEN: usize = 200;

/// Options for auditing notebooks.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Whether to evaluate checks in parallel
    pub parallel: bool,

    /// Trimmed code length above which a cell needs a comment
    pub min_documented_code_len: usize,

    /// Names of checks to skip
    pub skip: Vec<String>,
}

impl AuditOptions {
    /// Create new audit options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel evaluation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the code length above which a cell needs a comment.
    pub fn with_min_documented_code_len(mut self, len: usize) -> Self {
        self.min_documented_code_len = len;
        self
    }

    /// Skip the named check.
    pub fn skip_check(mut self, name: impl Into<String>) -> Self {
        self.skip.push(name.into());
        self
    }

    /// Check whether the named check is skipped.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            min_documented_code_len: DEFAULT_MIN_DOCUMENTED_CODE_LEN,
            skip: Vec::new(),
        }
    }
}
