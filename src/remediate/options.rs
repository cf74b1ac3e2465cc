//! Remediation options and configuration.

/// Default alt text inserted for undescribed images.
pub const DEFAULT_PLACEHOLDER: &str = "Image description needed";

/// Title used when none is given and none can be derived.
pub const DEFAULT_TITLE: &str = "Untitled Notebook";

/// Body text of an inserted title cell.
pub const DESCRIPTION_PLACEHOLDER: &str = "Notebook description goes here.";

/// Options for remediating notebooks.
#[derive(Debug, Clone)]
pub struct RemediateOptions {
    /// Alt text inserted for images that have none
    pub placeholder: String,

    /// Title for notebooks that lack one
    pub title: Option<String>,

    /// Names of fixes to skip
    pub skip: Vec<String>,
}

impl RemediateOptions {
    /// Create new remediation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alt text placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the title inserted into untitled notebooks.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title only when none was chosen yet.
    pub fn with_default_title(mut self, title: Option<String>) -> Self {
        if self.title.is_none() {
            self.title = title;
        }
        self
    }

    /// Skip the named fix.
    pub fn skip_fix(mut self, name: impl Into<String>) -> Self {
        self.skip.push(name.into());
        self
    }

    /// Check whether the named fix is skipped.
    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip.iter().any(|s| s.eq_ignore_ascii_case(name))
    }

    /// The title to insert.
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }
}

impl Default for RemediateOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            title: None,
            skip: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remediate_options_builder() {
        let options = RemediateOptions::new()
            .with_placeholder("Describe this figure")
            .with_title("Sales Analysis")
            .skip_fix("bare-urls");

        assert_eq!(options.placeholder, "Describe this figure");
        assert_eq!(options.title(), "Sales Analysis");
        assert!(options.is_skipped("BARE-URLS"));
    }

    #[test]
    fn test_title_fallbacks() {
        assert_eq!(RemediateOptions::default().title(), DEFAULT_TITLE);
        assert_eq!(RemediateOptions::new().with_title("  ").title(), DEFAULT_TITLE);

        let options = RemediateOptions::new()
            .with_title("Chosen")
            .with_default_title(Some("Derived".to_string()));
        assert_eq!(options.title(), "Chosen");

        let options = RemediateOptions::new().with_default_title(Some("Derived".to_string()));
        assert_eq!(options.title(), "Derived");
    }
}
