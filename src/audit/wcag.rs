//! WCAG 2.1 success criteria referenced by findings.

pub const NON_TEXT_CONTENT: &str = "WCAG 2.1 Level A - 1.1.1 Non-text Content";
pub const INFO_AND_RELATIONSHIPS: &str = "WCAG 2.1 Level A - 1.3.1 Info and Relationships";
pub const USE_OF_COLOR: &str = "WCAG 2.1 Level A - 1.4.1 Use of Color";
pub const PAGE_TITLED: &str = "WCAG 2.1 Level A - 2.4.2 Page Titled";
pub const LINK_PURPOSE: &str = "WCAG 2.1 Level A - 2.4.4 Link Purpose (In Context)";
pub const HEADINGS_AND_LABELS: &str = "WCAG 2.1 Level AA - 2.4.6 Headings and Labels";
pub const READING_LEVEL: &str = "WCAG 2.1 Level AAA - 3.1.5 Reading Level";
