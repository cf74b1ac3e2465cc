//! Color as the only carrier of meaning (WCAG 1.4.1).
//!
//! Real contrast ratios are out of reach without rendering; this check only
//! flags markup and prose that mention color.

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{FONT_COLOR, STYLE_COLOR};

const COLOR_KEYWORDS: &[&str] = &["red", "green", "blue", "yellow", "color", "colored"];

/// Phrases that point the reader at something by its color.
const COLOR_CUES: &[&str] = &["see the ", "shown in "];

/// Flags inline colors and prose that relies on color.
pub struct ColorCheck;

impl Check for ColorCheck {
    fn name(&self) -> &str {
        "color"
    }

    fn description(&self) -> &str {
        "Markdown does not rely on color alone to convey meaning"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for (idx, cell) in notebook.markdown_cells() {
            let location = Location::cell(idx);
            let source = cell.text();

            for _ in STYLE_COLOR.find_iter(&source) {
                issues.push(
                    Issue::warning(
                        Category::INLINE_COLOR_STYLE,
                        location,
                        "Inline style sets a text color",
                    )
                    .with_wcag(wcag::USE_OF_COLOR)
                    .with_remediation("Make sure the colored text is also marked by wording or emphasis"),
                );
            }

            for _ in FONT_COLOR.find_iter(&source) {
                issues.push(
                    Issue::warning(
                        Category::FONT_COLOR,
                        location,
                        "<font color> tag used to color text",
                    )
                    .with_wcag(wcag::USE_OF_COLOR)
                    .with_remediation("Replace <font color> with emphasis or a text label"),
                );
            }

            let lower = source.to_lowercase();
            let keyword = COLOR_KEYWORDS.iter().find(|kw| {
                COLOR_CUES
                    .iter()
                    .any(|cue| lower.contains(&format!("{}{}", cue, kw)))
            });
            if let Some(keyword) = keyword {
                issues.push(
                    Issue::warning(
                        Category::COLOR_ONLY,
                        location,
                        format!("Content may rely on color perception (\"{}\")", keyword),
                    )
                    .with_wcag(wcag::USE_OF_COLOR)
                    .with_remediation(
                        "Provide additional indicators beyond color (patterns, labels, text)",
                    ),
                );
            }
        }

        Ok(issues)
    }
}
