//! Placeholder alt text for undescribed images.

use super::{ChangeLog, Fix, RemediateOptions, DEFAULT_PLACEHOLDER};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{alt_attribute, ALT_ATTRIBUTE, HTML_IMG, MARKDOWN_IMAGE};
use regex::Captures;

/// Fills in missing alt text of markdown and HTML images.
pub struct AltTextFix;

impl Fix for AltTextFix {
    fn name(&self) -> &str {
        "alt-text"
    }

    fn description(&self) -> &str {
        "Insert placeholder alt text for images that have none"
    }

    fn apply(
        &self,
        notebook: &mut Notebook,
        options: &RemediateOptions,
        changes: &mut ChangeLog,
    ) -> Result<()> {
        let placeholder = match options.placeholder.trim() {
            "" => DEFAULT_PLACEHOLDER,
            p => p,
        };
        let attribute_value = placeholder.replace('"', "&quot;");

        for (idx, cell) in notebook.cells.iter_mut().enumerate() {
            if !cell.is_markdown() {
                continue;
            }
            let number = idx + 1;
            let source = cell.text().into_owned();

            let mut markdown_fixed = 0;
            let rewritten = MARKDOWN_IMAGE.replace_all(&source, |caps: &Captures| {
                if caps[1].trim().is_empty() {
                    markdown_fixed += 1;
                    format!("![{}]({})", placeholder, caps[2].trim())
                } else {
                    caps[0].to_string()
                }
            });

            let mut added = 0;
            let mut filled = 0;
            let rewritten = HTML_IMG.replace_all(&rewritten, |caps: &Captures| {
                let tag = &caps[0];
                match alt_attribute(tag) {
                    None => {
                        added += 1;
                        format!("{} alt=\"{}\"{}", &tag[..4], attribute_value, &tag[4..])
                    }
                    Some(alt) if alt.trim().is_empty() => {
                        filled += 1;
                        ALT_ATTRIBUTE
                            .replace(tag, |attr: &Captures| {
                                format!("{}alt=\"{}\"", &attr[1], attribute_value)
                            })
                            .into_owned()
                    }
                    Some(_) => tag.to_string(),
                }
            });

            if markdown_fixed + added + filled == 0 {
                continue;
            }
            cell.source.set_text(&rewritten);

            for _ in 0..markdown_fixed {
                changes.push(format!("Added placeholder alt text to image in cell {}", number));
            }
            for _ in 0..added {
                changes.push(format!("Added alt attribute to HTML image in cell {}", number));
            }
            for _ in 0..filled {
                changes.push(format!("Filled empty alt attribute in cell {}", number));
            }
        }

        Ok(())
    }
}
