//! Text alternatives for images (WCAG 1.1.1).

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::{Cell, Notebook};
use crate::patterns::{alt_attribute, HTML_IMG, MARKDOWN_IMAGE};

/// Finds images without a text alternative.
///
/// Covers markdown images, HTML `<img>` tags and image outputs of code
/// cells. A blank alt attribute counts as missing; notebooks are not
/// expected to contain decorative images.
pub struct ImageCheck;

impl Check for ImageCheck {
    fn name(&self) -> &str {
        "images"
    }

    fn description(&self) -> &str {
        "Images in markdown and cell outputs have alt text"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();
        let mut images_found = 0;

        for (idx, cell) in notebook.cells().iter().enumerate() {
            let location = Location::cell(idx);
            if cell.is_markdown() {
                images_found += markdown_images(cell, location, &mut issues);
            } else if cell.is_code() {
                images_found += output_images(cell, location, &mut issues);
            }
        }

        if images_found == 0 && !notebook.is_empty() {
            issues.push(Issue::success(
                Category::NO_IMAGES,
                Location::Document,
                "No images found in notebook",
            ));
        }

        Ok(issues)
    }
}

fn markdown_images(cell: &Cell, location: Location, issues: &mut Vec<Issue>) -> usize {
    let source = cell.text();
    let mut found = 0;

    for caps in MARKDOWN_IMAGE.captures_iter(&source) {
        found += 1;
        let alt = caps.get(1).map_or("", |m| m.as_str()).trim();
        if alt.is_empty() {
            issues.push(
                Issue::critical(
                    Category::MISSING_ALT_TEXT,
                    location,
                    "Image is missing alt text description",
                )
                .with_wcag(wcag::NON_TEXT_CONTENT)
                .with_remediation(
                    "Add descriptive alt text in square brackets: ![description](image.png)",
                ),
            );
        } else {
            issues.push(Issue::success(
                Category::IMAGE_ALT_TEXT,
                location,
                format!("Image has alt text: \"{}\"", alt),
            ));
        }
    }

    for tag in HTML_IMG.find_iter(&source) {
        found += 1;
        match alt_attribute(tag.as_str()).map(str::trim) {
            None => issues.push(
                Issue::critical(
                    Category::MISSING_ALT_ATTRIBUTE,
                    location,
                    "HTML image is missing alt attribute",
                )
                .with_wcag(wcag::NON_TEXT_CONTENT)
                .with_remediation("Add alt attribute to img tag: <img src=\"...\" alt=\"description\">"),
            ),
            Some("") => issues.push(
                Issue::critical(
                    Category::EMPTY_ALT_TEXT,
                    location,
                    "HTML image has empty alt attribute",
                )
                .with_wcag(wcag::NON_TEXT_CONTENT)
                .with_remediation(
                    "Add descriptive text to alt attribute: <img src=\"...\" alt=\"description\">",
                ),
            ),
            Some(alt) => issues.push(Issue::success(
                Category::IMAGE_ALT_TEXT,
                location,
                format!("HTML image has alt text: \"{}\"", alt),
            )),
        }
    }

    found
}

fn output_images(cell: &Cell, location: Location, issues: &mut Vec<Issue>) -> usize {
    let mut found = 0;

    for output in cell.outputs().iter().filter(|o| o.has_image()) {
        found += 1;
        let mime = output.image_mime_types().join(", ");
        match output.text_description() {
            Some(_) => issues.push(Issue::success(
                Category::IMAGE_ALT_TEXT,
                location,
                format!("Output image ({}) has a text description", mime),
            )),
            None => issues.push(
                Issue::critical(
                    Category::MISSING_ALT_TEXT,
                    location,
                    format!("Output image ({}) has no text description", mime),
                )
                .with_wcag(wcag::NON_TEXT_CONTENT)
                .with_remediation(
                    "Describe the figure in a following markdown cell or attach alt text to the output metadata",
                ),
            ),
        }
    }

    found
}
