//! Link purpose (WCAG 2.4.4).

use crate::audit::{wcag, AuditOptions, Category, Check, Issue, Location};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{bare_url_spans, fenced_lines, is_reference_definition, MARKDOWN_LINK};

/// Link texts that say nothing about the target.
const VAGUE_LINK_TEXT: &[&str] = &[
    "click here",
    "here",
    "link",
    "this link",
    "read more",
    "more",
    "click",
    "this",
];

/// Checks link texts and bare URLs in markdown cells.
pub struct LinkCheck;

impl Check for LinkCheck {
    fn name(&self) -> &str {
        "links"
    }

    fn description(&self) -> &str {
        "Links have descriptive text and URLs are not pasted bare"
    }

    fn check(&self, notebook: &Notebook, _options: &AuditOptions) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for (idx, cell) in notebook.markdown_cells() {
            let location = Location::cell(idx);
            let lines = cell.source.lines();
            let fenced = fenced_lines(&lines);

            for (line, in_fence) in lines.iter().zip(fenced) {
                if in_fence {
                    continue;
                }

                for caps in MARKDOWN_LINK.captures_iter(line) {
                    if caps.get(1).is_some_and(|m| !m.is_empty()) {
                        continue;
                    }
                    let text = caps.get(2).map_or("", |m| m.as_str()).trim();
                    let url = caps.get(3).map_or("", |m| m.as_str());
                    issues.push(link_issue(text, url, location));
                }

                if is_reference_definition(line) {
                    continue;
                }
                for span in bare_url_spans(line) {
                    issues.push(
                        Issue::warning(
                            Category::BARE_URL,
                            location,
                            format!("Bare URL: {}", &line[span]),
                        )
                        .with_wcag(wcag::LINK_PURPOSE)
                        .with_remediation("Wrap the URL in a link with descriptive text: [description](url)"),
                    );
                }
            }
        }

        Ok(issues)
    }
}

fn link_issue(text: &str, url: &str, location: Location) -> Issue {
    let vague = VAGUE_LINK_TEXT.contains(&text.to_lowercase().as_str());
    if vague || text.is_empty() || text == url {
        Issue::warning(
            Category::NON_DESCRIPTIVE_LINK,
            location,
            format!("Link text \"{}\" does not describe the target {}", text, url),
        )
        .with_wcag(wcag::LINK_PURPOSE)
        .with_remediation("Use link text that describes where the link goes")
    } else {
        Issue::success(
            Category::LINK_TEXT,
            location,
            format!("Link has descriptive text: \"{}\"", text),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::checks::run;
    use crate::model::Cell;

    fn categories(issues: &[Issue]) -> Vec<Category> {
        issues.iter().map(Issue::category).collect()
    }

    #[test]
    fn test_link_text() {
        let issues = run(
            &LinkCheck,
            vec![Cell::markdown(
                "[Click Here](https://a.org) [docs](https://b.org) \
                 [https://c.org](https://c.org) [Rust book](https://doc.rust-lang.org/book)",
            )],
        );
        assert_eq!(
            categories(&issues),
            vec![
                Category::NON_DESCRIPTIVE_LINK,
                Category::LINK_TEXT,
                Category::NON_DESCRIPTIVE_LINK,
                Category::LINK_TEXT
            ]
        );
    }

    #[test]
    fn test_images_are_not_links() {
        let issues = run(&LinkCheck, vec![Cell::markdown("![here](chart.png)")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_linked_badge() {
        let issues = run(
            &LinkCheck,
            vec![Cell::markdown(
                "# T\n[![Binder](https://mybinder.org/badge_logo.svg)](https://mybinder.org/v2/gh/x/y/HEAD)\n",
            )],
        );
        assert_eq!(categories(&issues), vec![Category::LINK_TEXT]);
    }

    #[test]
    fn test_bare_urls() {
        let issues = run(
            &LinkCheck,
            vec![Cell::markdown(
                "Data from https://data.gov/set.\n\
                 ```\nwget https://example.com/file\n```\n\
                 [ref]: https://example.com/ref\n\
                 `https://inline.example`",
            )],
        );
        assert_eq!(categories(&issues), vec![Category::BARE_URL]);
        assert_eq!(issues[0].message(), "Bare URL: https://data.gov/set");
    }
}
