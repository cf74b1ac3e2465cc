//! Bare URL wrapping.

use super::{ChangeLog, Fix, RemediateOptions};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{bare_url_spans, fenced_lines, is_reference_definition, url_host};

/// Wraps bare URLs in markdown links labelled with their host.
pub struct BareUrlFix;

impl Fix for BareUrlFix {
    fn name(&self) -> &str {
        "bare-urls"
    }

    fn description(&self) -> &str {
        "Wrap bare URLs in markdown links"
    }

    fn apply(
        &self,
        notebook: &mut Notebook,
        _options: &RemediateOptions,
        changes: &mut ChangeLog,
    ) -> Result<()> {
        for (idx, cell) in notebook.cells.iter_mut().enumerate() {
            if !cell.is_markdown() {
                continue;
            }

            let mut lines = cell.source.lines();
            let fenced = fenced_lines(&lines);
            let mut wrapped = Vec::new();

            for (line, in_fence) in lines.iter_mut().zip(fenced) {
                if in_fence || is_reference_definition(line) {
                    continue;
                }
                let spans = bare_url_spans(line);
                if spans.is_empty() {
                    continue;
                }

                let mut first = Vec::with_capacity(spans.len());
                for span in spans.into_iter().rev() {
                    let url = line[span.clone()].to_string();
                    let link = format!("[{}]({})", url_host(&url), url);
                    line.replace_range(span, &link);
                    first.push(url);
                }
                wrapped.extend(first.into_iter().rev());
            }

            if wrapped.is_empty() {
                continue;
            }
            cell.source.set_lines(lines);
            for url in wrapped {
                changes.push(format!("Wrapped bare URL {} in a link in cell {}", url, idx + 1));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn fix(cells: Vec<Cell>) -> (Notebook, ChangeLog) {
        let mut nb = Notebook::with_cells(cells);
        let mut changes = ChangeLog::new();
        BareUrlFix
            .apply(&mut nb, &RemediateOptions::default(), &mut changes)
            .unwrap();
        (nb, changes)
    }

    #[test]
    fn test_wraps_bare_urls_in_order() {
        let (nb, changes) = fix(vec![Cell::markdown(
            "Data: https://www.data.gov/set and http://example.com.\n",
        )]);
        assert_eq!(
            nb.cells[0].text(),
            "Data: [data.gov](https://www.data.gov/set) and [example.com](http://example.com).\n"
        );
        assert_eq!(
            changes.entries(),
            [
                "Wrapped bare URL https://www.data.gov/set in a link in cell 1",
                "Wrapped bare URL http://example.com in a link in cell 1"
            ]
        );
    }

    #[test]
    fn test_skips_links_code_and_references() {
        let cells = vec![Cell::markdown(
            "[docs](https://docs.rs)\n<a href=\"https://a.org\">A</a>\n`https://b.org`\n\
             [1]: https://c.org\n```\nhttps://d.org\n```\n",
        )];
        let (nb, changes) = fix(cells.clone());
        assert!(changes.is_empty());
        assert_eq!(nb.cells, cells);
    }

    #[test]
    fn test_leaves_linked_badges_alone() {
        let cells = vec![Cell::markdown(
            "[![Binder](https://mybinder.org/badge_logo.svg)](https://mybinder.org/v2/gh/x/y/HEAD)\n",
        )];
        let (nb, changes) = fix(cells.clone());
        assert!(changes.is_empty());
        assert_eq!(nb.cells, cells);
    }

    #[test]
    fn test_idempotent() {
        let (mut nb, first) = fix(vec![Cell::markdown("See https://example.com/page")]);
        assert_eq!(first.len(), 1);
        let before = nb.clone();
        let mut changes = ChangeLog::new();
        BareUrlFix
            .apply(&mut nb, &RemediateOptions::default(), &mut changes)
            .unwrap();
        assert!(changes.is_empty());
        assert_eq!(nb, before);
    }
}
