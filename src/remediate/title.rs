//! Main title insertion.

use super::{ChangeLog, Fix, RemediateOptions, DESCRIPTION_PLACEHOLDER};
use crate::error::Result;
use crate::model::{Cell, Notebook};
use crate::patterns::heading;

/// Gives untitled notebooks a level-1 heading.
///
/// The heading goes on top of the first markdown cell. A notebook without
/// markdown gets a new leading title cell.
pub struct TitleFix;

impl Fix for TitleFix {
    fn name(&self) -> &str {
        "title"
    }

    fn description(&self) -> &str {
        "Insert a level-1 title when the notebook does not start with one"
    }

    fn apply(
        &self,
        notebook: &mut Notebook,
        options: &RemediateOptions,
        changes: &mut ChangeLog,
    ) -> Result<()> {
        let title = options.title();

        let Some(cell) = notebook.cells.iter_mut().find(|c| c.is_markdown()) else {
            notebook.insert_cell(
                0,
                Cell::markdown(format!("# {}\n\n{}\n", title, DESCRIPTION_PLACEHOLDER)),
            );
            changes.push(format!("Inserted title cell \"{}\" at the top of the notebook", title));
            return Ok(());
        };

        let lines = cell.source.lines();
        let starts_with_title = lines
            .iter()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| heading(line))
            .is_some_and(|(level, _)| level == 1);
        if starts_with_title {
            return Ok(());
        }

        let mut titled = Vec::with_capacity(lines.len() + 2);
        titled.push(format!("# {}\n", title));
        if !lines.is_empty() {
            titled.push("\n".to_string());
        }
        titled.extend(lines);
        cell.source.set_lines(titled);

        changes.push(format!("Added main title (H1) \"{}\"", title));
        Ok(())
    }
}
