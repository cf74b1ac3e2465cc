//! Header separators for markdown tables.

use super::{ChangeLog, Fix, RemediateOptions};
use crate::error::Result;
use crate::model::Notebook;
use crate::patterns::{
    fenced_lines, is_table_separator, table_blocks, table_columns, table_separator,
};

/// Turns the first row of separator-less markdown tables into a header.
pub struct TableHeaderFix;

impl Fix for TableHeaderFix {
    fn name(&self) -> &str {
        "table-header"
    }

    fn description(&self) -> &str {
        "Insert a header separator into markdown tables that lack one"
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

            let lines = cell.source.lines();
            let fenced = fenced_lines(&lines);
            let mut fixed = Vec::with_capacity(lines.len() + 1);
            let mut inserted = 0;
            let mut next = 0;

            for block in table_blocks(&lines, &fenced) {
                fixed.extend(lines[next..block.start].iter().cloned());
                let rows = &lines[block.clone()];
                if rows.iter().any(|row| is_table_separator(row)) {
                    fixed.extend(rows.iter().cloned());
                } else {
                    fixed.push(terminated(&rows[0]));
                    fixed.push(table_separator(table_columns(&rows[0])));
                    fixed.extend(rows[1..].iter().cloned());
                    inserted += 1;
                }
                next = block.end;
            }
            fixed.extend(lines[next..].iter().cloned());

            if inserted == 0 {
                continue;
            }
            cell.source.set_lines(fixed);
            for _ in 0..inserted {
                changes.push(format!("Added header separator to table in cell {}", idx + 1));
            }
        }

        Ok(())
    }
}

/// Ensure a line ends with a newline so a row can follow it.
fn terminated(line: &str) -> String {
    if line.ends_with('\n') {
        line.to_string()
    } else {
        format!("{}\n", line)
    }
}
