//! Built-in accessibility checks.

mod charts;
mod code;
mod color;
mod headings;
mod images;
mod links;
mod structure;
mod tables;

pub use charts::ChartCheck;
pub use code::CodeCheck;
pub use color::ColorCheck;
pub use headings::HeadingCheck;
pub use images::ImageCheck;
pub use links::LinkCheck;
pub use structure::StructureCheck;
pub use tables::TableCheck;

use super::Check;
use std::sync::Arc;

/// Built-in checks in evaluation order.
pub fn defaults() -> Vec<Arc<dyn Check>> {
    vec![
        Arc::new(ImageCheck),
        Arc::new(HeadingCheck),
        Arc::new(TableCheck),
        Arc::new(CodeCheck),
        Arc::new(StructureCheck),
        Arc::new(ColorCheck),
        Arc::new(LinkCheck),
        Arc::new(ChartCheck),
    ]
}

#[cfg(test)]
pub(crate) fn run(check: &dyn Check, cells: Vec<crate::model::Cell>) -> Vec<super::Issue> {
    let nb = crate::model::Notebook::with_cells(cells);
    check
        .check(&nb, &super::AuditOptions::default())
        .unwrap_or_default()
}
