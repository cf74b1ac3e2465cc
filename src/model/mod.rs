//! Document model types for notebook content.
//!
//! The model mirrors the nbformat JSON layout closely enough that a
//! load/save round trip keeps every field, while giving checks and fixes a
//! typed view of cells, sources and outputs.

mod cell;
mod notebook;
mod output;

pub use cell::{Cell, CellKind, Source};
pub use notebook::Notebook;
pub use output::Output;
