//! Notebook loading and saving.

mod notebook_parser;
mod options;
mod writer;

pub use notebook_parser::NotebookParser;
pub use options::{ErrorMode, ParseOptions};
pub use writer::{save_file, to_bytes, to_writer};
