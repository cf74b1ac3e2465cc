//! nbformat JSON serializer.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::Notebook;

/// Indentation Jupyter uses when saving notebooks.
const INDENT: &[u8] = b" ";

/// Serialize a notebook the way Jupyter writes it.
///
/// One-space indentation, a trailing newline, non-ASCII text kept verbatim.
pub fn to_bytes(notebook: &Notebook) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    to_writer(notebook, &mut buf)?;
    Ok(buf)
}

/// Serialize a notebook into a writer.
pub fn to_writer<W: Write>(notebook: &Notebook, mut writer: W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut writer, formatter);
    notebook
        .serialize(&mut serializer)
        .map_err(|e| Error::Other(format!("Failed to serialize notebook: {}", e)))?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write a notebook to a file.
///
/// # Example
///
/// ```no_run
/// use notebook_a11y::{parse_file, save_file};
///
/// let nb = parse_file("analysis.ipynb").unwrap();
/// save_file(&nb, "copy.ipynb").unwrap();
/// ```
pub fn save_file<P: AsRef<Path>>(notebook: &Notebook, path: P) -> Result<()> {
    let path = path.as_ref();
    let data = to_bytes(notebook)?;
    fs::write(path, data).map_err(|e| Error::file(path, e))?;
    log::debug!("Saved notebook to {}", path.display());
    Ok(())
}
