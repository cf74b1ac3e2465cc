//! Notebook format detection and validation.

use crate::error::{Error, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Notebook file extension.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Directory Jupyter uses for autosave copies.
const CHECKPOINT_DIR: &str = ".ipynb_checkpoints";

/// nbformat version information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotebookFormat {
    /// Major version (e.g., 4)
    pub major: u32,
    /// Minor version (e.g., 5)
    pub minor: u32,
}

impl NotebookFormat {
    /// Major version this library is written against.
    pub const SUPPORTED_MAJOR: u32 = 4;

    /// Read `nbformat` / `nbformat_minor` from a top-level notebook object.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let major = object.get("nbformat")?.as_u64()?;
        let minor = object
            .get("nbformat_minor")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Some(Self {
            major: u32::try_from(major).ok()?,
            minor: u32::try_from(minor).unwrap_or(0),
        })
    }

    /// Check whether the major version is the supported one.
    pub fn is_supported(&self) -> bool {
        self.major == Self::SUPPORTED_MAJOR
    }
}

impl std::fmt::Display for NotebookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nbformat {}.{}", self.major, self.minor)
    }
}

/// Detect the notebook format from a file path.
///
/// # Example
/// ```no_run
/// use notebook_a11y::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("analysis.ipynb").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<NotebookFormat> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| Error::file(path, e))?;
    detect_format_from_bytes(&data)
}

/// Detect the notebook format from bytes.
///
/// # Returns
/// * `Ok(NotebookFormat)` if the data is a JSON object with `cells` and `nbformat`
/// * `Err(Error::Format)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<NotebookFormat> {
    let value: Value = serde_json::from_slice(data)?;
    let object = value
        .as_object()
        .ok_or_else(|| Error::Format("top level is not a JSON object".to_string()))?;

    if !object.get("cells").is_some_and(Value::is_array) {
        return Err(Error::Format("missing 'cells' array".to_string()));
    }

    NotebookFormat::from_object(object)
        .ok_or_else(|| Error::Format("missing 'nbformat' version".to_string()))
}

/// Check if bytes hold a recognizable notebook.
pub fn is_notebook_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Check if a path names a notebook file by extension.
///
/// Files inside `.ipynb_checkpoints` directories are autosave copies and
/// are not considered notebooks.
pub fn is_notebook_path<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    let is_ipynb = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(NOTEBOOK_EXTENSION));
    let in_checkpoints = path
        .components()
        .any(|c| c.as_os_str() == CHECKPOINT_DIR);
    is_ipynb && !in_checkpoints
}
