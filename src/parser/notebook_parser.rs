//! nbformat JSON parser.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::detect::NotebookFormat;
use crate::error::{Error, Result};
use crate::model::{Cell, Notebook, Output};

use super::options::{ErrorMode, ParseOptions};

/// Notebook parser.
pub struct NotebookParser {
    root: Map<String, Value>,
    options: ParseOptions,
}

impl NotebookParser {
    /// Open a notebook file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a notebook file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|e| Error::file(path, e))?;
        log::debug!("Read {} bytes from {}", data.len(), path.display());
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a notebook from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Load a notebook from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        let Value::Object(root) = value else {
            return Err(Error::Format("top level is not a JSON object".to_string()));
        };

        match root.get("cells") {
            Some(Value::Array(_)) => {}
            Some(_) => return Err(Error::Format("'cells' is not an array".to_string())),
            None => return Err(Error::Format("missing 'cells' array".to_string())),
        }

        match NotebookFormat::from_object(&root) {
            Some(format) if !format.is_supported() => {
                log::warn!("{} is not fully supported; auditing anyway", format);
            }
            Some(_) => {}
            None => log::debug!("Notebook does not declare an nbformat version"),
        }

        Ok(Self { root, options })
    }

    /// Load a notebook from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Load a notebook from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse the cells and return a structured notebook.
    pub fn parse(self) -> Result<Notebook> {
        let mut root = self.root;
        let raw_cells = match root.shift_remove("cells") {
            Some(Value::Array(cells)) => cells,
            _ => return Err(Error::Format("missing 'cells' array".to_string())),
        };

        let mut cells = Vec::with_capacity(raw_cells.len());
        for (index, raw) in raw_cells.into_iter().enumerate() {
            match parse_cell(raw) {
                Ok(cell) => cells.push(cell),
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => {
                        return Err(Error::Format(format!("cell {}: {}", index + 1, e)))
                    }
                    ErrorMode::Lenient => {
                        log::warn!("Skipping malformed cell {}: {}", index + 1, e);
                    }
                },
            }
        }

        Ok(Notebook { cells, extra: root })
    }
}

/// Build a cell from its JSON object.
///
/// Only a missing or non-string `cell_type` makes a cell malformed. Values of
/// the wrong type under `outputs`, or under an output's `data` or
/// `output_type`, are kept verbatim in `extra` and otherwise ignored.
fn parse_cell(raw: Value) -> std::result::Result<Cell, String> {
    let Value::Object(mut object) = raw else {
        return Err("cell is not a JSON object".to_string());
    };
    match object.get("cell_type") {
        Some(Value::String(_)) => {}
        Some(_) => return Err("'cell_type' is not a string".to_string()),
        None => return Err("cell has no 'cell_type'".to_string()),
    }

    let raw_outputs = object.shift_remove("outputs");
    let mut cell: Cell =
        serde_json::from_value(Value::Object(object)).map_err(|e| e.to_string())?;

    match raw_outputs {
        None => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_object) => {
            let outputs = items
                .into_iter()
                .map(parse_output)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            cell.outputs = Some(outputs);
        }
        Some(other) => {
            log::debug!("Keeping malformed 'outputs' value as is");
            cell.extra.insert("outputs".to_string(), other);
        }
    }

    Ok(cell)
}

fn parse_output(raw: Value) -> std::result::Result<Output, String> {
    let Value::Object(mut object) = raw else {
        return Err("output is not a JSON object".to_string());
    };

    let mut stray = Map::new();
    take_mistyped(&mut object, "data", Value::is_object, &mut stray);
    take_mistyped(&mut object, "output_type", Value::is_string, &mut stray);

    let mut output: Output =
        serde_json::from_value(Value::Object(object)).map_err(|e| e.to_string())?;
    output.extra.extend(stray);
    Ok(output)
}

/// Move `key` into `stray` when its value has the wrong JSON type.
fn take_mistyped(
    object: &mut Map<String, Value>,
    key: &str,
    well_typed: fn(&Value) -> bool,
    stray: &mut Map<String, Value>,
) {
    if object.get(key).is_some_and(|v| !well_typed(v)) {
        if let Some(value) = object.shift_remove(key) {
            stray.insert(key.to_string(), value);
        }
    }
}
