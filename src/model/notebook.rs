//! Notebook-level types.

use super::{Cell, CellKind};
use crate::detect::NotebookFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed Jupyter notebook.
///
/// Cell order is reading order. Top-level keys other than `cells` are kept
/// in `extra` so they are written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in reading order
    pub cells: Vec<Cell>,

    /// Every other top-level key (`metadata`, `nbformat`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notebook {
    /// Create a new empty nbformat 4.5 notebook.
    pub fn new() -> Self {
        let mut extra = Map::new();
        extra.insert("metadata".to_string(), Value::Object(Map::new()));
        extra.insert("nbformat".to_string(), Value::from(4));
        extra.insert("nbformat_minor".to_string(), Value::from(5));
        Self {
            cells: Vec::new(),
            extra,
        }
    }

    /// Create a notebook holding the given cells.
    pub fn with_cells(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            ..Self::new()
        }
    }

    /// Cells in reading order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the notebook has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Markdown cells with their 0-based indices.
    pub fn markdown_cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells_of(CellKind::Markdown)
    }

    /// Code cells with their 0-based indices.
    pub fn code_cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells_of(CellKind::Code)
    }

    fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.cell_type == kind)
    }

    /// Insert a cell at the given position.
    pub fn insert_cell(&mut self, index: usize, cell: Cell) {
        let index = index.min(self.cells.len());
        self.cells.insert(index, cell);
    }

    /// Append a cell.
    pub fn push_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// The nbformat version recorded in the notebook, if any.
    pub fn format(&self) -> Option<NotebookFormat> {
        NotebookFormat::from_object(&self.extra)
    }

    /// Notebook-level metadata object, if present.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.extra.get("metadata").and_then(Value::as_object)
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
