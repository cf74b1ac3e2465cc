//! Cell-level types.

use super::Output;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell discriminator (`markdown`, `code`, `raw`)
    pub cell_type: CellKind,

    /// Cell source text
    #[serde(default)]
    pub source: Source,

    /// Outputs of a code cell; `None` when the key was absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Output>>,

    /// Every other key (`metadata`, `id`, `execution_count`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Cell {
    /// Create a markdown cell from text.
    pub fn markdown(text: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("metadata".to_string(), Value::Object(Map::new()));
        Self {
            cell_type: CellKind::Markdown,
            source: Source::from_lines_of(&text.into()),
            outputs: None,
            extra,
        }
    }

    /// Create a code cell from text, with no outputs.
    pub fn code(text: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("execution_count".to_string(), Value::Null);
        extra.insert("metadata".to_string(), Value::Object(Map::new()));
        Self {
            cell_type: CellKind::Code,
            source: Source::from_lines_of(&text.into()),
            outputs: Some(Vec::new()),
            extra,
        }
    }

    /// Create a raw cell from text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            cell_type: CellKind::Raw,
            ..Self::markdown(text)
        }
    }

    /// Attach an output to this cell.
    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.get_or_insert_with(Vec::new).push(output);
        self
    }

    /// Check if this is a markdown cell.
    pub fn is_markdown(&self) -> bool {
        self.cell_type == CellKind::Markdown
    }

    /// Check if this is a code cell.
    pub fn is_code(&self) -> bool {
        self.cell_type == CellKind::Code
    }

    /// Concatenated source text.
    pub fn text(&self) -> Cow<'_, str> {
        self.source.text()
    }

    /// Outputs of this cell (empty for non-code cells).
    pub fn outputs(&self) -> &[Output] {
        self.outputs.as_deref().unwrap_or(&[])
    }
}

/// Kind of a notebook cell.
///
/// Unknown discriminators are kept verbatim so they survive a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    /// Markdown prose
    Markdown,
    /// Executable code
    Code,
    /// Raw passthrough content
    Raw,
    /// Any other discriminator
    Other(String),
}

impl CellKind {
    /// The nbformat discriminator string.
    pub fn as_str(&self) -> &str {
        match self {
            CellKind::Markdown => "markdown",
            CellKind::Code => "code",
            CellKind::Raw => "raw",
            CellKind::Other(s) => s,
        }
    }
}

impl From<String> for CellKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "markdown" => CellKind::Markdown,
            "code" => CellKind::Code,
            "raw" => CellKind::Raw,
            _ => CellKind::Other(s),
        }
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell source in either of the two nbformat spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Source {
    /// A single string
    Text(String),
    /// A list of strings, one per line with terminators kept
    Lines(Vec<String>),
}

impl Source {
    /// Build a line-list source from text.
    pub fn from_lines_of(text: &str) -> Self {
        Source::Lines(split_lines(text))
    }

    /// Concatenated source text.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Source::Text(s) => Cow::Borrowed(s),
            Source::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }

    /// Logical lines of the source, terminators kept.
    pub fn lines(&self) -> Vec<String> {
        split_lines(&self.text())
    }

    /// Replace the source with the given logical lines, keeping the spelling.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        match self {
            Source::Text(s) => *s = lines.concat(),
            Source::Lines(existing) => *existing = lines,
        }
    }

    /// Replace the source with the given text, keeping the spelling.
    pub fn set_text(&mut self, text: &str) {
        match self {
            Source::Text(s) => *s = text.to_string(),
            Source::Lines(existing) => *existing = split_lines(text),
        }
    }

    /// Check whether the source has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::Lines(Vec::new())
    }
}

// Scalars and objects become their JSON text so a stray value never fails the load.
impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => Source::default(),
            Value::String(s) => Source::Text(s),
            Value::Array(items) => Source::Lines(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Null => None,
                        Value::String(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
            other => Source::Text(other.to_string()),
        })
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_from_string_and_list() {
        let text: Source = serde_json::from_value(json!("# Title\nbody")).unwrap();
        assert_eq!(text, Source::Text("# Title\nbody".to_string()));

        let lines: Source = serde_json::from_value(json!(["# Title\n", "body"])).unwrap();
        assert_eq!(lines.text(), "# Title\nbody");
        assert_eq!(lines.lines(), vec!["# Title\n", "body"]);
    }

    #[test]
    fn test_source_lenient_elements() {
        let source: Source = serde_json::from_value(json!(["a\n", null, 42])).unwrap();
        assert_eq!(source.text(), "a\n42");

        let source: Source = serde_json::from_value(json!(null)).unwrap();
        assert!(source.is_blank());

        let source: Source = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(source.text(), "7");

        let source: Source = serde_json::from_value(json!({"a": 1})).unwrap();
        assert_eq!(source.text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_set_lines_keeps_spelling() {
        let mut text = Source::Text("a\nb\n".to_string());
        text.set_lines(vec!["a\n".into(), "x\n".into(), "b\n".into()]);
        assert_eq!(text, Source::Text("a\nx\nb\n".to_string()));

        let mut lines = Source::Lines(vec!["a\n".into(), "b".into()]);
        lines.set_text("a\n\nb");
        assert_eq!(
            lines,
            Source::Lines(vec!["a\n".into(), "\n".into(), "b".into()])
        );
    }

    #[test]
    fn test_cell_kind_roundtrip_unknown() {
        let kind: CellKind = serde_json::from_value(json!("heading")).unwrap();
        assert_eq!(kind, CellKind::Other("heading".to_string()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("heading"));
    }

    #[test]
    fn test_cell_missing_source_and_outputs() {
        let cell: Cell = serde_json::from_value(json!({
            "cell_type": "markdown",
            "metadata": {}
        }))
        .unwrap();
        assert!(cell.is_markdown());
        assert!(cell.source.is_blank());
        assert!(cell.outputs.is_none());
        assert!(cell.extra.contains_key("metadata"));

        let value = serde_json::to_value(&cell).unwrap();
        assert!(value.get("outputs").is_none());
    }

    #[test]
    fn test_code_cell_constructor() {
        let cell = Cell::code("x = 1\nprint(x)");
        assert!(cell.is_code());
        assert_eq!(cell.outputs(), &[] as &[Output]);
        assert_eq!(cell.source.lines().len(), 2);
    }
}
