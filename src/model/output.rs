//! Code cell outputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MIME types treated as raster image payloads.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpeg"];

/// A single output of a code cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    /// Output kind (`stream`, `display_data`, `execute_result`, `error`)
    #[serde(default)]
    pub output_type: String,

    /// MIME bundle of a rich output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,

    /// Every other key (`metadata`, `text`, `name`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Output {
    /// Create a `display_data` output from a MIME bundle.
    pub fn display_data(data: Map<String, Value>) -> Self {
        let mut extra = Map::new();
        extra.insert("metadata".to_string(), Value::Object(Map::new()));
        Self {
            output_type: "display_data".to_string(),
            data: Some(data),
            extra,
        }
    }

    /// Check if this output can carry a rich MIME bundle.
    pub fn is_rich_display(&self) -> bool {
        matches!(
            self.output_type.as_str(),
            "display_data" | "execute_result"
        )
    }

    /// Image MIME types present in the bundle.
    pub fn image_mime_types(&self) -> Vec<&str> {
        match &self.data {
            Some(data) => IMAGE_MIME_TYPES
                .iter()
                .copied()
                .filter(|mime| data.contains_key(*mime))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Check if this is a rich output with an image payload.
    pub fn has_image(&self) -> bool {
        self.is_rich_display() && !self.image_mime_types().is_empty()
    }

    /// Text of a payload stored as a string or a list of strings, if non-blank.
    pub fn payload_text(&self, mime: &str) -> Option<String> {
        self.data.as_ref()?.get(mime).and_then(mime_text)
    }

    /// A textual description of the output, when one is attached.
    ///
    /// Looks at a `text/markdown` payload, then `metadata.alt`, then the
    /// per-MIME `metadata.<mime>.alt`.
    pub fn text_description(&self) -> Option<String> {
        if let Some(text) = self.payload_text("text/markdown") {
            return Some(text);
        }

        let metadata = self.extra.get("metadata")?.as_object()?;
        if let Some(alt) = metadata.get("alt").and_then(mime_text) {
            return Some(alt);
        }
        self.image_mime_types().into_iter().find_map(|mime| {
            metadata
                .get(mime)
                .and_then(|m| m.get("alt"))
                .and_then(mime_text)
        })
    }
}

/// Non-blank text of a MIME value stored as a string or a list of strings.
fn mime_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => return None,
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(value: Value) -> Output {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_image_detection() {
        let out = output(json!({
            "output_type": "display_data",
            "data": {"image/png": "iVBOR...", "text/plain": ["<Figure>"]},
            "metadata": {}
        }));
        assert!(out.has_image());
        assert_eq!(out.image_mime_types(), vec!["image/png"]);
        assert_eq!(out.text_description(), None);

        let stream = output(json!({"output_type": "stream", "name": "stdout", "text": "hi"}));
        assert!(!stream.has_image());
        assert_eq!(stream.payload_text("text/plain"), None);
        assert_eq!(out.payload_text("text/plain").as_deref(), Some("<Figure>"));
    }

    #[test]
    fn test_text_description_sources() {
        let markdown = output(json!({
            "output_type": "execute_result",
            "data": {"image/jpeg": "...", "text/markdown": ["A bar chart"]},
            "metadata": {}
        }));
        assert_eq!(markdown.text_description().as_deref(), Some("A bar chart"));

        let alt = output(json!({
            "output_type": "display_data",
            "data": {"image/png": "..."},
            "metadata": {"image/png": {"alt": "Scatter plot"}}
        }));
        assert_eq!(alt.text_description().as_deref(), Some("Scatter plot"));

        let blank = output(json!({
            "output_type": "display_data",
            "data": {"image/png": "..."},
            "metadata": {"alt": "   "}
        }));
        assert_eq!(blank.text_description(), None);
    }
}
