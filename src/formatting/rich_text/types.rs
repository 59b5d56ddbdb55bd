// src/formatting/rich_text/types.rs
//! Structured view of the cache's nested-array rich-text encoding.
//!
//! A rich-text value is a sequence of segments, each `[text]` or
//! `[text, annotations]`. Annotations are either a bare style mark
//! (`"b"`, `"i"`, ...) or a `[kind, payload]` pair such as `["p", pageId]`.

use serde_json::Value;

/// Annotation kind of an inline page reference.
pub const PAGE_REFERENCE_KIND: &str = "p";

/// A single annotation attached to a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Formatting mark with no payload.
    Style(String),
    /// Typed annotation carrying a payload.
    Pair { kind: String, payload: Value },
}

impl Annotation {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(mark) => Some(Self::Style(mark.clone())),
            Value::Array(items) => {
                let kind = items.first()?.as_str()?.to_string();
                let payload = items.get(1).cloned().unwrap_or(Value::Null);
                Some(Self::Pair { kind, payload })
            }
            _ => None,
        }
    }

    /// The referenced page id, when this is a page reference.
    pub fn page_reference(&self) -> Option<&str> {
        match self {
            Self::Pair { kind, payload } if kind == PAGE_REFERENCE_KIND => payload.as_str(),
            _ => None,
        }
    }
}

/// One decoded segment of rich text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSegment {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl TextSegment {
    /// Decodes one segment; malformed segments yield empty text.
    fn from_value(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            return Self::default();
        };

        let text = items
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let annotations = items
            .get(1)
            .and_then(Value::as_array)
            .map(|marks| marks.iter().filter_map(Annotation::from_value).collect())
            .unwrap_or_default();

        Self { text, annotations }
    }
}

/// Decodes a rich-text value into segments. Anything that is not an array
/// decodes to no segments at all.
pub fn parse_segments(value: &Value) -> Vec<TextSegment> {
    value
        .as_array()
        .map(|segments| segments.iter().map(TextSegment::from_value).collect())
        .unwrap_or_default()
}
