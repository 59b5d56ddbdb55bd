// src/formatting/rich_text/mod.rs
//! Decodes the cache's rich-text and property-map encodings into plain text.
//!
//! Nothing in this module fails. Malformed JSON, unexpected shapes, and
//! missing fields all degrade to empty output, because the encoding is
//! owned by the desktop app and may change underneath us.

mod types;

pub use types::{parse_segments, Annotation, TextSegment, PAGE_REFERENCE_KIND};

use crate::constants::{ELLIPSIS, PAGE_REFERENCE_GLYPH};
use serde_json::{Map, Value};

/// Key of the title property in every property map.
pub const TITLE_KEY: &str = "title";

/// Concatenates the segment texts of a rich-text value and trims the result.
///
/// Page-reference glyph segments contribute nothing.
pub fn extract_plain_text(rich_text: &Value) -> String {
    let joined: String = parse_segments(rich_text)
        .iter()
        .map(|segment| segment.text.as_str())
        .filter(|text| *text != PAGE_REFERENCE_GLYPH)
        .collect();
    joined.trim().to_string()
}

/// Parses a JSON-encoded property map. `None` on absence or malformed input.
pub fn parse_property_map(blob: Option<&str>) -> Option<Map<String, Value>> {
    let blob = blob?;
    match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(err) => {
            log::trace!("Unparsable property blob: {}", err);
            None
        }
    }
}

/// Plain text of the `title` property of a JSON-encoded property map.
pub fn extract_title(blob: Option<&str>) -> String {
    parse_property_map(blob)
        .and_then(|map| map.get(TITLE_KEY).map(extract_plain_text))
        .unwrap_or_default()
}

/// Plain text of every rich-text property, non-empty pieces joined by a space.
pub fn extract_all_text(blob: Option<&str>) -> String {
    let Some(map) = parse_property_map(blob) else {
        return String::new();
    };

    map.values()
        .filter(|value| value.is_array())
        .map(extract_plain_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects the page ids of every `["p", pageId]` annotation, in order.
///
/// Duplicates are kept.
pub fn extract_relation_ids(rich_text: &Value) -> Vec<String> {
    parse_segments(rich_text)
        .iter()
        .flat_map(|segment| segment.annotations.iter())
        .filter_map(Annotation::page_reference)
        .map(str::to_string)
        .collect()
}

/// Cuts `text` to `max_length` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_plain_text_ignores_annotations() {
        let value = json!([["Hello", ["b"]], [" "], ["World", ["i"]]]);
        assert_eq!(extract_plain_text(&value), "Hello World");
    }

    #[test]
    fn test_plain_text_drops_reference_glyph_and_trims() {
        let value = json!([["  See "], ["‣", [["p", "abc"]]], [" later  "]]);
        assert_eq!(extract_plain_text(&value), "See  later");
    }

    #[test]
    fn test_plain_text_of_non_array_is_empty() {
        assert_eq!(extract_plain_text(&json!(null)), "");
        assert_eq!(extract_plain_text(&json!({"a": 1})), "");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title(Some(r#"{"title":[["Hello World"]]}"#)), "Hello World");
        assert_eq!(extract_title(Some(r#"{"abc":[["no title"]]}"#)), "");
        assert_eq!(extract_title(Some("{not json")), "");
        assert_eq!(extract_title(None), "");
    }

    #[test]
    fn test_extract_all_text_joins_non_empty() {
        let blob = r#"{"title":[["Plan"]],"x1":[["  "]],"x2":[["Q3"]],"x3":42}"#;
        assert_eq!(extract_all_text(Some(blob)), "Plan Q3");
        assert_eq!(extract_all_text(Some("[")), "");
    }

    #[test]
    fn test_relation_ids_keep_order_and_duplicates() {
        let value = json!([
            ["‣", [["p", "a"]]],
            [",", []],
            ["‣", [["p", "b"], "b"]],
            ["‣", [["p", "a"]]],
            ["x", [["u", "user"]]]
        ]);
        assert_eq!(extract_relation_ids(&value), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("héllo wörld", 7), "héllo w...");
        assert_eq!(truncate("", 0), "");
    }
}
