// src/formatting/properties/formatters.rs
//! Type-specific decoding of raw property cells.
//!
//! Every cell in the cache is stored as rich text regardless of its
//! declared type, so each decoder starts from the cell's plain text
//! (or, for relations, its page-reference annotations).

use super::types::ProjectedValue;
use crate::formatting::rich_text::{extract_plain_text, extract_relation_ids};
use serde_json::Value;

/// Plain text the cache stores for a ticked checkbox.
const CHECKBOX_CHECKED: &str = "Yes";

/// Decodes one raw cell according to its declared type.
pub fn decode_property_value(property_type: &str, raw: &Value) -> ProjectedValue {
    match property_type {
        "checkbox" => decode_checkbox(raw),
        "number" => decode_number(raw),
        "multi_select" => decode_multi_select(raw),
        "relation" => ProjectedValue::List(extract_relation_ids(raw)),
        // date / created_time / last_edited_time pass through unparsed, like
        // every other text-bearing type.
        _ => ProjectedValue::Text(extract_plain_text(raw)),
    }
}

fn decode_checkbox(raw: &Value) -> ProjectedValue {
    ProjectedValue::Boolean(extract_plain_text(raw) == CHECKBOX_CHECKED)
}

fn decode_number(raw: &Value) -> ProjectedValue {
    let text = extract_plain_text(raw);
    if text.is_empty() {
        return ProjectedValue::Number(None);
    }
    let parsed = text.parse::<f64>().ok().filter(|n| n.is_finite());
    if parsed.is_none() {
        log::debug!("Number cell is not numeric: {:?}", text);
    }
    ProjectedValue::Number(parsed)
}

fn decode_multi_select(raw: &Value) -> ProjectedValue {
    let text = extract_plain_text(raw);
    if text.is_empty() {
        return ProjectedValue::List(Vec::new());
    }
    ProjectedValue::List(text.split(',').map(|piece| piece.trim().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checkbox() {
        assert_eq!(
            decode_property_value("checkbox", &json!([["Yes"]])),
            ProjectedValue::Boolean(true)
        );
        for other in [json!([["No"]]), json!([["yes"]]), json!([]), json!(null)] {
            assert_eq!(
                decode_property_value("checkbox", &other),
                ProjectedValue::Boolean(false)
            );
        }
    }

    #[test]
    fn test_number() {
        assert_eq!(
            decode_property_value("number", &json!([["42.5"]])),
            ProjectedValue::Number(Some(42.5))
        );
        assert_eq!(
            decode_property_value("number", &json!([])),
            ProjectedValue::Number(None)
        );
        assert_eq!(
            decode_property_value("number", &json!([["n/a"]])),
            ProjectedValue::Number(None)
        );
    }

    #[test]
    fn test_multi_select() {
        assert_eq!(
            decode_property_value("multi_select", &json!([["red, green ,blue"]])),
            ProjectedValue::List(vec!["red".into(), "green".into(), "blue".into()])
        );
        assert_eq!(
            decode_property_value("multi_select", &json!([])),
            ProjectedValue::List(vec![])
        );
    }

    #[test]
    fn test_relation_and_passthrough() {
        assert_eq!(
            decode_property_value("relation", &json!([["‣", [["p", "a"]]], [","], ["‣", [["p", "b"]]]])),
            ProjectedValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            decode_property_value("date", &json!([["‣", [["d", {"start_date": "2024-01-01"}]]]])),
            ProjectedValue::Text(String::new())
        );
        assert_eq!(
            decode_property_value("last_edited_time", &json!([["Jan 5, 2024"]])),
            ProjectedValue::Text("Jan 5, 2024".into())
        );
        assert_eq!(
            decode_property_value("select", &json!([["Done"]])),
            ProjectedValue::Text("Done".into())
        );
    }
}
