// src/model/schema.rs
//! Collection schema: property-id -> definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type used when a property has no schema entry.
pub const UNKNOWN_PROPERTY_TYPE: &str = "unknown";

/// One selectable option of a `select`/`multi_select` property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Definition of a single collection property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "unknown_type")]
    pub property_type: String,
    #[serde(default)]
    pub options: Vec<SchemaOption>,
}

fn unknown_type() -> String {
    UNKNOWN_PROPERTY_TYPE.to_string()
}

/// Schema of a collection in stored order.
pub type CollectionSchema = IndexMap<String, PropertyDefinition>;

/// Decodes a JSON-encoded schema.
///
/// An unparsable blob yields an empty schema; individual malformed
/// entries are skipped.
pub fn parse_schema(blob: Option<&str>) -> CollectionSchema {
    let Some(blob) = blob else {
        return CollectionSchema::new();
    };

    let entries = match serde_json::from_str::<Value>(blob) {
        Ok(Value::Object(entries)) => entries,
        Ok(_) => return CollectionSchema::new(),
        Err(err) => {
            log::warn!("Ignoring unparsable collection schema: {}", err);
            return CollectionSchema::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(property_id, definition)| {
            match serde_json::from_value::<PropertyDefinition>(definition) {
                Ok(definition) => Some((property_id, definition)),
                Err(err) => {
                    log::debug!("Skipping schema entry {}: {}", property_id, err);
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_keeps_order_and_skips_malformed() {
        let blob = r#"{
            "title": {"name": "Name", "type": "title"},
            "abc": {"name": "Status", "type": "select",
                    "options": [{"id": "1", "value": "Todo", "color": "red"}, {"value": "Done"}]},
            "bad": 17,
            "xyz": {"name": "Untyped"}
        }"#;
        let schema = parse_schema(Some(blob));
        let keys: Vec<&str> = schema.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "abc", "xyz"]);
        assert_eq!(schema["abc"].options[1].value, "Done");
        assert_eq!(schema["xyz"].property_type, "unknown");
    }

    #[test]
    fn test_parse_schema_degrades_to_empty() {
        assert!(parse_schema(None).is_empty());
        assert!(parse_schema(Some("{oops")).is_empty());
        assert!(parse_schema(Some("[1,2]")).is_empty());
    }
}
