// src/formatting/properties/mod.rs
//! Schema-aware projection of a page's raw property map.
//!
//! Rows of a collection store their cells keyed by opaque property ids.
//! Projection joins those cells with the collection schema to produce
//! values labelled by display name and decoded by declared type.

mod formatters;
mod types;

pub use formatters::decode_property_value;
pub use types::{ProjectedProperty, ProjectedValue, SchemaDisplayEntry};

use crate::formatting::rich_text::parse_property_map;
use crate::model::{CollectionSchema, UNKNOWN_PROPERTY_TYPE};
use indexmap::IndexMap;

/// Projected properties keyed by display name.
pub type ProjectedProperties = IndexMap<String, ProjectedProperty>;

/// Projects a JSON-encoded property map through a collection schema.
///
/// Returns `None` when the blob is absent or unparsable. Null cells are
/// skipped. When two properties share a display name the later one wins.
pub fn project(raw_properties: Option<&str>, schema: &CollectionSchema) -> Option<ProjectedProperties> {
    let raw = parse_property_map(raw_properties)?;
    let mut projected = ProjectedProperties::new();

    for (property_id, cell) in &raw {
        if cell.is_null() {
            continue;
        }

        let (name, property_type) = match schema.get(property_id) {
            Some(definition) => {
                let name = if definition.name.is_empty() {
                    property_id.clone()
                } else {
                    definition.name.clone()
                };
                (name, definition.property_type.clone())
            }
            None => (property_id.clone(), UNKNOWN_PROPERTY_TYPE.to_string()),
        };

        let value = decode_property_value(&property_type, cell);
        projected.insert(
            name.clone(),
            ProjectedProperty {
                name,
                property_type,
                value,
            },
        );
    }

    Some(projected)
}

/// Summarizes a schema for display: display name -> type and option labels.
pub fn format_schema_for_display(schema: &CollectionSchema) -> IndexMap<String, SchemaDisplayEntry> {
    schema
        .values()
        .map(|definition| {
            let options = (!definition.options.is_empty()).then(|| {
                definition
                    .options
                    .iter()
                    .map(|option| option.value.clone())
                    .collect()
            });
            (
                definition.name.clone(),
                SchemaDisplayEntry {
                    property_type: definition.property_type.clone(),
                    options,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_schema;
    use pretty_assertions::assert_eq;

    fn schema() -> CollectionSchema {
        parse_schema(Some(
            r#"{
                "title": {"name": "Name", "type": "title"},
                "a1": {"name": "Done", "type": "checkbox"},
                "a2": {"name": "Estimate", "type": "number"},
                "a3": {"name": "Tags", "type": "multi_select",
                       "options": [{"value": "red"}, {"value": "blue"}]},
                "a4": {"name": "Blocked by", "type": "relation"},
                "dup": {"name": "Done", "type": "text"}
            }"#,
        ))
    }

    #[test]
    fn test_project_decodes_by_declared_type() {
        let raw = r#"{
            "title": [["Write report"]],
            "a1": [["Yes"]],
            "a2": [["3"]],
            "a3": [["red,blue"]],
            "a4": [["‣", [["p", "page-1"]]]],
            "zz": [["mystery"]],
            "nil": null
        }"#;
        let projected = project(Some(raw), &schema()).unwrap();

        let names: Vec<&str> = projected.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Name", "Done", "Estimate", "Tags", "Blocked by", "zz"]);
        assert_eq!(projected["Name"].value, ProjectedValue::Text("Write report".into()));
        assert_eq!(projected["Done"].value, ProjectedValue::Boolean(true));
        assert_eq!(projected["Estimate"].value, ProjectedValue::Number(Some(3.0)));
        assert_eq!(
            projected["Tags"].value,
            ProjectedValue::List(vec!["red".into(), "blue".into()])
        );
        assert_eq!(
            projected["Blocked by"].value,
            ProjectedValue::List(vec!["page-1".into()])
        );
        assert_eq!(projected["zz"].property_type, "unknown");
        assert_eq!(projected["zz"].value, ProjectedValue::Text("mystery".into()));
    }

    #[test]
    fn test_later_property_overwrites_shared_name() {
        let projected = project(Some(r#"{"a1": [["Yes"]], "dup": [["free text"]]}"#), &schema())
            .unwrap();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected["Done"].property_type, "text");
        assert_eq!(projected["Done"].value, ProjectedValue::Text("free text".into()));
    }

    #[test]
    fn test_project_without_blob() {
        assert!(project(None, &schema()).is_none());
        assert!(project(Some("not json"), &schema()).is_none());
    }

    #[test]
    fn test_format_schema_for_display() {
        let display = format_schema_for_display(&schema());
        assert_eq!(display["Tags"].property_type, "multi_select");
        assert_eq!(
            display["Tags"].options,
            Some(vec!["red".to_string(), "blue".to_string()])
        );
        assert_eq!(display["Name"].options, None);
        let json = serde_json::to_value(&display["Name"]).unwrap();
        assert_eq!(json, serde_json::json!({"type": "title"}));
    }
}
