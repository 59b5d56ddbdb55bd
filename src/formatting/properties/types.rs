// src/formatting/properties/types.rs
//! Domain types for projected properties.

use serde::Serialize;

/// A property value decoded according to its declared schema type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProjectedValue {
    Boolean(bool),
    /// `None` when the cell is empty or not a number.
    Number(Option<f64>),
    List(Vec<String>),
    Text(String),
}

/// A projected property, labelled with its display name and declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub value: ProjectedValue,
}

/// Display form of one schema property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDisplayEntry {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}
