// src/model/results.rs
//! Serializable results handed back to tool callers.
//!
//! Field names follow the wire format (`lastEdited`, `totalBlocks`, ...).

use crate::formatting::properties::{ProjectedProperties, SchemaDisplayEntry};
use indexmap::IndexMap;
use serde::Serialize;

/// One hit of a keyword search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub last_edited: String,
    /// Empty for non-page blocks.
    pub url: String,
}

/// A recently edited page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPage {
    pub id: String,
    pub title: String,
    pub last_edited: String,
    pub url: String,
}

/// A block in a materialized page subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Number of nodes in this subtree, this one included.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(ContentNode::subtree_size).sum::<usize>()
    }
}

/// Attached in summary mode to report how much of the page was left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInfo {
    pub summary: bool,
    pub total_blocks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// The collection a page belongs to or hosts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseInfo {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: IndexMap<String, SchemaDisplayEntry>,
}

/// A page with its bounded content tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub url: String,
    pub created: String,
    pub last_edited: String,
    pub content: Vec<ContentNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ProjectedProperties>,
}

impl PageContent {
    /// Number of blocks emitted across the whole content tree.
    pub fn emitted_blocks(&self) -> usize {
        self.content.iter().map(ContentNode::subtree_size).sum()
    }
}

/// An ancestor on the path from a page to its root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncestorNode {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: String,
    /// Empty for non-page ancestors.
    pub url: String,
}

/// A page in a nested listing of child pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildPageNode {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildPageNode>,
}
