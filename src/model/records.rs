// src/model/records.rs
//! Raw rows read from the cache, one struct per table.
//!
//! Liveness is not modelled: every query filters on `alive`, so a record
//! that exists in memory is alive by construction.

use super::schema::{parse_schema, CollectionSchema};
use crate::constants::{COLLECTION_PARENT_TABLE, PAGE_BLOCK_TYPE};
use crate::formatting::rich_text::{extract_all_text, extract_plain_text, extract_title};

/// A row of the `block` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockRecord {
    pub id: String,
    pub block_type: String,
    /// JSON-encoded property map, as stored.
    pub properties: Option<String>,
    pub parent_id: Option<String>,
    pub created_time: Option<i64>,
    pub last_edited_time: Option<i64>,
    /// Set on blocks that host a collection (full-page databases).
    pub collection_id: Option<String>,
    /// Kind of table the parent lives in (`block`, `collection`, `space`, ...).
    pub parent_table: Option<String>,
}

impl BlockRecord {
    pub fn is_page(&self) -> bool {
        self.block_type == PAGE_BLOCK_TYPE
    }

    pub fn title(&self) -> String {
        extract_title(self.properties.as_deref())
    }

    /// Title, or every rich-text property when the block has no title.
    pub fn display_text(&self) -> String {
        let title = self.title();
        if title.is_empty() {
            extract_all_text(self.properties.as_deref())
        } else {
            title
        }
    }

    /// The collection this block belongs to or hosts, if any.
    ///
    /// A direct `collection_id` wins; otherwise a block whose parent lives
    /// in the collection table is a row of that collection.
    pub fn collection_reference(&self) -> Option<&str> {
        if let Some(id) = self.collection_id.as_deref().filter(|id| !id.is_empty()) {
            return Some(id);
        }
        match (self.parent_table.as_deref(), self.parent_id.as_deref()) {
            (Some(COLLECTION_PARENT_TABLE), Some(parent)) => Some(parent),
            _ => None,
        }
    }
}

/// A row of the `collection` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionRecord {
    pub id: String,
    /// Rich-text encoded display name.
    pub name: Option<String>,
    /// JSON-encoded schema.
    pub schema: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<String>,
}

impl CollectionRecord {
    pub fn display_name(&self) -> String {
        decode_rich_text_column(self.name.as_deref())
    }

    pub fn description_text(&self) -> String {
        decode_rich_text_column(self.description.as_deref())
    }

    pub fn schema(&self) -> CollectionSchema {
        parse_schema(self.schema.as_deref())
    }
}

fn decode_rich_text_column(raw: Option<&str>) -> String {
    raw.and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .map(|value| extract_plain_text(&value))
        .unwrap_or_default()
}
