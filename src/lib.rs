// src/lib.rs
//! notion-cache library — read-only queries over the Notion desktop app's local cache.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ValidationError`
//! - **Configuration** — `ServerConfig`, `CommandLineInput`
//! - **Storage** — `CacheRepository`, `SqliteCache`
//! - **Queries** — `QueryEngine`, `PageRequest`
//! - **Decoding** — rich-text extraction and property projection
//! - **Tools** — `call_tool`, `tool_catalogue`, and the JSON-RPC `serve` loop

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod query;
pub mod server;
pub mod tools;
pub mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{Command, CommandLineInput, ServerConfig};

// --- Storage ---
pub use crate::api::{CacheRepository, SqliteCache};

// --- Domain Model ---
pub use crate::model::{
    AncestorNode, BlockRecord, ChildPageNode, CollectionRecord, CollectionSchema, ContentNode,
    DatabaseInfo, PageContent, PropertyDefinition, RecentPage, SearchHit, SummaryInfo,
};

// --- Domain Types ---
pub use crate::types::{canonicalize, page_url, strip, SearchQuery, SearchScope};

// --- Decoding ---
pub use crate::formatting::properties::{project, ProjectedProperty, ProjectedValue};
pub use crate::formatting::rich_text::{extract_all_text, extract_plain_text, extract_title};

// --- Queries ---
pub use crate::query::{PageRequest, QueryEngine};

// --- Tools ---
pub use crate::server::serve;
pub use crate::tools::{call_tool, tool_catalogue, ToolName, ToolOutcome};
