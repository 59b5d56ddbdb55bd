// src/tools/args.rs
//! Typed arguments of each tool, with the documented defaults.

use crate::constants::{DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_RESULT_LIMIT, DEFAULT_TREE_DEPTH};
use crate::query::PageRequest;
use crate::types::SearchScope;
use serde::Deserialize;

fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_days() -> i64 {
    DEFAULT_RECENT_WINDOW_DAYS
}

fn default_depth() -> usize {
    DEFAULT_TREE_DEPTH
}

fn default_summary_mode() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchArgs {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub scope: SearchScope,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListRecentArgs {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_days")]
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetPageArgs {
    #[serde(default)]
    pub page_id: String,
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default = "default_summary_mode")]
    pub summary_mode: bool,
    #[serde(default)]
    pub max_blocks: Option<usize>,
}

impl GetPageArgs {
    pub fn into_request(self) -> PageRequest {
        PageRequest {
            page_id: self.page_id,
            depth: self.depth,
            summary_mode: self.summary_mode,
            max_blocks: self.max_blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetParentsArgs {
    #[serde(default)]
    pub page_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetChildrenArgs {
    #[serde(default)]
    pub page_id: String,
    #[serde(default = "default_depth")]
    pub depth: usize,
}
