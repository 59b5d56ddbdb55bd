// src/query/mod.rs
//! The query engine: every caller-facing read operation over the cache.
//!
//! The engine owns nothing but a handle to the repository. Each operation
//! performs its reads sequentially, decodes the rows, and returns a
//! bounded, serializable result.

mod ancestors;
mod tree;
mod visited;

pub use ancestors::walk_ancestors;
pub use tree::{child_page_forest, materialize_children, BlockBudget, TreeLimits};

use crate::api::CacheRepository;
use crate::constants::{
    DEFAULT_TREE_DEPTH, FULL_MAX_BLOCKS, FULL_TEXT_LENGTH, MILLIS_PER_DAY, SUMMARY_MAX_BLOCKS,
    SUMMARY_TEXT_LENGTH,
};
use crate::error::AppError;
use crate::formatting::properties::{format_schema_for_display, project, ProjectedProperties};
use crate::model::{
    AncestorNode, BlockRecord, ChildPageNode, DatabaseInfo, PageContent, RecentPage, SearchHit,
    SummaryInfo,
};
use crate::types::{
    canonicalize, iso_timestamp, page_url, parse_identifier_input, SearchQuery, SearchScope,
};
use std::sync::Arc;

/// Parameters of a `get_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_id: String,
    pub depth: usize,
    pub summary_mode: bool,
    pub max_blocks: Option<usize>,
}

impl PageRequest {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            depth: DEFAULT_TREE_DEPTH,
            summary_mode: true,
            max_blocks: None,
        }
    }

    /// Effective limits: an explicit block cap wins over the mode default.
    pub fn limits(&self) -> TreeLimits {
        let (default_blocks, text_length) = if self.summary_mode {
            (SUMMARY_MAX_BLOCKS, SUMMARY_TEXT_LENGTH)
        } else {
            (FULL_MAX_BLOCKS, FULL_TEXT_LENGTH)
        };
        TreeLimits {
            depth: self.depth,
            max_blocks: self.max_blocks.unwrap_or(default_blocks),
            text_length,
        }
    }
}

/// Read-only query operations over a cache repository.
#[derive(Clone)]
pub struct QueryEngine {
    repo: Arc<dyn CacheRepository>,
}

impl QueryEngine {
    pub fn new(repo: Arc<dyn CacheRepository>) -> Self {
        Self { repo }
    }

    /// Keyword search over property blobs.
    pub fn search(
        &self,
        query: &str,
        scope: SearchScope,
        limit: usize,
    ) -> Result<Vec<SearchHit>, AppError> {
        let query = SearchQuery::new(query)?;
        let rows = self
            .repo
            .search_blocks(&query.like_pattern(), scope, limit)?;
        log::info!("search {:?} ({}) -> {} hits", query.as_str(), scope.as_str(), rows.len());

        Ok(rows.into_iter().map(search_hit).collect())
    }

    /// Pages edited within the last `window_days`, newest first.
    pub fn list_recent(&self, limit: usize, window_days: i64) -> Result<Vec<RecentPage>, AppError> {
        self.list_recent_as_of(chrono::Utc::now().timestamp_millis(), limit, window_days)
    }

    /// [`list_recent`](Self::list_recent) against a fixed clock.
    ///
    /// Untitled pages are dropped after the limit is applied, so fewer than
    /// `limit` pages can come back even when more qualify.
    pub fn list_recent_as_of(
        &self,
        now_ms: i64,
        limit: usize,
        window_days: i64,
    ) -> Result<Vec<RecentPage>, AppError> {
        let cutoff = now_ms.saturating_sub(window_days.saturating_mul(MILLIS_PER_DAY));
        let rows = self.repo.recent_pages(cutoff, limit)?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let title = row.title();
                if title.is_empty() {
                    return None;
                }
                Some(RecentPage {
                    id: canonicalize(&row.id),
                    url: page_url(&row.id),
                    last_edited: iso_timestamp(row.last_edited_time),
                    title,
                })
            })
            .collect())
    }

    /// A page with its bounded content tree and any collection details.
    pub fn get_page(&self, request: &PageRequest) -> Result<PageContent, AppError> {
        let page_id = parse_identifier_input(&request.page_id, "page_id")?;
        let page = self
            .repo
            .find_block(&page_id)?
            .ok_or_else(|| AppError::page_not_found(&page_id))?;

        let limits = request.limits();
        let mut budget = BlockBudget::new(limits.max_blocks);
        let content = materialize_children(self.repo.as_ref(), &page.id, &limits, &mut budget)?;
        log::debug!(
            "get_page {}: {} blocks emitted (cap {}, depth {})",
            page.id,
            budget.emitted(),
            limits.max_blocks,
            limits.depth
        );

        let summary = if request.summary_mode {
            Some(self.summarize(&page, budget.emitted())?)
        } else {
            None
        };

        let (database, properties) = self.collection_details(&page)?;

        Ok(PageContent {
            id: canonicalize(&page.id),
            title: page.title(),
            url: page_url(&page.id),
            created: iso_timestamp(page.created_time),
            last_edited: iso_timestamp(page.last_edited_time),
            block_type: page.block_type,
            content,
            summary,
            database,
            properties,
        })
    }

    /// Ancestors of a page, immediate parent first.
    pub fn get_parents(&self, page_id: &str) -> Result<Vec<AncestorNode>, AppError> {
        let page_id = parse_identifier_input(page_id, "page_id")?;
        walk_ancestors(self.repo.as_ref(), &page_id)
    }

    /// Nested child pages of a page, `depth` levels deep.
    pub fn get_children(&self, page_id: &str, depth: usize) -> Result<Vec<ChildPageNode>, AppError> {
        let page_id = parse_identifier_input(page_id, "page_id")?;
        child_page_forest(self.repo.as_ref(), &page_id, depth)
    }

    fn summarize(&self, page: &BlockRecord, emitted: usize) -> Result<SummaryInfo, AppError> {
        let total_blocks = self.repo.count_descendants(&page.id)?;
        let hint = (emitted < total_blocks).then(|| {
            format!(
                "Showing {} of {} blocks. Call get_page with summary_mode=false or a larger max_blocks to see more.",
                emitted, total_blocks
            )
        });
        Ok(SummaryInfo {
            summary: true,
            total_blocks,
            hint,
        })
    }

    /// Collection info and projected properties; a missing collection is not an error.
    fn collection_details(
        &self,
        page: &BlockRecord,
    ) -> Result<(Option<DatabaseInfo>, Option<ProjectedProperties>), AppError> {
        let Some(collection_id) = page.collection_reference() else {
            return Ok((None, None));
        };
        let Some(collection) = self.repo.find_collection(collection_id)? else {
            log::debug!("Page {} references missing collection {}", page.id, collection_id);
            return Ok((None, None));
        };

        let schema = collection.schema();
        let description = Some(collection.description_text()).filter(|d| !d.is_empty());
        let database = DatabaseInfo {
            id: canonicalize(&collection.id),
            name: collection.display_name(),
            description,
            schema: format_schema_for_display(&schema),
        };
        let properties = project(page.properties.as_deref(), &schema);

        Ok((Some(database), properties))
    }
}

fn search_hit(row: BlockRecord) -> SearchHit {
    let title = row.title();
    let title = if title.is_empty() {
        format!("[{}]", row.block_type)
    } else {
        title
    };
    let url = if row.is_page() {
        page_url(&row.id)
    } else {
        String::new()
    };
    SearchHit {
        id: canonicalize(&row.id),
        title,
        last_edited: iso_timestamp(row.last_edited_time),
        url,
        block_type: row.block_type,
    }
}
