//! Cache access — the ability to read rows from the desktop app's cache.
//!
//! Business logic depends on [`CacheRepository`], never on SQL details.
//! Every method is read-only, excludes tombstoned rows, and matches
//! identifiers in any of their dashed/undashed spellings.

mod sqlite;

pub use sqlite::SqliteCache;

use crate::error::AppError;
use crate::model::{BlockRecord, CollectionRecord};
use crate::types::SearchScope;

/// The ability to read live blocks and collections from the cache.
pub trait CacheRepository: Send + Sync {
    /// Resolves a live block by identifier.
    fn find_block(&self, id: &str) -> Result<Option<BlockRecord>, AppError>;

    /// Resolves a live collection by identifier.
    fn find_collection(&self, id: &str) -> Result<Option<CollectionRecord>, AppError>;

    /// Live direct children of any type, oldest first.
    fn child_blocks(&self, parent_id: &str) -> Result<Vec<BlockRecord>, AppError>;

    /// Live direct children of type page, oldest first.
    fn child_pages(&self, parent_id: &str) -> Result<Vec<BlockRecord>, AppError>;

    /// Live blocks whose property blob matches a `LIKE` pattern.
    ///
    /// Pages sort before other types, then most recently edited first.
    fn search_blocks(
        &self,
        pattern: &str,
        scope: SearchScope,
        limit: usize,
    ) -> Result<Vec<BlockRecord>, AppError>;

    /// Live pages edited strictly after `edited_after_ms`, newest first.
    fn recent_pages(&self, edited_after_ms: i64, limit: usize)
        -> Result<Vec<BlockRecord>, AppError>;

    /// Number of live transitive descendants of a block, unbounded.
    fn count_descendants(&self, root_id: &str) -> Result<usize, AppError>;
}
