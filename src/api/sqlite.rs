// src/api/sqlite.rs
//! Read-only SQLite access to the desktop cache.
//!
//! The cache is owned and written by the desktop app, which may hold
//! a write lock at any moment. The connection is opened read-only with a
//! busy timeout so reads wait out the lock instead of failing.

use super::CacheRepository;
use crate::constants::PAGE_BLOCK_TYPE;
use crate::error::AppError;
use crate::model::{BlockRecord, CollectionRecord};
use crate::types::{LookupKey, SearchScope};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;
use std::time::Duration;

/// Columns read for every block, in `block_from_row` order.
const BLOCK_COLUMNS: &str = "id, type, properties, parent_id, \
     CAST(created_time AS INTEGER), CAST(last_edited_time AS INTEGER), \
     collection_id, parent_table";

/// Read-only handle to the cache database.
///
/// `rusqlite::Connection` is `!Sync`, so it lives behind a mutex; each
/// call holds the lock only for the duration of one statement.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Opens the cache file read-only.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self, AppError> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        conn.busy_timeout(busy_timeout)?;
        log::info!(
            "Opened cache {} (busy timeout {}ms)",
            path.display(),
            busy_timeout.as_millis()
        );
        Ok(Self::from_connection(conn))
    }

    /// Wraps an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn query_blocks<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<BlockRecord>, AppError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, block_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

/// SQLite reads a negative `LIMIT` as "no limit", so clamp instead of wrapping.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn block_from_row(row: &Row<'_>) -> rusqlite::Result<BlockRecord> {
    Ok(BlockRecord {
        id: row.get(0)?,
        block_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        properties: row.get(2)?,
        parent_id: row.get(3)?,
        created_time: row.get(4)?,
        last_edited_time: row.get(5)?,
        collection_id: row.get(6)?,
        parent_table: row.get(7)?,
    })
}

fn collection_from_row(row: &Row<'_>) -> rusqlite::Result<CollectionRecord> {
    Ok(CollectionRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        schema: row.get(2)?,
        description: row.get(3)?,
        parent_id: row.get(4)?,
    })
}

impl CacheRepository for SqliteCache {
    fn find_block(&self, id: &str) -> Result<Option<BlockRecord>, AppError> {
        let key = LookupKey::new(id);
        log::debug!("find_block {}", key.canonical);
        let sql = format!(
            "SELECT {BLOCK_COLUMNS} FROM block \
             WHERE id IN (?1, ?2, ?3) AND alive = 1 LIMIT 1"
        );
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(&sql)?;
        let record = stmt
            .query_row(
                params![key.literal, key.canonical, key.stripped],
                block_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn find_collection(&self, id: &str) -> Result<Option<CollectionRecord>, AppError> {
        let key = LookupKey::new(id);
        log::debug!("find_collection {}", key.canonical);
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, schema, description, parent_id FROM collection \
             WHERE id IN (?1, ?2, ?3) AND alive = 1 LIMIT 1",
        )?;
        let record = stmt
            .query_row(
                params![key.literal, key.canonical, key.stripped],
                collection_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn child_blocks(&self, parent_id: &str) -> Result<Vec<BlockRecord>, AppError> {
        let key = LookupKey::new(parent_id);
        log::debug!("child_blocks {}", key.canonical);
        let sql = format!(
            "SELECT {BLOCK_COLUMNS} FROM block \
             WHERE parent_id IN (?1, ?2, ?3) AND alive = 1 \
             ORDER BY created_time ASC"
        );
        self.query_blocks(&sql, params![key.literal, key.canonical, key.stripped])
    }

    fn child_pages(&self, parent_id: &str) -> Result<Vec<BlockRecord>, AppError> {
        let key = LookupKey::new(parent_id);
        log::debug!("child_pages {}", key.canonical);
        let sql = format!(
            "SELECT {BLOCK_COLUMNS} FROM block \
             WHERE parent_id IN (?1, ?2, ?3) AND alive = 1 AND type = ?4 \
             ORDER BY created_time ASC"
        );
        self.query_blocks(
            &sql,
            params![key.literal, key.canonical, key.stripped, PAGE_BLOCK_TYPE],
        )
    }

    fn search_blocks(
        &self,
        pattern: &str,
        scope: SearchScope,
        limit: usize,
    ) -> Result<Vec<BlockRecord>, AppError> {
        log::debug!("search_blocks {:?} scope={} limit={}", pattern, scope.as_str(), limit);
        let type_filter = match scope {
            SearchScope::Page => "AND type = ?2",
            SearchScope::All => "",
        };
        let sql = format!(
            "SELECT {BLOCK_COLUMNS} FROM block \
             WHERE alive = 1 AND properties LIKE ?1 {type_filter} \
             ORDER BY CASE WHEN type = ?2 THEN 0 ELSE 1 END, last_edited_time DESC \
             LIMIT ?3"
        );
        self.query_blocks(&sql, params![pattern, PAGE_BLOCK_TYPE, sql_limit(limit)])
    }

    fn recent_pages(
        &self,
        edited_after_ms: i64,
        limit: usize,
    ) -> Result<Vec<BlockRecord>, AppError> {
        log::debug!("recent_pages after={} limit={}", edited_after_ms, limit);
        let sql = format!(
            "SELECT {BLOCK_COLUMNS} FROM block \
             WHERE alive = 1 AND type = ?1 AND last_edited_time > ?2 \
             ORDER BY last_edited_time DESC \
             LIMIT ?3"
        );
        self.query_blocks(&sql, params![PAGE_BLOCK_TYPE, edited_after_ms, sql_limit(limit)])
    }

    fn count_descendants(&self, root_id: &str) -> Result<usize, AppError> {
        let key = LookupKey::new(root_id);
        log::debug!("count_descendants {}", key.canonical);
        // UNION (not UNION ALL) de-duplicates, so a cyclic parent graph terminates.
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(
            "WITH RECURSIVE descendants(id) AS ( \
                 SELECT id FROM block WHERE parent_id IN (?1, ?2, ?3) AND alive = 1 \
                 UNION \
                 SELECT b.id FROM block b JOIN descendants d \
                     ON replace(b.parent_id, '-', '') = replace(d.id, '-', '') \
                 WHERE b.alive = 1 \
             ) \
             SELECT COUNT(*) FROM descendants",
        )?;
        let count: i64 = stmt.query_row(
            params![key.literal, key.canonical, key.stripped],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as usize)
    }
}
