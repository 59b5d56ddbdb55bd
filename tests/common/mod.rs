// tests/common/mod.rs
//! A throwaway cache database shaped like the desktop app's.

#![allow(dead_code)]

use notion_cache::{QueryEngine, SqliteCache};
use rusqlite::{params, Connection};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const DAY_MS: i64 = 86_400_000;

/// Writable fixture; the engine under test opens its own read-only handle.
pub struct CacheFixture {
    _dir: TempDir,
    pub path: PathBuf,
    conn: Connection,
}

impl CacheFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("notion.db");
        let conn = Connection::open(&path).expect("create cache db");
        conn.execute_batch(
            "CREATE TABLE block (
                 id TEXT PRIMARY KEY, type TEXT, properties TEXT, parent_id TEXT,
                 created_time REAL, last_edited_time REAL, alive INTEGER,
                 collection_id TEXT, parent_table TEXT
             );
             CREATE TABLE collection (
                 id TEXT PRIMARY KEY, name TEXT, schema TEXT, description TEXT,
                 parent_id TEXT, alive INTEGER
             );",
        )
        .expect("create cache schema");
        Self {
            _dir: dir,
            path,
            conn,
        }
    }

    pub fn engine(&self) -> QueryEngine {
        let cache = SqliteCache::open(&self.path, Duration::from_millis(200)).expect("open cache");
        QueryEngine::new(Arc::new(cache))
    }

    pub fn insert(&self, block: Block) -> &Self {
        self.conn
            .execute(
                "INSERT INTO block (id, type, properties, parent_id, created_time,
                                    last_edited_time, alive, collection_id, parent_table)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    block.id,
                    block.block_type,
                    block.properties.map(|p| p.to_string()),
                    block.parent_id,
                    block.created,
                    block.edited,
                    block.alive as i64,
                    block.collection_id,
                    block.parent_table,
                ],
            )
            .expect("insert block");
        self
    }

    pub fn insert_collection(&self, id: &str, name: &str, schema: Value, description: Option<Value>) {
        self.conn
            .execute(
                "INSERT INTO collection (id, name, schema, description, parent_id, alive)
                 VALUES (?1, ?2, ?3, ?4, NULL, 1)",
                params![
                    id,
                    json!([[name]]).to_string(),
                    schema.to_string(),
                    description.map(|d| d.to_string()),
                ],
            )
            .expect("insert collection");
    }

    pub fn tombstone_collection(&self, id: &str) {
        self.conn
            .execute("UPDATE collection SET alive = 0 WHERE id = ?1", params![id])
            .expect("tombstone collection");
    }
}

/// One row of the `block` table.
pub struct Block {
    pub id: String,
    pub block_type: String,
    pub properties: Option<Value>,
    pub parent_id: Option<String>,
    pub created: i64,
    pub edited: i64,
    pub alive: bool,
    pub collection_id: Option<String>,
    pub parent_table: Option<String>,
}

impl Block {
    pub fn page(id: &str, title: &str) -> Self {
        Self::new(id, "page").title(title)
    }

    pub fn text(id: &str, text: &str) -> Self {
        Self::new(id, "text").title(text)
    }

    pub fn new(id: &str, block_type: &str) -> Self {
        Self {
            id: id.to_string(),
            block_type: block_type.to_string(),
            properties: None,
            parent_id: None,
            created: 0,
            edited: 0,
            alive: true,
            collection_id: None,
            parent_table: None,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.properties = Some(json!({ "title": [[title]] }));
        self
    }

    pub fn properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn created(mut self, millis: i64) -> Self {
        self.created = millis;
        self
    }

    pub fn edited(mut self, millis: i64) -> Self {
        self.edited = millis;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.alive = false;
        self
    }

    pub fn in_collection(mut self, collection_id: &str) -> Self {
        self.parent_id = Some(collection_id.to_string());
        self.parent_table = Some("collection".to_string());
        self
    }
}

/// A 32-hex-digit id whose digits encode `n`, in dashed form.
pub fn dashed_id(n: u32) -> String {
    let hex = format!("{:032x}", n);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

pub fn undashed(id: &str) -> String {
    id.replace('-', "")
}
