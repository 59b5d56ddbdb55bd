// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story
//! of how the cache is queried: how many results come back, how much
//! of a page is materialized, how long a locked cache is waited on.

// ---------------------------------------------------------------------------
// Result-set boundaries
// ---------------------------------------------------------------------------

/// Default number of hits returned by `search` and `list_recent`.
pub const DEFAULT_RESULT_LIMIT: usize = 20;

/// Default recency window, in days, for `list_recent`.
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 30;

/// Milliseconds in one day; timestamps in the cache are epoch milliseconds.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

// ---------------------------------------------------------------------------
// Page materialization boundaries
// ---------------------------------------------------------------------------

/// Default subtree depth for `get_page` and `get_children`.
pub const DEFAULT_TREE_DEPTH: usize = 2;

/// Block cap applied in summary mode when the caller gives no explicit cap.
pub const SUMMARY_MAX_BLOCKS: usize = 10;

/// Block cap applied in full mode when the caller gives no explicit cap.
pub const FULL_MAX_BLOCKS: usize = 100;

/// Per-block text cap in summary mode.
pub const SUMMARY_TEXT_LENGTH: usize = 200;

/// Per-block text cap in full mode.
pub const FULL_TEXT_LENGTH: usize = 500;

/// Appended to text cut short by `truncate`.
pub const ELLIPSIS: &str = "...";

// ---------------------------------------------------------------------------
// Cache encoding
// ---------------------------------------------------------------------------

/// Placeholder glyph the desktop app stores as the text of an inline page
/// reference. It carries no readable content.
pub const PAGE_REFERENCE_GLYPH: &str = "\u{2023}";

/// Base of every page link handed back to callers; the undashed id is appended.
pub const PAGE_URL_BASE: &str = "https://www.notion.so/";

/// Block type tag of pages.
pub const PAGE_BLOCK_TYPE: &str = "page";

/// `parent_table` value marking a block whose parent is a collection.
pub const COLLECTION_PARENT_TABLE: &str = "collection";

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// How long a read waits on a cache locked by the desktop app before failing.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Environment variable naming the cache file.
pub const CACHE_PATH_ENV: &str = "NOTION_CACHE_PATH";

/// File name of the desktop app's cache database.
pub const CACHE_FILE_NAME: &str = "notion.db";
