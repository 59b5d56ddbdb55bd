// src/config.rs
use crate::constants::{
    CACHE_FILE_NAME, CACHE_PATH_ENV, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_RECENT_WINDOW_DAYS,
    DEFAULT_RESULT_LIMIT, DEFAULT_TREE_DEPTH,
};
use crate::error::AppError;
use crate::tools::ToolName;
use crate::types::SearchScope;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Path to the desktop app's cache database (defaults to the platform location)
    #[arg(long, global = true, env = CACHE_PATH_ENV)]
    pub cache_path: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// How long to wait on a cache locked by the desktop app, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    pub busy_timeout_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve tool calls as line-delimited JSON-RPC on stdin/stdout (default)
    Serve,

    /// Search pages by keyword
    Search {
        query: String,
        /// "page" or "all"
        #[arg(long, default_value = "page")]
        scope: SearchScope,
        #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
        limit: usize,
    },

    /// List recently edited pages
    Recent {
        #[arg(long, default_value_t = DEFAULT_RESULT_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = DEFAULT_RECENT_WINDOW_DAYS, allow_negative_numbers = true)]
        days: i64,
    },

    /// Show a page's content tree
    Page {
        page_id: String,
        #[arg(long, default_value_t = DEFAULT_TREE_DEPTH)]
        depth: usize,
        /// Return full content instead of a summary
        #[arg(long, default_value_t = false)]
        full: bool,
        #[arg(long)]
        max_blocks: Option<usize>,
    },

    /// Show the ancestors of a page
    Parents { page_id: String },

    /// Show the child pages of a page
    Children {
        page_id: String,
        #[arg(long, default_value_t = DEFAULT_TREE_DEPTH)]
        depth: usize,
    },

    /// Print the tool catalogue as JSON
    Tools,
}

impl Command {
    /// The equivalent tool call, for one-shot subcommands.
    pub fn as_tool_call(&self) -> Option<(ToolName, Value)> {
        let call = match self {
            Command::Serve | Command::Tools => return None,
            Command::Search {
                query,
                scope,
                limit,
            } => (
                ToolName::Search,
                json!({"query": query, "scope": scope.as_str(), "limit": limit}),
            ),
            Command::Recent { limit, days } => {
                (ToolName::ListRecent, json!({"limit": limit, "days": days}))
            }
            Command::Page {
                page_id,
                depth,
                full,
                max_blocks,
            } => (
                ToolName::GetPage,
                json!({
                    "page_id": page_id,
                    "depth": depth,
                    "summary_mode": !full,
                    "max_blocks": max_blocks,
                }),
            ),
            Command::Parents { page_id } => (ToolName::GetParents, json!({"page_id": page_id})),
            Command::Children { page_id, depth } => (
                ToolName::GetChildren,
                json!({"page_id": page_id, "depth": depth}),
            ),
        };
        Some(call)
    }
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub cache_path: PathBuf,
    pub busy_timeout: Duration,
    pub verbose: bool,
}

impl ServerConfig {
    /// Resolves the configuration from CLI input and the platform defaults.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let cache_path = match &cli.cache_path {
            Some(path) => path.clone(),
            None => default_cache_path().ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "could not determine the cache location; pass --cache-path or set {}",
                    CACHE_PATH_ENV
                ))
            })?,
        };

        if !cache_path.is_file() {
            return Err(AppError::MissingConfiguration(format!(
                "cache database not found at {}",
                cache_path.display()
            )));
        }

        Ok(Self {
            cache_path,
            busy_timeout: Duration::from_millis(cli.busy_timeout_ms),
            verbose: cli.verbose,
        })
    }
}

/// Where the desktop app keeps its cache on this platform.
pub fn default_cache_path() -> Option<PathBuf> {
    platform_cache_path(std::env::consts::OS, |name| std::env::var(name).ok())
}

fn platform_cache_path(os: &str, var: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let app_dir = match os {
        "macos" => PathBuf::from(var("HOME")?)
            .join("Library")
            .join("Application Support")
            .join("Notion"),
        "windows" => PathBuf::from(var("APPDATA")?).join("Notion"),
        _ => var("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".config")))?
            .join("Notion"),
    };
    Some(app_dir.join(CACHE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_platform_cache_paths() {
        assert_eq!(
            platform_cache_path("macos", env(&[("HOME", "/Users/me")])),
            Some(PathBuf::from(
                "/Users/me/Library/Application Support/Notion/notion.db"
            ))
        );
        assert_eq!(
            platform_cache_path("windows", env(&[("APPDATA", "C:\\AppData")])),
            Some(PathBuf::from("C:\\AppData").join("Notion").join("notion.db"))
        );
        assert_eq!(
            platform_cache_path("linux", env(&[("HOME", "/home/me")])),
            Some(PathBuf::from("/home/me/.config/Notion/notion.db"))
        );
        assert_eq!(
            platform_cache_path("linux", env(&[("XDG_CONFIG_HOME", "/cfg"), ("HOME", "/home/me")])),
            Some(PathBuf::from("/cfg/Notion/notion.db"))
        );
        assert_eq!(platform_cache_path("linux", env(&[])), None);
    }

    #[test]
    fn test_cache_path_reads_environment_variable() {
        use clap::CommandFactory;

        let command = CommandLineInput::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "cache_path")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(CACHE_PATH_ENV)));
    }

    #[test]
    fn test_resolve_rejects_missing_file() {
        let cli = CommandLineInput::parse_from([
            "notion-cache",
            "--cache-path",
            "/definitely/not/here/notion.db",
        ]);
        let err = ServerConfig::resolve(&cli).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }

    #[test]
    fn test_subcommands_map_to_tool_calls() {
        let cli = CommandLineInput::parse_from(["notion-cache", "page", "abc", "--full"]);
        let (tool, args) = cli.command.unwrap().as_tool_call().unwrap();
        assert_eq!(tool, ToolName::GetPage);
        assert_eq!(args["summary_mode"], false);
        assert_eq!(args["max_blocks"], Value::Null);

        let cli = CommandLineInput::parse_from(["notion-cache", "search", "roadmap", "--scope", "all"]);
        let (tool, args) = cli.command.unwrap().as_tool_call().unwrap();
        assert_eq!(tool, ToolName::Search);
        assert_eq!(args["scope"], "all");
        assert_eq!(args["limit"], 20);

        let cli = CommandLineInput::parse_from(["notion-cache"]);
        assert!(cli.command.is_none());
    }
}
