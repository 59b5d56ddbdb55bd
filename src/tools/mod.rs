// src/tools/mod.rs
//! The tool surface: named operations with flat JSON arguments.
//!
//! Routing errors (an unknown tool name) propagate to the transport.
//! Every failure inside a known tool is folded into an `{"error": ...}`
//! payload flagged as an error, so a bad request never takes the
//! process down.

mod args;
mod catalogue;

pub use args::{GetChildrenArgs, GetPageArgs, GetParentsArgs, ListRecentArgs, SearchArgs};
pub use catalogue::{tool_catalogue, ToolDescriptor};

use crate::error::AppError;
use crate::query::QueryEngine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::str::FromStr;

/// The five operations exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    Search,
    ListRecent,
    GetPage,
    GetParents,
    GetChildren,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        Self::Search,
        Self::ListRecent,
        Self::GetPage,
        Self::GetParents,
        Self::GetChildren,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::ListRecent => "list_recent",
            Self::GetPage => "get_page",
            Self::GetParents => "get_parents",
            Self::GetChildren => "get_children",
        }
    }
}

impl FromStr for ToolName {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| AppError::UnknownTool(s.to_string()))
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running a tool: a JSON payload plus the error side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    pub payload: Value,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn success(payload: Value) -> Self {
        Self {
            payload,
            is_error: false,
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Self {
            payload: json!({ "error": err.to_string() }),
            is_error: true,
        }
    }
}

/// Routes a call by name, converting tool failures into error payloads.
pub fn call_tool(engine: &QueryEngine, name: &str, arguments: Value) -> Result<ToolOutcome, AppError> {
    let tool: ToolName = name.parse()?;
    log::debug!("Calling tool {} with {}", tool, arguments);

    match run_tool(engine, tool, arguments) {
        Ok(payload) => Ok(ToolOutcome::success(payload)),
        Err(err) => {
            log::warn!("Tool {} failed: {}", tool, err);
            Ok(ToolOutcome::failure(&err))
        }
    }
}

fn run_tool(engine: &QueryEngine, tool: ToolName, arguments: Value) -> Result<Value, AppError> {
    match tool {
        ToolName::Search => {
            let args: SearchArgs = parse_arguments(arguments)?;
            to_payload(engine.search(&args.query, args.scope, args.limit)?)
        }
        ToolName::ListRecent => {
            let args: ListRecentArgs = parse_arguments(arguments)?;
            to_payload(engine.list_recent(args.limit, args.days)?)
        }
        ToolName::GetPage => {
            let args: GetPageArgs = parse_arguments(arguments)?;
            to_payload(engine.get_page(&args.into_request())?)
        }
        ToolName::GetParents => {
            let args: GetParentsArgs = parse_arguments(arguments)?;
            to_payload(engine.get_parents(&args.page_id)?)
        }
        ToolName::GetChildren => {
            let args: GetChildrenArgs = parse_arguments(arguments)?;
            to_payload(engine.get_children(&args.page_id, args.depth)?)
        }
    }
}

/// Decodes tool arguments; a missing argument object means "all defaults".
fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, AppError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|err| AppError::invalid_argument(err.to_string()))
}

fn to_payload<T: Serialize>(result: T) -> Result<Value, AppError> {
    Ok(serde_json::to_value(result)?)
}
