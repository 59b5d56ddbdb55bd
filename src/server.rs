// src/server.rs
//! Line-delimited JSON-RPC 2.0 transport over a reader/writer pair.
//!
//! One request per line, one response per line. Requests are handled
//! strictly in order; notifications (requests without an `id`) are
//! processed but never answered.

use crate::error::AppError;
use crate::query::QueryEngine;
use crate::tools::{call_tool, tool_catalogue};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, Write};

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Protocol revision reported during the handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl Response {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Serves requests from `reader` until end of input.
///
/// Lines are read as raw bytes: a line that is not valid UTF-8 gets a parse
/// error reply like any other malformed request. Only I/O failures end the loop.
pub fn serve<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    engine: &QueryEngine,
) -> Result<(), AppError> {
    log::info!("Serving tool calls ({} {})", SERVER_NAME, SERVER_VERSION);

    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        if let Some(response) = handle_line(&line, engine) {
            serde_json::to_writer(&mut writer, &response)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }

    log::info!("Input closed; shutting down");
    Ok(())
}

fn handle_line(line: &[u8], engine: &QueryEngine) -> Option<Response> {
    let value: Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Unparsable request: {}", err);
            return Some(Response::error(Value::Null, PARSE_ERROR, err.to_string()));
        }
    };

    let request: Request = match serde_json::from_value(value.clone()) {
        Ok(request) => request,
        Err(err) => {
            let id = value.get("id").cloned().unwrap_or(Value::Null);
            return Some(Response::error(id, INVALID_REQUEST, err.to_string()));
        }
    };

    log::debug!("<- {} (id {:?})", request.method, request.id);
    let outcome = dispatch(&request.method, request.params, engine);

    let id = request.id?;
    Some(match outcome {
        Ok(result) => Response::result(id, result),
        Err((code, message)) => Response::error(id, code, message),
    })
}

fn dispatch(method: &str, params: Value, engine: &QueryEngine) -> Result<Value, (i64, String)> {
    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"tools": {}},
            "serverInfo": {"name": SERVER_NAME, "version": SERVER_VERSION}
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": tool_catalogue() })),
        "tools/call" => {
            let params: ToolCallParams = serde_json::from_value(params)
                .map_err(|err| (INVALID_PARAMS, err.to_string()))?;
            let outcome = call_tool(engine, &params.name, params.arguments).map_err(|err| match err {
                AppError::UnknownTool(_) => (INVALID_PARAMS, err.to_string()),
                other => (INTERNAL_ERROR, other.to_string()),
            })?;
            let text = serde_json::to_string_pretty(&outcome.payload)
                .map_err(|err| (INTERNAL_ERROR, err.to_string()))?;
            Ok(json!({
                "content": [{"type": "text", "text": text}],
                "isError": outcome.is_error
            }))
        }
        method if method.starts_with("notifications/") => Ok(Value::Null),
        other => Err((METHOD_NOT_FOUND, format!("Method not found: {}", other))),
    }
}
