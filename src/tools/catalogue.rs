// src/tools/catalogue.rs
//! Tool descriptions and JSON-schema input definitions advertised to callers.

use super::ToolName;
use serde::Serialize;
use serde_json::{json, Value};

/// One advertised tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Every tool, in a stable order.
pub fn tool_catalogue() -> Vec<ToolDescriptor> {
    ToolName::ALL.into_iter().map(describe).collect()
}

fn describe(tool: ToolName) -> ToolDescriptor {
    let (description, input_schema) = match tool {
        ToolName::Search => (
            "Search cached pages by keyword. Matches anywhere in a block's stored properties.",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Text to search for"},
                    "scope": {"type": "string", "enum": ["page", "all"], "default": "page",
                              "description": "\"page\" searches pages only, \"all\" every block type"},
                    "limit": {"type": "integer", "minimum": 0, "default": 20}
                },
                "required": ["query"]
            }),
        ),
        ToolName::ListRecent => (
            "List recently edited pages, newest first.",
            json!({
                "type": "object",
                "properties": {
                    "limit": {"type": "integer", "minimum": 0, "default": 20},
                    "days": {"type": "integer", "default": 30,
                             "description": "Only pages edited within this many days"}
                }
            }),
        ),
        ToolName::GetPage => (
            "Get a page's content tree, database schema and typed properties.",
            json!({
                "type": "object",
                "properties": {
                    "page_id": {"type": "string", "description": "Page id (dashed or not) or page URL"},
                    "depth": {"type": "integer", "minimum": 0, "default": 2},
                    "summary_mode": {"type": "boolean", "default": true,
                                     "description": "Cap blocks and text for a quick overview"},
                    "max_blocks": {"type": "integer", "minimum": 0,
                                   "description": "Override the block cap (10 in summary mode, 100 otherwise)"}
                },
                "required": ["page_id"]
            }),
        ),
        ToolName::GetParents => (
            "Get the ancestors of a page, immediate parent first and workspace root last.",
            json!({
                "type": "object",
                "properties": {
                    "page_id": {"type": "string", "description": "Page id (dashed or not) or page URL"}
                },
                "required": ["page_id"]
            }),
        ),
        ToolName::GetChildren => (
            "Get the child pages of a page as a nested tree.",
            json!({
                "type": "object",
                "properties": {
                    "page_id": {"type": "string", "description": "Page id (dashed or not) or page URL"},
                    "depth": {"type": "integer", "minimum": 0, "default": 2}
                },
                "required": ["page_id"]
            }),
        ),
    };

    ToolDescriptor {
        name: tool.as_str(),
        description,
        input_schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lists_every_tool_once() {
        let names: Vec<&str> = tool_catalogue().iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec!["search", "list_recent", "get_page", "get_parents", "get_children"]
        );
    }

    #[test]
    fn descriptors_serialize_with_input_schema_key() {
        let value = serde_json::to_value(&tool_catalogue()[0]).unwrap();
        assert_eq!(value["inputSchema"]["required"][0], "query");
    }
}
