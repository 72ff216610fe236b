mod files;

use filekeeper_core::Config;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CallError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDefinition> {
    files::definitions()
}

pub fn call_tool(name: &str, arguments: Value, config: &Config) -> Result<Value, CallError> {
    match name {
        "list_files" | "search_files" | "organize_files" | "read_file" => {
            files::call(name, arguments, config)
        }
        _ => Err(CallError::UnknownTool(name.to_string())),
    }
}

/// Wrap a tool's JSON output as MCP text content. Outputs carrying an
/// `error` key, or a list led by one, are flagged with `isError`.
fn tool_result(value: Value) -> Value {
    let is_error = match &value {
        Value::Array(items) => items.first().is_some_and(|v| v.get("error").is_some()),
        other => other.get("error").is_some(),
    };
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());

    json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": is_error
    })
}
