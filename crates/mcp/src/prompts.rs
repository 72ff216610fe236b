use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CallError;

pub const FILE_SUMMARY_PROMPT: &str = "format_file_summary";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    pub name: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

pub fn list_prompts() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: FILE_SUMMARY_PROMPT.to_string(),
        description: "Summarize listed files or display file content".to_string(),
        arguments: vec![PromptArgument {
            name: "data".to_string(),
            description: "JSON output of list_files, search_files or read_file".to_string(),
            required: true,
        }],
    }]
}

#[derive(Debug, Deserialize)]
struct SummaryArgs {
    data: String,
}

pub fn get_prompt(name: &str, arguments: Value) -> Result<Value, CallError> {
    match name {
        FILE_SUMMARY_PROMPT => {
            let args: SummaryArgs = serde_json::from_value(arguments)?;
            let data: Value = serde_json::from_str(&args.data)?;
            let (user, assistant) = file_summary(&data);

            Ok(json!({
                "description": "File summary",
                "messages": [message("user", user), message("assistant", assistant)]
            }))
        }
        _ => Err(CallError::UnknownPrompt(name.to_string())),
    }
}

fn message(role: &str, text: String) -> Value {
    json!({
        "role": role,
        "content": {
            "type": "text",
            "text": text
        }
    })
}

fn field<'a>(value: &'a Value, key: &str, default: &'a str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// User and assistant turns for a tool output: a file list gets a summary
/// request, an error gets reported, anything else is shown as file content.
fn file_summary(data: &Value) -> (String, String) {
    if let Value::Array(items) = data {
        let summary: Vec<String> = items
            .iter()
            .filter(|item| item.is_object() && item.get("error").is_none())
            .map(|item| {
                format!(
                    "- {} ({})",
                    field(item, "name", "Unknown"),
                    field(item, "extension", "")
                )
            })
            .collect();
        return (
            format!(
                "Summarize these files and suggest organization:\n{}",
                summary.join("\n")
            ),
            "I'll provide a clear summary and suggest how to organize these files.".to_string(),
        );
    }

    if let Some(error) = data.get("error") {
        let error = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return (
            format!("Report this error: {error}"),
            "I'll explain the error clearly.".to_string(),
        );
    }

    let file = field(data, "file", "Unknown");
    (
        format!(
            "Display the content of {file} clearly, summarizing if too long:\n{}",
            field(data, "content", "")
        ),
        format!("I'll present the content of {file} in a readable format, with a summary if needed."),
    )
}
