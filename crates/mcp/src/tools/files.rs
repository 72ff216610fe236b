use filekeeper_core::{
    list_files, search_files, Config, FsError, OrganizeReport, Organizer, TextContent, TextReader,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{tool_result, ToolDefinition};
use crate::error::CallError;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "list_files".to_string(),
            description: "List files in the specified directory".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "directory": {
                        "type": "string",
                        "description": "Directory to list (~ and relative paths allowed)"
                    }
                },
                "required": ["directory"]
            }),
        },
        ToolDefinition {
            name: "search_files".to_string(),
            description: "Search files by name or extension in the directory and its subdirectories".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "directory": {
                        "type": "string",
                        "description": "Directory to search"
                    },
                    "query": {
                        "type": "string",
                        "description": "Text contained in the file name, or an extension such as .png"
                    }
                },
                "required": ["directory", "query"]
            }),
        },
        ToolDefinition {
            name: "organize_files".to_string(),
            description: "Move files to folders based on extension rules".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "directory": {
                        "type": "string",
                        "description": "Directory whose top-level files should be organized"
                    }
                },
                "required": ["directory"]
            }),
        },
        ToolDefinition {
            name: "read_file".to_string(),
            description: "Read the content of a specified file if it's a text file".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the text file"
                    }
                },
                "required": ["file_path"]
            }),
        },
    ]
}

#[derive(Debug, Deserialize)]
struct DirectoryArgs {
    directory: String,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    directory: String,
    query: String,
}

#[derive(Debug, Deserialize)]
struct ReadArgs {
    file_path: String,
}

pub fn call(name: &str, arguments: Value, config: &Config) -> Result<Value, CallError> {
    let output = match name {
        "list_files" => {
            let args: DirectoryArgs = serde_json::from_value(arguments)?;
            match list_files(&args.directory) {
                Ok(files) => json!(files),
                Err(e) => json!([error_record(name, &e)]),
            }
        }
        "search_files" => {
            let args: SearchArgs = serde_json::from_value(arguments)?;
            match search_files(&args.directory, &args.query) {
                Ok(matches) if matches.is_empty() => json!([{ "message": "No files found" }]),
                Ok(matches) => json!(matches),
                Err(e) => json!([error_record(name, &e)]),
            }
        }
        "organize_files" => {
            let args: DirectoryArgs = serde_json::from_value(arguments)?;
            match Organizer::from_config(config).organize(&args.directory) {
                Ok(report) => organize_output(&report),
                Err(e) => error_record(name, &e),
            }
        }
        "read_file" => {
            let args: ReadArgs = serde_json::from_value(arguments)?;
            match TextReader::from_config(config).read(&args.file_path) {
                Ok(text) => read_output(&text),
                Err(e) => error_record(name, &e),
            }
        }
        _ => return Err(CallError::UnknownTool(name.to_string())),
    };

    Ok(tool_result(output))
}

fn error_record(tool: &str, err: &FsError) -> Value {
    tracing::warn!(tool, error = %err, "tool failed");
    json!({ "error": err.to_string() })
}

fn organize_output(report: &OrganizeReport) -> Value {
    let mut output = json!({
        "status": "success",
        "message": report.message()
    });

    if !report.skipped.is_empty() {
        let skipped: Vec<String> = report
            .skipped
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        output["skipped"] = json!(skipped);
    }

    output
}

fn read_output(text: &TextContent) -> Value {
    json!({
        "status": "success",
        "file": text.file,
        "content": text.content
    })
}
