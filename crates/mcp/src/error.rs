use thiserror::Error;

use crate::transport::INVALID_PARAMS;

/// Protocol-level failures of a tool, resource or prompt call. Filesystem
/// failures are never reported this way; they come back as `{"error": ...}`
/// tool output.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("unknown prompt: {0}")]
    UnknownPrompt(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),
    #[error("missing {0}")]
    Missing(&'static str),
}

impl CallError {
    pub fn code(&self) -> i64 {
        INVALID_PARAMS
    }
}
