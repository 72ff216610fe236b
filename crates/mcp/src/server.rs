use filekeeper_core::Config;
use serde_json::{json, Value};

use crate::error::CallError;
use crate::prompts::{get_prompt, list_prompts};
use crate::resources::{list_resources, read_resource};
use crate::tools::{call_tool, list_tools};
use crate::transport::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
};

const SERVER_NAME: &str = "filekeeper-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer {
    initialized: bool,
    config: Config,
}

impl McpServer {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            initialized: false,
            config,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn handle_request(&mut self, input: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "unparseable request");
                return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error").encode());
            }
        };

        tracing::debug!(method = %request.method, "request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                return None;
            }
            "tools/list" => JsonRpcResponse::success(
                request.id.clone(),
                json!({ "tools": list_tools() }),
            ),
            "tools/call" => self.handle_tools_call(&request),
            "resources/list" => JsonRpcResponse::success(
                request.id.clone(),
                json!({ "resources": list_resources() }),
            ),
            "resources/read" => self.handle_resources_read(&request),
            "prompts/list" => JsonRpcResponse::success(
                request.id.clone(),
                json!({ "prompts": list_prompts() }),
            ),
            "prompts/get" => self.handle_prompts_get(&request),
            "ping" => JsonRpcResponse::success(request.id.clone(), json!({})),
            _ => JsonRpcResponse::error(
                request.id.clone(),
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        if request.is_notification() {
            return None;
        }

        Some(response.encode())
    }

    fn handle_initialize(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {},
                    "prompts": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        self.with_named_params(request, |name, arguments| {
            call_tool(name, arguments, &self.config)
        })
    }

    fn handle_prompts_get(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        self.with_named_params(request, get_prompt)
    }

    fn handle_resources_read(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = &request.params else {
            return JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, "Missing params");
        };

        let result = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or(CallError::Missing("uri"))
            .and_then(|uri| read_resource(uri, &self.config));

        respond(request, result)
    }

    /// Shared shape of `tools/call` and `prompts/get`: a `name` plus an
    /// optional `arguments` object.
    fn with_named_params<F>(&self, request: &JsonRpcRequest, call: F) -> JsonRpcResponse
    where
        F: FnOnce(&str, Value) -> Result<Value, CallError>,
    {
        let Some(params) = &request.params else {
            return JsonRpcResponse::error(request.id.clone(), INVALID_PARAMS, "Missing params");
        };

        let result = match params.get("name").and_then(Value::as_str) {
            Some(name) => {
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                call(name, arguments)
            }
            None => Err(CallError::Missing("name")),
        };

        respond(request, result)
    }
}

fn respond(request: &JsonRpcRequest, result: Result<Value, CallError>) -> JsonRpcResponse {
    match result {
        Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
        Err(e) => {
            tracing::warn!(method = %request.method, error = %e, "call rejected");
            JsonRpcResponse::error(request.id.clone(), e.code(), e.to_string())
        }
    }
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}
