//! MCP Server implementation.
//!
//! `McpServer` answers one JSON-RPC message at a time. It owns the tool
//! dispatcher and knows the handful of MCP methods a tools-only server needs:
//! `initialize`, `ping`, `tools/list` and `tools/call`. Transports feed it
//! messages and write back whatever it returns.

use rmcp::ErrorData as McpError;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::config::Config;
use super::error::Result;
use super::transport::message::{
    CallToolParams, JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse,
};
use crate::domains::search::{PerplexityClient, SearchClient};
use crate::domains::tools::{Dispatcher, ToolRegistry, build_registry};

/// MCP protocol revision advertised during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Resolves and runs tool calls.
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a server backed by the real Perplexity client.
    pub fn new(config: Config) -> Result<Self> {
        let client = PerplexityClient::new(config.perplexity.clone())?;
        Ok(Self::with_search_client(config, Arc::new(client)))
    }

    /// Create a server whose `search` tool uses the given client.
    pub fn with_search_client(config: Config, client: Arc<dyn SearchClient>) -> Self {
        Self::with_registry(config, build_registry(client))
    }

    /// Create a server exposing exactly the tools in `registry`.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one raw line of input.
    ///
    /// Returns `None` when nothing must be written back (notifications).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding unparseable message: {}", e);
                return Some(JsonRpcResponse::parse_error(e));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Malformed JSON-RPC message: {}", e);
                Some(JsonRpcResponse::invalid_request(
                    id,
                    format!("Invalid Request: {e}"),
                ))
            }
        }
    }

    /// Handle one decoded JSON-RPC message.
    #[instrument(skip_all, fields(method = %request.method))]
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        if request.jsonrpc != JSONRPC_VERSION {
            warn!("Unsupported jsonrpc version: {:?}", request.jsonrpc);
            return Some(JsonRpcResponse::invalid_request(
                id,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::method_not_found(id, method)
            }
        };

        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("Client sent initialized notification"),
            method => debug!("Ignoring notification: {}", method),
        }
    }

    fn handle_initialize(&self, id: Value) -> JsonRpcResponse {
        info!("Processing initialize request");

        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": self.name(),
                    "version": self.version()
                }
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = self.dispatcher.list_tools();
        debug!("Listing {} tool(s)", tools.len());

        match serde_json::to_value(&tools) {
            Ok(tools) => JsonRpcResponse::success(id, json!({ "tools": tools })),
            Err(e) => JsonRpcResponse::internal_error(id, format!("Failed to list tools: {e}")),
        }
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::invalid_params(id, format!("Invalid tools/call params: {e}"));
            }
            None => return JsonRpcResponse::invalid_params(id, "Missing params"),
        };

        let outcome = self
            .dispatcher
            .call_tool(&params.name, params.arguments)
            .await
            .and_then(|result| {
                serde_json::to_value(result).map_err(|e| {
                    McpError::internal_error(format!("Failed to serialize result: {e}"), None)
                })
            });

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => JsonRpcResponse::from_error(id, err),
        }
    }
}
