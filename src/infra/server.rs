//! The MCP dispatcher: a single-threaded read-handle-write loop over a
//! line-framed transport, plus the protocol lifecycle around it.

use std::str::FromStr;

use serde_json::json;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::core::error::ServerError;
use crate::core::rpc::{self, code, RpcRequest};
use crate::core::tool::Tool;
use crate::core::value::Value;
use crate::infra::transport::{framed_lines, FrameWriter};
use crate::tools::registry::{RegistryError, ToolRegistry};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const DEFAULT_READ_CAPACITY: usize = 64 * 1024;

/// MCP log severity floor, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0}")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(LogLevel::Error),
            // MCP spells it "warning"; accept the short form too.
            "warning" | "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(ParseLogLevelError(other.to_string())),
        }
    }
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// A minimal MCP server: tool registry plus protocol state.
///
/// Strictly sequential: one request is read, handled, and answered before
/// the next is read, so responses always leave in request order and no
/// handler ever overlaps another.
pub struct McpServer {
    name: String,
    version: String,
    registry: ToolRegistry,
    min_log_level: LogLevel,
    initialized: bool,
    read_capacity: usize,
    trace: Option<std::fs::File>,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registry: ToolRegistry::new(),
            min_log_level: LogLevel::Info,
            initialized: false,
            read_capacity: DEFAULT_READ_CAPACITY,
            trace: None,
        }
    }

    pub fn with_read_capacity(mut self, capacity: usize) -> Self {
        self.read_capacity = capacity;
        self
    }

    /// Append every inbound and outbound frame to `path`.
    pub fn with_trace_file(mut self, path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
        self.trace = Some(file);
        Ok(self)
    }

    /// Tools must be registered before serving; the registry is read-only
    /// once the loop starts.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.registry.register(tool)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn min_log_level(&self) -> LogLevel {
        self.min_log_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_log_level
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub async fn serve_stdio(&mut self) -> Result<(), ServerError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Run the dispatch loop until the reader reaches EOF.
    pub async fn serve<R, W>(&mut self, reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = framed_lines(reader, self.read_capacity);
        let mut out = FrameWriter::new(writer);
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            self.trace_frame("recv", &line);
            self.dispatch_line(&line, &mut out).await?;
        }
        if self.should_log(LogLevel::Info) {
            tracing::info!("transport closed, shutting down");
        }
        Ok(())
    }

    async fn dispatch_line<W>(
        &mut self,
        line: &str,
        out: &mut FrameWriter<W>,
    ) -> Result<(), ServerError>
    where
        W: AsyncWrite + Unpin,
    {
        let req: RpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                if self.should_log(LogLevel::Warn) {
                    tracing::warn!(error = %e, "malformed frame");
                }
                let resp = rpc::err(
                    Value::Null,
                    code::PARSE_ERROR,
                    "Parse error",
                    Some(Value::String(e.to_string())),
                );
                return self.emit(out, &resp).await;
            }
        };

        let Some(id) = req.id else {
            self.handle_notification(&req.method);
            return Ok(());
        };

        if self.should_log(LogLevel::Debug) {
            tracing::debug!(method = %req.method, id = ?id, "dispatch");
        }

        if req.jsonrpc != "2.0" {
            let resp = rpc::err(id, code::INVALID_REQUEST, "Invalid request", None);
            return self.emit(out, &resp).await;
        }
        if let Some(params) = &req.params {
            if !params.is_object() && !params.is_array() {
                let resp = rpc::err(id, code::INVALID_REQUEST, "Invalid request", None);
                return self.emit(out, &resp).await;
            }
        }

        match req.method.as_str() {
            "initialize" => {
                let result = self.initialize_result();
                self.initialized = true;
                self.emit(out, &rpc::ok(id, result)).await?;
                self.emit(out, &rpc::notify("initialized")).await?;
                Ok(())
            }
            _ if !self.initialized => {
                let resp =
                    rpc::err(id, code::SERVER_NOT_INITIALIZED, "Server not initialized", None);
                self.emit(out, &resp).await
            }
            "tools/list" => {
                let tools: Vec<Value> = self
                    .registry
                    .iter()
                    .map(|t| {
                        json!({
                            "name": t.name(),
                            "description": t.description(),
                            "inputSchema": t.input_schema(),
                        })
                    })
                    .collect();
                self.emit(out, &rpc::ok(id, json!({ "tools": tools }))).await
            }
            "tools/call" => self.handle_tools_call(id, req.params, out).await,
            "logging/setLevel" => self.handle_set_level(id, req.params, out).await,
            other => {
                let resp = rpc::err(
                    id,
                    code::METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                    None,
                );
                self.emit(out, &resp).await
            }
        }
    }

    fn handle_notification(&self, method: &str) {
        if !self.should_log(LogLevel::Debug) {
            return;
        }
        match method {
            "initialized" | "notifications/initialized" => {
                tracing::debug!("client finished initialization");
            }
            other => {
                // Notifications never get responses, not even errors.
                tracing::debug!(method = %other, "ignoring unknown notification");
            }
        }
    }

    async fn handle_tools_call<W>(
        &mut self,
        id: Value,
        params: Option<Value>,
        out: &mut FrameWriter<W>,
    ) -> Result<(), ServerError>
    where
        W: AsyncWrite + Unpin,
    {
        let params = match params {
            Some(Value::Object(map)) => map,
            _ => {
                let resp = rpc::err(id, code::INVALID_PARAMS, "Invalid params", None);
                return self.emit(out, &resp).await;
            }
        };

        let Some(name) = params.get("name").and_then(Value::as_str) else {
            let resp = rpc::err(id, code::INVALID_PARAMS, "Missing tool name", None);
            return self.emit(out, &resp).await;
        };
        let Some(tool) = self.registry.get(name) else {
            let resp = rpc::err(id, code::METHOD_NOT_FOUND, "Tool not found", None);
            return self.emit(out, &resp).await;
        };
        let Some(arguments) = params.get("arguments") else {
            let resp = rpc::err(id, code::INVALID_PARAMS, "Missing arguments", None);
            return self.emit(out, &resp).await;
        };

        let token = params.get("progressToken").cloned();
        if let Some(token) = &token {
            self.emit(out, &rpc::progress(token.clone(), 0, None)).await?;
        }

        let outcome = tool.call(arguments).await;

        if let Some(token) = &token {
            self.emit(out, &rpc::progress(token.clone(), 100, Some(100))).await?;
        }

        let (payload, is_error) = match outcome {
            Ok(value) => (value, false),
            Err(e) => {
                if self.should_log(LogLevel::Warn) {
                    tracing::warn!(tool = name, error = %e, "tool call failed");
                }
                (Value::String(e.to_string()), true)
            }
        };
        let text = match &payload {
            Value::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        };
        let result = json!({
            "isError": is_error,
            "content": [{ "type": "text", "text": text }],
        });
        self.emit(out, &rpc::ok(id, result)).await
    }

    async fn handle_set_level<W>(
        &mut self,
        id: Value,
        params: Option<Value>,
        out: &mut FrameWriter<W>,
    ) -> Result<(), ServerError>
    where
        W: AsyncWrite + Unpin,
    {
        let level = params
            .as_ref()
            .and_then(|p| p.get("level"))
            .and_then(Value::as_str);
        let Some(level) = level else {
            let resp = rpc::err(id, code::INVALID_PARAMS, "Missing log level", None);
            return self.emit(out, &resp).await;
        };
        match level.parse::<LogLevel>() {
            Ok(level) => {
                self.min_log_level = level;
                if self.should_log(LogLevel::Info) {
                    tracing::info!(min_level = level.as_str(), "log level set");
                }
                self.emit(out, &rpc::ok(id, Value::Null)).await
            }
            Err(_) => {
                let resp = rpc::err(id, code::INVALID_PARAMS, "Invalid log level", None);
                self.emit(out, &resp).await
            }
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "serverInfo": { "name": self.name, "version": self.version },
            "capabilities": {
                "tools": { "listChanged": false },
                "logging": {},
            },
        })
    }

    async fn emit<W, T>(&mut self, out: &mut FrameWriter<W>, frame: &T) -> Result<(), ServerError>
    where
        W: AsyncWrite + Unpin,
        T: serde::Serialize,
    {
        let line = serde_json::to_string(frame)?;
        self.trace_frame("send", &line);
        out.send_line(&line).await
    }

    fn trace_frame(&mut self, direction: &str, line: &str) {
        if let Some(file) = self.trace.as_mut() {
            use std::io::Write;
            let _ = writeln!(file, "{direction} {line}");
        }
    }
}
