//! JSON-RPC 2.0 envelope types for the MCP wire surface.

use serde::{Deserialize, Serialize};

use crate::core::value::Value;

/// JSON-RPC error codes used by the dispatcher.
pub mod code {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
    pub const SERVER_NOT_INITIALIZED: i64 = -32002;
    pub const UNKNOWN_ERROR: i64 = -32001;
}

/// An incoming frame. `id` present means request; absent means notification.
#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A server-emitted notification frame.
#[derive(Serialize, Debug, Clone)]
pub struct RpcNotification<P: Serialize = Value> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

/// `$/progress` payload. `total` is serialized even when null, unlike
/// response fields.
#[derive(Serialize, Debug, Clone)]
pub struct ProgressParams {
    pub token: Value,
    pub progress: u64,
    pub total: Option<u64>,
}

pub fn ok(id: Value, result: Value) -> RpcResponse {
    RpcResponse { jsonrpc: "2.0", id, result: Some(result), error: None }
}

pub fn err(id: Value, code: i64, message: impl Into<String>, data: Option<Value>) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0",
        id,
        result: None,
        error: Some(RpcError { code, message: message.into(), data }),
    }
}

pub fn notify(method: &'static str) -> RpcNotification {
    RpcNotification { jsonrpc: "2.0", method, params: None }
}

pub fn progress(token: Value, progress: u64, total: Option<u64>) -> RpcNotification<ProgressParams> {
    RpcNotification {
        jsonrpc: "2.0",
        method: "$/progress",
        params: Some(ProgressParams { token, progress, total }),
    }
}
