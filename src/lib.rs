//! Typed tool adapter and minimal MCP server over newline-framed JSON-RPC 2.0.
//!
//! A host program declares a handler with a typed parameter struct; this crate
//! derives the JSON Schema for it, decodes incoming `tools/call` arguments into
//! the native struct, invokes the handler, encodes the result back to JSON, and
//! drives the whole thing from a single-threaded MCP dispatch loop on stdio.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use typed_mcp::{tool_params, McpServer, TypedTool};
//!
//! tool_params! {
//!     #[derive(Debug)]
//!     pub struct GreetParams {
//!         name: String,
//!         punctuation: String = "!".to_string(),
//!     }
//! }
//!
//! async fn greet(params: GreetParams) -> Result<String, std::convert::Infallible> {
//!     Ok(format!("hello, {}{}", params.name, params.punctuation))
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut server = McpServer::new("greeter", "0.1.0");
//!     server.register(TypedTool::new("greet", "Say hello", greet))?;
//!     server.serve_stdio().await?;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod core;
pub mod infra;
pub mod tools;

pub use crate::bridge::{DecodeError, FromValue, Schematize, ToValue, ToolParams};
pub use crate::core::error::ServerError;
pub use crate::core::tool::{Tool, ToolError};
pub use crate::core::value::Value;
pub use crate::infra::server::{LogLevel, McpServer};
pub use crate::tools::registry::{RegistryError, ToolMeta, ToolRegistry};
pub use crate::tools::typed::TypedTool;

// Used by the `tool_params!` expansion; not part of the public API.
#[doc(hidden)]
pub use serde_json as __serde_json;
