use async_trait::async_trait;
use thiserror::Error;

use crate::bridge::DecodeError;
use crate::core::value::Value;

/// Failures an adapter reports for a single invocation. These never become
/// JSON-RPC errors; the dispatcher renders them as error-flagged call results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Arguments must be an object")]
    NotAnObject,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] DecodeError),

    #[error("Function call failed: {0}")]
    Failed(String),
}

/// The uniform tool object: metadata plus an invocable backend.
///
/// `input_schema` must be a JSON Schema object with top-level
/// `type: "object"`; [`crate::TypedTool`] guarantees this by construction.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;
    async fn call(&self, arguments: &Value) -> Result<Value, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &'static str {
            "test.echo"
        }
        fn description(&self) -> &'static str {
            "echo tool"
        }
        fn input_schema(&self) -> Value {
            json!({"type":"object"})
        }
        async fn call(&self, args: &Value) -> Result<Value, ToolError> {
            Ok(args.clone())
        }
    }

    #[tokio::test]
    async fn it_runs_echo() {
        let t = Echo;
        let out = t.call(&json!({"x":1})).await.unwrap();
        assert_eq!(out["x"], 1);
    }

    #[test]
    fn it_renders_the_three_failure_messages() {
        assert_eq!(ToolError::NotAnObject.to_string(), "Arguments must be an object");
        assert_eq!(
            ToolError::from(DecodeError::MissingField("text")).to_string(),
            "Invalid parameters: MissingField(text)"
        );
        assert_eq!(
            ToolError::Failed("boom".into()).to_string(),
            "Function call failed: boom"
        );
    }
}
