//! The typed tool adapter: one call site binds a typed async handler to the
//! dynamic [`Tool`] surface.

use std::future::{ready, Future};
use std::pin::Pin;

use async_trait::async_trait;

use crate::bridge::{ToValue, ToolParams};
use crate::core::tool::{Tool, ToolError};
use crate::core::value::Value;

type InvokeFuture = Pin<Box<dyn Future<Output = Result<Value, ToolError>> + Send>>;
type InvokeFn = Box<dyn Fn(&Value) -> InvokeFuture + Send + Sync>;

/// A [`Tool`] built from a handler `Fn(P) -> Future<Result<R, E>>`.
///
/// The schema for `P` is derived once at construction. Decoding happens
/// before the handler runs; encoding after it returns. All three failure
/// paths (non-object arguments, decode failure, handler error) surface as
/// [`ToolError`] values, never as panics.
pub struct TypedTool {
    name: &'static str,
    description: &'static str,
    schema: Value,
    invoke: InvokeFn,
}

impl TypedTool {
    /// Signature requirements are enforced by the trait bounds: the handler
    /// takes exactly one parameter struct and returns a fallible result
    /// whose success type encodes back to a wire value.
    pub fn new<P, R, E, F, Fut>(
        name: &'static str,
        description: &'static str,
        handler: F,
    ) -> Self
    where
        P: ToolParams + Send + 'static,
        R: ToValue + Send + 'static,
        E: std::fmt::Display + Send + 'static,
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
    {
        let schema = P::schema();
        let invoke: InvokeFn = Box::new(move |arguments: &Value| -> InvokeFuture {
            if !arguments.is_object() {
                return Box::pin(ready(Err(ToolError::NotAnObject)));
            }
            match P::from_value(arguments) {
                Err(e) => Box::pin(ready(Err(ToolError::from(e)))),
                Ok(params) => {
                    let fut = handler(params);
                    Box::pin(async move {
                        match fut.await {
                            Ok(result) => Ok(result.to_value()),
                            Err(e) => Err(ToolError::Failed(e.to_string())),
                        }
                    })
                }
            }
        });
        Self { name, description, schema, invoke }
    }
}

#[async_trait]
impl Tool for TypedTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn input_schema(&self) -> Value {
        self.schema.clone()
    }

    async fn call(&self, arguments: &Value) -> Result<Value, ToolError> {
        (self.invoke)(arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::tool_params! {
        #[derive(Debug, Clone)]
        pub struct RepeatParams {
            text: String,
            times: u32 = 1,
        }
    }

    async fn repeat(params: RepeatParams) -> Result<String, String> {
        if params.times == 0 {
            return Err("times must be positive".to_string());
        }
        Ok(params.text.repeat(params.times as usize))
    }

    fn repeat_tool() -> TypedTool {
        TypedTool::new("repeat", "Repeat text", repeat)
    }

    #[test]
    fn it_bakes_the_schema_at_construction() {
        let tool = repeat_tool();
        assert_eq!(tool.name(), "repeat");
        assert_eq!(
            tool.input_schema(),
            json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string"},
                    "times": {"type": "integer"},
                },
                "required": ["text"],
            })
        );
    }

    #[tokio::test]
    async fn it_decodes_invokes_and_encodes() {
        let tool = repeat_tool();
        let out = tool.call(&json!({"text": "ab", "times": 3})).await.unwrap();
        assert_eq!(out, json!("ababab"));
        // default applies when the key is missing
        let out = tool.call(&json!({"text": "x"})).await.unwrap();
        assert_eq!(out, json!("x"));
    }

    #[tokio::test]
    async fn it_rejects_non_object_arguments() {
        let tool = repeat_tool();
        let err = tool.call(&json!([1, 2])).await.unwrap_err();
        assert_eq!(err, ToolError::NotAnObject);
    }

    #[tokio::test]
    async fn it_reports_decode_failures_by_kind() {
        let tool = repeat_tool();
        let err = tool.call(&json!({"times": 2})).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameters: MissingField(text)");

        let err = tool.call(&json!({"text": "x", "times": 1.5})).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid parameters: InvalidValue");
    }

    #[tokio::test]
    async fn it_wraps_handler_failures() {
        let tool = repeat_tool();
        let err = tool.call(&json!({"text": "x", "times": 0})).await.unwrap_err();
        assert_eq!(err.to_string(), "Function call failed: times must be positive");
    }
}
