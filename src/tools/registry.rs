use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::tool::Tool;
use crate::core::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
}

/// Name-indexed tool collection. Read-only once the server starts; iteration
/// and `tools/list` follow insertion order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    order: Vec<Arc<dyn Tool>>,
    by_name: HashMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.by_name.insert(name, tool.clone());
        self.order.push(tool);
        Ok(())
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<(), RegistryError> {
        self.add(Arc::new(tool))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn list(&self) -> Vec<ToolMeta> {
        self.order
            .iter()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::core::tool::ToolError;

    struct Named(&'static str);

    #[async_trait]
    impl Tool for Named {
        fn name(&self) -> &'static str {
            self.0
        }
        fn description(&self) -> &'static str {
            "test tool"
        }
        fn input_schema(&self) -> Value {
            json!({"type":"object"})
        }
        async fn call(&self, args: &Value) -> Result<Value, ToolError> {
            Ok(args.clone())
        }
    }

    #[test]
    fn it_lists_in_insertion_order() {
        let mut reg = ToolRegistry::new();
        reg.register(Named("zeta")).unwrap();
        reg.register(Named("alpha")).unwrap();
        reg.register(Named("mid")).unwrap();
        let names: Vec<&str> = reg.list().iter().map(|m| m.name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn it_rejects_duplicate_names() {
        let mut reg = ToolRegistry::new();
        reg.register(Named("echo")).unwrap();
        let err = reg.register(Named("echo")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("echo".to_string()));
        assert_eq!(reg.len(), 1);
    }

    #[tokio::test]
    async fn it_looks_up_and_calls_by_name() {
        let mut reg = ToolRegistry::new();
        reg.register(Named("echo")).unwrap();
        let tool = reg.get("echo").expect("registered");
        let out = tool.call(&json!({"x": 2})).await.unwrap();
        assert_eq!(out["x"], 2);
        assert!(reg.get("missing").is_none());
    }
}
