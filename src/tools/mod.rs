//! Tools the model can call during a turn.
//!
//! Each tool declares a JSON schema for its arguments and validates them
//! before doing any work. Tool failures (bad arguments, unreachable APIs)
//! are surfaced to the model as result content rather than aborting the
//! turn, so the conversation can continue.

mod math;
mod summary;
mod weather;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

pub use math::{Add, Divide, Multiply, Subtract};
pub use summary::SummarizeFile;
pub use weather::GetWeather;

/// A callable tool exposed to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, as the model refers to it.
    fn name(&self) -> &str;

    /// Human-readable description sent to the model.
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with already-parsed JSON arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Fixed name-to-tool mapping, built once at startup.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create the registry with all built-in tools.
    pub fn new() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Arc::new(Add));
        registry.register(Arc::new(Subtract));
        registry.register(Arc::new(Multiply));
        registry.register(Arc::new(Divide));
        registry.register(Arc::new(GetWeather::new()));
        registry.register(Arc::new(SummarizeFile));

        registry
    }

    fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// List all registered tools.
    pub fn list_tools(&self) -> Vec<&Arc<dyn Tool>> {
        let mut tools: Vec<_> = self.tools.values().collect();
        tools.sort_by_key(|t| t.name().to_string());
        tools
    }

    /// Tool schemas in the chat-completion `tools` format.
    pub fn schemas(&self) -> Vec<Value> {
        self.list_tools()
            .iter()
            .map(|tool| {
                json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a named tool.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("launch_rockets", json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[test]
    fn schemas_cover_all_tools() {
        let registry = ToolRegistry::new();
        let schemas = registry.schemas();
        assert_eq!(schemas.len(), registry.list_tools().len());

        let names: Vec<&str> = schemas
            .iter()
            .map(|s| s["function"]["name"].as_str().unwrap())
            .collect();
        for name in ["add", "subtract", "multiply", "divide", "get_weather", "summarize_file"] {
            assert!(names.contains(&name), "missing schema for {}", name);
        }
    }
}
