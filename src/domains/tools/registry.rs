//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Name → (descriptor, handler) binding with duplicate detection
//! - Ordered descriptor listing for discovery
//! - Argument validation and dispatch for tool calls

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Tool;
use tracing::{debug, info, instrument, warn};

use crate::core::config::ToolsConfig;

use super::definitions::{GreetingTool, PageTitleSeoTool, TodaysDateTool};
use super::error::ToolError;
use super::handlers::ToolHandler;
use super::schema::ToolDescriptor;

/// A descriptor bound to its handler.
#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

impl RegisteredTool {
    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.descriptor.name.clone().into(),
            description: Some(self.descriptor.description.clone().into()),
            input_schema: Arc::new(self.descriptor.input_schema()),
            annotations: None,
            output_schema: self.handler.output_schema(),
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Tool registry - manages all available tools.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in tools.
    pub fn with_defaults(config: &ToolsConfig) -> Result<Self, ToolError> {
        let mut registry = Self::new();

        let greeting = match config.greeting_seed {
            Some(seed) => GreetingTool::with_seed(seed),
            None => GreetingTool::new(),
        };
        registry.register(GreetingTool::descriptor(), Arc::new(greeting))?;
        registry.register(TodaysDateTool::descriptor(), Arc::new(TodaysDateTool::new()))?;
        registry.register(
            PageTitleSeoTool::descriptor(),
            Arc::new(PageTitleSeoTool::new(config)?),
        )?;

        Ok(registry)
    }

    /// Bind a descriptor to a handler.
    ///
    /// Fails if another tool already uses the same name.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: Arc<dyn ToolHandler>,
    ) -> Result<(), ToolError> {
        if self.index.contains_key(&descriptor.name) {
            warn!("Rejected duplicate tool registration: {}", descriptor.name);
            return Err(ToolError::duplicate_name(descriptor.name));
        }

        info!("Registered tool: {}", descriptor.name);
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.descriptor.name.as_str())
            .collect()
    }

    /// Get all descriptors in registration order.
    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(RegisteredTool::to_tool).collect()
    }

    /// Iterate over the registered tools.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.iter()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate arguments and dispatch a tool call to its handler.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let Some(tool) = self.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let params = tool.descriptor.validate(arguments).inspect_err(|e| {
            debug!("Rejected arguments: {}", e);
        })?;

        tool.handler.execute(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamSpec, ValidatedParams};
    use serde_json::json;

    struct EchoTool;

    #[async_trait::async_trait]
    impl ToolHandler for EchoTool {
        async fn execute(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError> {
            Ok(serde_json::Value::Object(params.into_inner()))
        }
    }

    fn echo_descriptor(name: &str) -> ToolDescriptor {
        ToolDescriptor::new(name, "Echo back the message")
            .param(ParamSpec::string("message", "Message to echo").required())
    }

    fn test_config() -> ToolsConfig {
        ToolsConfig {
            greeting_seed: Some(7),
            ..ToolsConfig::default()
        }
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::with_defaults(&test_config()).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec!["greeting", "todays-date", "assess-page-title-for-seo"]
        );
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo"), Arc::new(EchoTool))
            .unwrap();
        let err = registry
            .register(echo_descriptor("echo"), Arc::new(EchoTool))
            .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateName(ref n) if n == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tools_carry_input_schema() {
        let registry = ToolRegistry::with_defaults(&test_config()).unwrap();
        let tools = registry.tools();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0].name, "greeting");
        assert_eq!(tools[0].input_schema["required"], json!(["name"]));
        assert!(tools[0].output_schema.is_some());
    }

    #[tokio::test]
    async fn test_registry_call_echo() {
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo"), Arc::new(EchoTool))
            .unwrap();

        let result = registry
            .call_tool("echo", json!({ "message": "hi" }))
            .await
            .unwrap();
        assert_eq!(result, json!({ "message": "hi" }));
    }

    #[tokio::test]
    async fn test_registry_validation_runs_before_handler() {
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo"), Arc::new(EchoTool))
            .unwrap();

        let err = registry.call_tool("echo", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = registry
            .call_tool("echo", json!({ "message": 3 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::with_defaults(&test_config()).unwrap();
        let result = registry.call_tool("unknown", json!({})).await;
        assert!(matches!(result, Err(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_registry_greeting_requires_name() {
        let registry = ToolRegistry::with_defaults(&test_config()).unwrap();
        let err = registry
            .call_tool("greeting", json!({ "language": "french" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Missing required parameter: name"));
    }
}
