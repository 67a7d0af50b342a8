//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool becomes a dynamic route that validates and
//! dispatches through [`ToolRegistry::call_tool`], so MCP clients see exactly
//! the tools and schemas that HTTP discovery publishes.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::{CallToolResult, Content, Tool},
};
use tracing::warn;

use super::error::ToolError;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .iter()
        .map(|tool| tool.to_tool())
        .fold(ToolRouter::new(), |router, tool| {
            router.with_route(create_route(registry.clone(), tool))
        })
}

/// Create a ToolRoute dispatching to the registry.
fn create_route<S>(registry: Arc<ToolRegistry>, tool: Tool) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = tool.name.to_string();
    ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
        let registry = registry.clone();
        let name = name.clone();
        let args = ctx.arguments.clone().unwrap_or_default();
        async move {
            let result = registry
                .call_tool(&name, serde_json::Value::Object(args))
                .await;
            into_call_result(result)
        }
        .boxed()
    })
}

/// Wrap a tool's JSON result as text plus structured content.
pub fn structured_result(value: serde_json::Value) -> CallToolResult {
    let mut result = CallToolResult::success(vec![Content::text(value.to_string())]);
    result.structured_content = Some(value);
    result
}

/// Convert a registry outcome into an MCP tool call result.
///
/// Caller mistakes become protocol errors. Failures inside a tool are
/// reported as an error result so the client can show them.
pub fn into_call_result(
    result: Result<serde_json::Value, ToolError>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(structured_result(value)),
        Err(e) if e.is_client_error() => Err(McpError::invalid_params(e.to_string(), None)),
        Err(e) => {
            warn!("Tool call failed: {}", e);
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ToolsConfig;
    use serde_json::json;

    struct TestServer {}

    fn test_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::with_defaults(&ToolsConfig::default()).unwrap())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_registry());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"greeting"));
        assert!(names.contains(&"todays-date"));
        assert!(names.contains(&"assess-page-title-for-seo"));
    }

    #[test]
    fn test_registry_matches_router() {
        let registry = test_registry();
        let registry_names: Vec<String> = registry
            .tool_names()
            .into_iter()
            .map(String::from)
            .collect();

        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in &registry_names {
            assert!(router_names.contains(&name.as_str()));
        }
    }

    #[test]
    fn test_into_call_result_success() {
        let result = into_call_result(Ok(json!({ "date": "2024-03-05" }))).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!({ "date": "2024-03-05" })));
    }

    #[test]
    fn test_into_call_result_errors() {
        let err = into_call_result(Err(ToolError::invalid_arguments("bad"))).unwrap_err();
        assert!(err.message.contains("bad"));

        let result = into_call_result(Err(ToolError::execution_failed("down"))).unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
