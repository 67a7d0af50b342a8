//! Tool handler trait.
//!
//! Every tool definition implements [`ToolHandler`]. The registry validates
//! arguments against the tool's descriptor before calling `execute()`, so
//! handlers only see well-typed parameters.

use std::sync::Arc;

use rmcp::model::JsonObject;

use super::error::ToolError;
use super::schema::ValidatedParams;

/// Trait implemented by every registered tool.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// JSON Schema of the result object, advertised over MCP when present.
    fn output_schema(&self) -> Option<Arc<JsonObject>> {
        None
    }

    /// Execute the tool with validated parameters.
    async fn execute(&self, params: ValidatedParams) -> Result<serde_json::Value, ToolError>;
}
