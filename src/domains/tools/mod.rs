//! Tools domain module.
//!
//! This module handles all tool-related functionality for the server.
//! Tools are named functions with a declared parameter schema that clients
//! discover and invoke over HTTP or MCP.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Tool descriptors, parameter specs and argument validation
//! - `handlers.rs` - The `ToolHandler` trait every tool implements
//! - `registry.rs` - Name → handler binding, discovery and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define `descriptor()` and implement `ToolHandler`
//! 3. Export in `definitions/mod.rs`
//! 4. Register it in `ToolRegistry::with_defaults()`

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schema;

pub use error::ToolError;
pub use handlers::ToolHandler;
pub use registry::{RegisteredTool, ToolRegistry};
pub use router::build_tool_router;
pub use schema::{ParamKind, ParamSpec, ToolDescriptor, ValidatedParams};
