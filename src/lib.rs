//! Utility Tools Server Library
//!
//! This crate exposes a small set of callable tools (greeting generation,
//! date formatting, SEO title assessment) behind a discovery/invocation
//! HTTP interface and an MCP STDIO transport.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the server and its transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool descriptors, the registry and the tool definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use utility_tools_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
