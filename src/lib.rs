//! Azure Retail Prices MCP Server Library
//!
//! This crate exposes the public Azure Retail Prices API to MCP clients as
//! four tools that form a discovery-to-cost workflow:
//! service families, service names, products, and monthly cost.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **pricing**: filter building, bounded pagination, name projection
//!     and cost aggregation over the Retail Prices API
//!   - **tools**: MCP tool definitions on top of the pricing pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use azure_pricing_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
