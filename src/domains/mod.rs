//! Domains module containing business logic organized by bounded contexts.
//!
//! - `pricing` - the Azure Retail Prices query and cost pipeline
//! - `tools` - MCP tool definitions on top of the pipeline

pub mod pricing;
pub mod tools;
