//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::pricing::PricingService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::definitions::{
    GetMonthlyCostTool, GetProductsTool, GetServiceNamesTool, ListServiceFamiliesTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    service: Arc<PricingService>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(service: Arc<PricingService>) -> Self {
        Self { service }
    }

    /// Get all tool names, in workflow order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListServiceFamiliesTool::NAME,
            GetServiceNamesTool::NAME,
            GetProductsTool::NAME,
            GetMonthlyCostTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListServiceFamiliesTool::to_tool(),
            GetServiceNamesTool::to_tool(),
            GetProductsTool::to_tool(),
            GetMonthlyCostTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let service = self.service.clone();
        match name {
            ListServiceFamiliesTool::NAME => {
                ListServiceFamiliesTool::http_handler(arguments, service).await
            }
            GetServiceNamesTool::NAME => GetServiceNamesTool::http_handler(arguments, service).await,
            GetProductsTool::NAME => GetProductsTool::http_handler(arguments, service).await,
            GetMonthlyCostTool::NAME => GetMonthlyCostTool::http_handler(arguments, service).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PricingConfig;

    fn test_service() -> Arc<PricingService> {
        Arc::new(PricingService::new(PricingConfig::default()).unwrap())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_service());
        let names = registry.tool_names();
        assert_eq!(
            names,
            vec![
                "list_service_families",
                "get_service_names",
                "get_products",
                "get_monthly_cost"
            ]
        );
    }

    #[test]
    fn test_all_tools_have_descriptions() {
        for tool in ToolRegistry::get_all_tools() {
            let description = tool.description.unwrap_or_default();
            assert!(description.starts_with("[STEP "), "{}", tool.name);
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_families() {
        let registry = ToolRegistry::new(test_service());
        let result = registry
            .call_tool("list_service_families", serde_json::json!({}))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_bad_arguments() {
        let registry = ToolRegistry::new(test_service());
        let result = registry
            .call_tool("get_products", serde_json::json!({ "region": "eastus" }))
            .await;
        assert!(result.unwrap_err().contains("service_family"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_service());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert_eq!(result.unwrap_err(), "Unknown tool: unknown");
    }
}
