//! List service families tool.
//!
//! Step 1 of the pricing workflow. Returns the static reference table of
//! Azure service families; no network call is made.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::common::{STATUS_SUCCESS, structured_result};
use crate::domains::pricing::PricingService;

// ============================================================================
// Tool Parameters
// ============================================================================

/// The tool takes no parameters.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListServiceFamiliesParams {}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ServiceFamiliesResponse {
    pub status: &'static str,
    pub service_families: Vec<&'static str>,
    pub count: usize,
    pub source: &'static str,
    pub reference: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct ListServiceFamiliesTool;

impl ListServiceFamiliesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_service_families";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "[STEP 1] List all available service families in Azure, \
         according to the official Retail Prices API documentation. \
         This is the FIRST STEP of the pricing workflow: \
         1) list_service_families, 2) get_service_names, 3) get_products, 4) get_monthly_cost.";

    /// Execute the tool logic.
    pub fn execute(service: &PricingService) -> CallToolResult {
        info!("Returning official list of Azure service families");

        let families = service.service_families();
        let response = ServiceFamiliesResponse {
            status: STATUS_SUCCESS,
            count: families.count,
            service_families: families.service_families,
            source: families.source,
            reference: families.reference,
            version: families.version,
        };

        let summary = format!("{} Azure service families available", response.count);
        structured_result(summary, &response)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: serde_json::Value,
        service: Arc<PricingService>,
    ) -> Result<serde_json::Value, String> {
        let result = Self::execute(&service);
        super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListServiceFamiliesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(service: Arc<PricingService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |_ctx: ToolCallContext<'_, S>| {
            let service = service.clone();
            async move { Ok::<_, McpError>(Self::execute(&service)) }.boxed()
        })
    }
}
