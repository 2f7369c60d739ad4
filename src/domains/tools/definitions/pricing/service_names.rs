//! Get service names tool.
//!
//! Step 2 of the pricing workflow. Lists the unique `serviceName` values of
//! a service family. The Compute family is sampled from a single bounded
//! page; every other family is paginated.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{
    ErrorResponse, NumericArg, STATUS_SUCCESS, error_result, parse_count, region_or,
    structured_result,
};
use crate::domains::pricing::{ListingStrategy, PricingService, ServiceNamesQuery};
use crate::domains::tools::ToolError;

/// Records inspected when sampling, unless the caller says otherwise.
const DEFAULT_MAX_RESULTS: u64 = 500;

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetServiceNamesParams {
    /// Service family to query.
    #[schemars(description = "The service family to query (e.g. 'Compute', 'Storage', 'Networking')")]
    pub service_family: String,

    /// Azure region.
    #[serde(default)]
    #[schemars(description = "Azure region (default: 'westeurope')")]
    pub region: Option<String>,

    /// Sample size for the Compute family.
    #[serde(default)]
    #[schemars(description = "Maximum number of records to inspect for the 'Compute' family (default: 500, max: 1000)")]
    pub max_results: Option<NumericArg>,
}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ServiceNamesResponse {
    pub status: &'static str,
    pub service_family: String,
    pub region: String,
    pub service_names: Vec<String>,
    pub count: usize,
    pub is_complete: bool,
    pub strategy: ListingStrategy,
    pub processed_items: usize,
    pub pages_fetched: usize,
    pub truncated: bool,
    pub filter_applied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GetServiceNamesTool;

impl GetServiceNamesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_service_names";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "[STEP 2] Get all unique service names within a service family. \
         For the 'Compute' family, which has many results, only a bounded sample is inspected \
         and the result is marked is_complete=false. \
         Next step: get_products with one of the returned service names.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(family = %params.service_family))]
    pub async fn execute(params: &GetServiceNamesParams, service: &PricingService) -> CallToolResult {
        let region = region_or(params.region.as_deref(), &service.config().default_region);
        info!(
            "Getting unique service names for family {} in region {}",
            params.service_family, region
        );

        let max_results = match parse_count(
            "max_results",
            params.max_results.as_ref(),
            DEFAULT_MAX_RESULTS,
        ) {
            Ok(0) => {
                let e = ToolError::invalid_arguments("'max_results' must be at least 1, got 0");
                return error_result(
                    ErrorResponse::from(&e).with_service_family(&params.service_family),
                );
            }
            Ok(n) => u32::try_from(n).unwrap_or(u32::MAX),
            Err(e) => return error_result(ErrorResponse::from(&e)),
        };

        let query = match ServiceNamesQuery::new(&params.service_family, region, max_results) {
            Ok(q) => q.with_max_pages(service.config().max_pages),
            Err(e) => {
                return error_result(
                    ErrorResponse::new(e.to_string()).with_service_family(&params.service_family),
                );
            }
        };

        let listing = match service.service_names(&query).await {
            Ok(listing) => listing,
            Err(e) => {
                return error_result(
                    ErrorResponse::new(e.to_string())
                        .with_service_family(query.family())
                        .with_region(query.region())
                        .with_filter(query.filter().as_str()),
                );
            }
        };

        let count = listing.names.names.len();
        let message = (count == 0).then(|| {
            format!(
                "No products found for family '{}' in region '{}'.",
                query.family(),
                query.region()
            )
        });
        let note = match listing.strategy {
            ListingStrategy::Sampled => Some(format!(
                "Sampled results for {} family, limited to {} products",
                query.family(),
                listing.names.total_processed
            )),
            ListingStrategy::Exhaustive if listing.truncated => Some(format!(
                "Stopped after {} page(s); more results were available",
                listing.pages_fetched
            )),
            ListingStrategy::Exhaustive => None,
        };

        let response = ServiceNamesResponse {
            status: STATUS_SUCCESS,
            service_family: query.family().to_string(),
            region: query.region().to_string(),
            count,
            is_complete: listing.is_complete(),
            strategy: listing.strategy,
            processed_items: listing.names.total_processed,
            pages_fetched: listing.pages_fetched,
            truncated: listing.truncated,
            filter_applied: query.filter().to_string(),
            service_names: listing.names.names,
            message,
            note,
        };

        let summary = format!(
            "Found {} service name(s) in family '{}' ({})",
            response.count,
            response.service_family,
            if response.is_complete { "complete" } else { "partial" }
        );
        structured_result(summary, &response)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: Arc<PricingService>,
    ) -> Result<serde_json::Value, String> {
        let params: GetServiceNamesParams = super::common::parse_http_arguments(arguments)?;
        let result = Self::execute(&params, &service).await;
        super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetServiceNamesParams>(),
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
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let service = service.clone();
            async move {
                let params: GetServiceNamesParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
