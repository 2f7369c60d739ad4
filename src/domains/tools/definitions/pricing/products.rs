//! Get products tool.
//!
//! Step 3 of the pricing workflow: unique product names for a service
//! family, optionally narrowed by service name, price type and a
//! case-insensitive substring.

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
use crate::domains::pricing::{PricingService, QuerySpec};

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProductsParams {
    #[schemars(description = "The service family to query (e.g. 'Compute', 'Databases')")]
    pub service_family: String,

    #[serde(default)]
    #[schemars(description = "Azure region (default: 'westeurope')")]
    pub region: Option<String>,

    /// Price type, e.g. "Consumption" or "Reservation".
    #[serde(default, rename = "type")]
    #[schemars(description = "Price type filter, e.g. 'Consumption' or 'Reservation'")]
    pub price_type: Option<String>,

    #[serde(default)]
    #[schemars(description = "Exact service name, as returned by get_service_names")]
    pub service_name: Option<String>,

    #[serde(default)]
    #[schemars(description = "Keep only product names containing this text (case-insensitive)")]
    pub product_name_contains: Option<String>,

    #[serde(default)]
    #[schemars(description = "Maximum number of product names to return (0 or omitted: no limit)")]
    pub limit: Option<NumericArg>,
}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub status: &'static str,
    pub product_names: Vec<String>,
    pub count: usize,
    pub total_products: usize,
    pub total_products_processed: usize,
    pub total_matched: usize,
    pub was_limited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_applied: Option<usize>,
    pub pages_fetched: usize,
    pub truncated: bool,
    pub filter_applied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GetProductsTool;

impl GetProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "[STEP 3] Get unique product names for a service family. \
         Narrow the result with service_name (from get_service_names), type, \
         product_name_contains and limit. \
         Next step: get_monthly_cost with one of the returned product names.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(family = %params.service_family))]
    pub async fn execute(params: &GetProductsParams, service: &PricingService) -> CallToolResult {
        let region = region_or(params.region.as_deref(), &service.config().default_region);
        info!(
            "Getting unique product names for family {} in region {}",
            params.service_family, region
        );

        let limit = match parse_count("limit", params.limit.as_ref(), 0) {
            Ok(n) => usize::try_from(n).unwrap_or(usize::MAX),
            Err(e) => {
                return error_result(
                    ErrorResponse::from(&e).with_service_family(&params.service_family),
                );
            }
        };

        let query = match QuerySpec::new(
            &params.service_family,
            region,
            params.price_type.as_deref(),
            params.service_name.as_deref(),
        ) {
            Ok(q) => q
                .with_product_name_contains(params.product_name_contains.as_deref())
                .with_limit(limit)
                .with_max_pages(service.config().max_pages),
            Err(e) => {
                return error_result(
                    ErrorResponse::new(e.to_string()).with_service_family(&params.service_family),
                );
            }
        };

        let listing = match service.products(&query).await {
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

        let names = listing.names;
        let count = names.names.len();
        let message = (count == 0).then(|| {
            format!(
                "No products found for family '{}' with the applied filters.",
                query.family()
            )
        });
        let note = listing.truncated.then(|| {
            format!(
                "Stopped after {} page(s); more results were available",
                listing.pages_fetched
            )
        });

        let response = ProductsResponse {
            status: STATUS_SUCCESS,
            count,
            total_products: names.total_unique,
            total_products_processed: names.total_processed,
            total_matched: names.total_matched,
            was_limited: names.was_limited,
            limit_applied: (query.limit() > 0).then_some(query.limit()),
            pages_fetched: listing.pages_fetched,
            truncated: listing.truncated,
            filter_applied: query.filter().to_string(),
            product_name_filter: query.product_name_contains().map(str::to_string),
            product_names: names.names,
            message,
            note,
        };

        let summary = if response.was_limited {
            format!(
                "Showing {} of {} product(s) in family '{}'",
                response.count,
                response.total_products,
                query.family()
            )
        } else {
            format!(
                "Found {} product(s) in family '{}'",
                response.count,
                query.family()
            )
        };
        structured_result(summary, &response)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: Arc<PricingService>,
    ) -> Result<serde_json::Value, String> {
        let params: GetProductsParams = super::common::parse_http_arguments(arguments)?;
        let result = Self::execute(&params, &service).await;
        super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetProductsParams>(),
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
                let params: GetProductsParams =
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
