//! Get monthly cost tool.
//!
//! Step 4 of the pricing workflow: every SKU/meter price line of one
//! product in one region, each with its monthly cost, ranked from most to
//! least expensive.

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
    ErrorResponse, NumericArg, STATUS_SUCCESS, error_result, parse_hours, region_or,
    structured_result,
};
use crate::domains::pricing::{CostQuery, LineItem, PricingService};

// ============================================================================
// Tool Parameters
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetMonthlyCostParams {
    #[schemars(description = "Exact product name, as returned by get_products")]
    pub product_name: String,

    #[serde(default)]
    #[schemars(description = "Azure region (default: 'westeurope')")]
    pub region: Option<String>,

    #[serde(default)]
    #[schemars(description = "Hours of use per month, greater than 0 and at most 744 (default: 730)")]
    pub monthly_hours: Option<NumericArg>,

    /// Omitted: the configured default. Empty string: no type clause.
    #[serde(default, rename = "type")]
    #[schemars(description = "Price type (default: 'Consumption'; an empty string matches every type)")]
    pub price_type: Option<String>,
}

// ============================================================================
// Structured Output
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyCostResponse {
    pub status: &'static str,
    pub product_name: String,
    pub region: String,
    pub monthly_hours: f64,
    pub products: Vec<LineItem>,
    pub total_monthly_cost: f64,
    pub currency: String,
    pub currencies: Vec<String>,
    pub mixed_currency: bool,
    pub count: usize,
    pub pages_fetched: usize,
    pub truncated: bool,
    pub filter_applied: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ============================================================================
// Tool Definition
// ============================================================================

pub struct GetMonthlyCostTool;

impl GetMonthlyCostTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_monthly_cost";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "[STEP 4] Calculate the monthly cost of a product in a region. \
         Hourly prices are multiplied by monthly_hours (default 730); other units are taken as is. \
         Returns every SKU/meter line sorted by monthly cost, with the total.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(product = %params.product_name))]
    pub async fn execute(params: &GetMonthlyCostParams, service: &PricingService) -> CallToolResult {
        let config = service.config();
        let region = region_or(params.region.as_deref(), &config.default_region);
        info!(
            "Calculating monthly cost for {} in region {}",
            params.product_name, region
        );

        let hours = match parse_hours(params.monthly_hours.as_ref(), config.hours_in_month) {
            Ok(h) => h,
            Err(e) => {
                return error_result(
                    ErrorResponse::from(&e)
                        .with_product(&params.product_name)
                        .with_region(region),
                );
            }
        };

        let price_type = match params.price_type.as_deref() {
            None => Some(config.default_price_type.as_str()),
            Some(t) if t.trim().is_empty() => None,
            Some(t) => Some(t),
        };

        let query = match CostQuery::new(&params.product_name, region, price_type, hours) {
            Ok(q) => q.with_max_pages(config.max_pages),
            Err(e) => {
                return error_result(
                    ErrorResponse::new(e.to_string())
                        .with_product(&params.product_name)
                        .with_region(region),
                );
            }
        };

        let estimate = match service.monthly_cost(&query).await {
            Ok(estimate) => estimate,
            Err(e) => {
                return error_result(
                    ErrorResponse::new(e.to_string())
                        .with_product(query.product_name())
                        .with_region(query.region())
                        .with_filter(query.filter().as_str()),
                );
            }
        };

        if estimate.breakdown.items.is_empty() {
            return error_result(
                ErrorResponse::new(format!(
                    "Product '{}' not found in region '{}'.",
                    query.product_name(),
                    query.region()
                ))
                .with_product(query.product_name())
                .with_region(query.region())
                .with_filter(query.filter().as_str()),
            );
        }

        let breakdown = estimate.breakdown;
        let mixed_currency = breakdown.is_mixed_currency();
        let note = if mixed_currency {
            Some(format!(
                "Prices are in several currencies ({}); the total mixes them",
                breakdown.currencies.join(", ")
            ))
        } else if estimate.truncated {
            Some(format!(
                "Stopped after {} page(s); the total covers the lines fetched so far",
                estimate.pages_fetched
            ))
        } else {
            None
        };

        let response = MonthlyCostResponse {
            status: STATUS_SUCCESS,
            product_name: query.product_name().to_string(),
            region: query.region().to_string(),
            monthly_hours: query.monthly_hours(),
            count: breakdown.items.len(),
            products: breakdown.items,
            total_monthly_cost: breakdown.total_monthly_cost,
            currency: breakdown.currency,
            currencies: breakdown.currencies,
            mixed_currency,
            pages_fetched: estimate.pages_fetched,
            truncated: estimate.truncated,
            filter_applied: query.filter().to_string(),
            note,
        };

        let summary = format!(
            "Estimated monthly cost of '{}' in {}: {:.2} {} ({} line(s))",
            response.product_name,
            response.region,
            response.total_monthly_cost,
            response.currency,
            response.count
        );
        structured_result(summary, &response)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: Arc<PricingService>,
    ) -> Result<serde_json::Value, String> {
        let params: GetMonthlyCostParams = super::common::parse_http_arguments(arguments)?;
        let result = Self::execute(&params, &service).await;
        super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetMonthlyCostParams>(),
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
                let params: GetMonthlyCostParams =
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

#[cfg(test)]
mod tests {
    use super::super::common::tests::structured;
    use super::*;
    use crate::core::config::PricingConfig;
    use crate::domains::pricing::PriceRecord;
    use crate::domains::pricing::paginator::tests::FakeSource;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params(product: &str) -> GetMonthlyCostParams {
        GetMonthlyCostParams {
            product_name: product.to_string(),
            region: None,
            monthly_hours: None,
            price_type: None,
        }
    }

    fn priced(sku: &str, unit: &str, price: f64, currency: &str) -> PriceRecord {
        PriceRecord {
            product_name: "Virtual Machines D Series".to_string(),
            sku_name: sku.to_string(),
            meter_name: sku.to_string(),
            unit_of_measure: unit.to_string(),
            retail_price: price,
            currency_code: currency.to_string(),
            ..PriceRecord::default()
        }
    }

    fn fake_service(source: FakeSource) -> (Arc<FakeSource>, PricingService) {
        let source = Arc::new(source);
        let service = PricingService::with_source(source.clone(), PricingConfig::default());
        (source, service)
    }

    #[tokio::test]
    async fn test_app_service_plan_scenario() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/retail/prices"))
            .and(query_param(
                "$filter",
                "productName eq 'Azure App Service Premium v3 Plan' \
                 and armRegionName eq 'westeurope' and type eq 'Consumption'",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Items": [{
                    "productName": "Azure App Service Premium v3 Plan",
                    "skuName": "P1 v3",
                    "meterName": "P1 v3 App",
                    "unitOfMeasure": "1 Hour",
                    "retailPrice": 0.182,
                    "currencyCode": "USD",
                    "type": "Consumption",
                    "armRegionName": "westeurope"
                }],
                "NextPageLink": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let service = PricingService::new(PricingConfig {
            api_url: format!("{}/api/retail/prices", server.uri()),
            ..PricingConfig::default()
        })
        .unwrap();

        let mut p = params("Azure App Service Premium v3 Plan");
        p.region = Some("westeurope".to_string());
        p.monthly_hours = Some(NumericArg::Integer(730));
        p.price_type = Some("Consumption".to_string());

        let result = GetMonthlyCostTool::execute(&p, &service).await;
        let data = structured(&result);

        assert_eq!(data["status"], "success");
        assert_eq!(data["count"], 1);
        assert_eq!(data["currency"], "USD");
        assert_eq!(data["mixed_currency"], false);
        let total = data["total_monthly_cost"].as_f64().unwrap();
        assert!((total - 132.86).abs() < 0.01);
        assert_eq!(data["products"][0]["sku_name"], "P1 v3");
    }

    #[tokio::test]
    async fn test_items_ranked_and_totalled() {
        let (_, service) = fake_service(FakeSource::new(vec![vec![
            priced("Disk", "1/Month", 50.0, "USD"),
            priced("D2", "1 Hour", 0.10, "USD"),
            priced("D4", "1 Hour", 0.20, "USD"),
        ]]));

        let result = GetMonthlyCostTool::execute(&params("Virtual Machines D Series"), &service).await;
        let data = structured(&result);

        let products = data["products"].as_array().unwrap();
        let costs: Vec<f64> = products
            .iter()
            .map(|p| p["monthly_cost"].as_f64().unwrap())
            .collect();
        assert!((costs[0] - 146.0).abs() < 1e-9);
        assert!((costs[1] - 73.0).abs() < 1e-9);
        assert!((costs[2] - 50.0).abs() < 1e-9);

        let total = data["total_monthly_cost"].as_f64().unwrap();
        assert!((total - costs.iter().sum::<f64>()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_product_is_error() {
        let (_, service) = fake_service(FakeSource::new(vec![vec![]]));

        let result = GetMonthlyCostTool::execute(&params("Nope"), &service).await;

        assert_eq!(result.is_error, Some(true));
        let data = structured(&result);
        assert_eq!(data["status"], "error");
        assert_eq!(data["message"], "Product 'Nope' not found in region 'westeurope'.");
        assert_eq!(data["product_name"], "Nope");
        assert_eq!(data["region"], "westeurope");
        assert!(data["filter_applied"].as_str().unwrap().contains("productName eq 'Nope'"));
    }

    #[tokio::test]
    async fn test_type_defaults_and_empty_disables() {
        let (source, service) = fake_service(FakeSource::new(vec![vec![priced(
            "D2", "1 Hour", 0.1, "USD",
        )]]));

        GetMonthlyCostTool::execute(&params("X"), &service).await;
        let mut p = params("X");
        p.price_type = Some(String::new());
        GetMonthlyCostTool::execute(&p, &service).await;

        let requests = source.requests.lock().unwrap();
        assert!(requests[0].contains("type eq 'Consumption'"));
        assert!(!requests[1].contains("type eq"));
    }

    #[tokio::test]
    async fn test_mixed_currency_flagged() {
        let (_, service) = fake_service(FakeSource::new(vec![vec![
            priced("D2", "1 Hour", 0.1, "USD"),
            priced("D2", "1 Hour", 0.1, "EUR"),
        ]]));

        let result = GetMonthlyCostTool::execute(&params("X"), &service).await;
        let data = structured(&result);

        assert_eq!(data["mixed_currency"], true);
        assert_eq!(data["currency"], "USD");
        assert_eq!(data["currencies"], serde_json::json!(["USD", "EUR"]));
        assert!(data["note"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_hours_rejected_before_request() {
        let (source, service) = fake_service(FakeSource::new(vec![vec![]]));
        let mut p = params("X");
        p.monthly_hours = Some(NumericArg::Text("-5".to_string()));

        let result = GetMonthlyCostTool::execute(&p, &service).await;

        assert_eq!(result.is_error, Some(true));
        assert!(structured(&result)["message"]
            .as_str()
            .unwrap()
            .contains("monthly_hours"));
        assert!(source.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quote_in_product_name_is_escaped() {
        let (source, service) = fake_service(FakeSource::new(vec![vec![priced(
            "S", "1/Month", 1.0, "USD",
        )]]));

        let result = GetMonthlyCostTool::execute(&params("O'Brien Storage"), &service).await;

        assert_eq!(result.is_error, Some(false));
        let requests = source.requests.lock().unwrap();
        assert!(requests[0].contains("productName eq 'O''Brien Storage'"));
    }

    #[tokio::test]
    async fn test_first_page_failure_is_error() {
        let (_, service) = fake_service(FakeSource::new(vec![vec![]]).failing_at(0));

        let result = GetMonthlyCostTool::execute(&params("X"), &service).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(structured(&result)["status"], "error");
    }
}
