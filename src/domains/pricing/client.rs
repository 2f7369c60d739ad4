//! HTTP client for the Azure Retail Prices API.
//!
//! [`PriceSource`] is the seam between the pipeline and the network: the
//! paginator only ever asks for a first page or a continuation page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::{PricingError, PricingResult};
use super::filter::Filter;
use super::model::PricePage;
use crate::core::config::PricingConfig;

/// Upper bound the API accepts for `$top`.
pub const MAX_TOP: u32 = 1000;

/// Anything that can serve pages of retail prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the first page for a filter, optionally with a `$top` page size.
    async fn first_page(&self, filter: &Filter, top: Option<u32>) -> PricingResult<PricePage>;

    /// Follow a continuation link verbatim.
    async fn next_page(&self, link: &str) -> PricingResult<PricePage>;
}

/// [`PriceSource`] backed by the live Retail Prices endpoint.
#[derive(Debug, Clone)]
pub struct RetailPriceClient {
    client: Client,
    base_url: String,
    api_version: String,
}

impl RetailPriceClient {
    /// Build a client with the configured endpoint and per-request timeout.
    pub fn new(config: &PricingConfig) -> PricingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    /// Full URL of the first-page request for a filter.
    pub fn first_page_url(&self, filter: &Filter, top: Option<u32>) -> PricingResult<String> {
        let mut params: Vec<(&str, String)> = vec![
            ("api-version", self.api_version.clone()),
            ("$filter", filter.to_string()),
        ];
        if let Some(top) = top {
            params.push(("$top", top.min(MAX_TOP).to_string()));
        }

        let query = serde_urlencoded::to_string(&params)
            .map_err(|e| PricingError::invalid_input(e.to_string()))?;
        Ok(format!("{}?{}", self.base_url, query))
    }

    async fn get_page(&self, url: &str) -> PricingResult<PricePage> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::status(status.as_u16(), truncate_body(&body)));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| PricingError::decode(e.to_string()))
    }
}

#[async_trait]
impl PriceSource for RetailPriceClient {
    async fn first_page(&self, filter: &Filter, top: Option<u32>) -> PricingResult<PricePage> {
        let url = self.first_page_url(filter, top)?;
        self.get_page(&url).await
    }

    async fn next_page(&self, link: &str) -> PricingResult<PricePage> {
        self.get_page(link).await
    }
}

/// Keep upstream error bodies short enough to show to a caller.
fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    if body.chars().count() > MAX_CHARS {
        let head: String = body.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pricing::filter::{FIELD_REGION, FIELD_SERVICE_FAMILY, FilterBuilder};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> PricingConfig {
        PricingConfig {
            api_url: format!("{}/api/retail/prices", server.uri()),
            ..PricingConfig::default()
        }
    }

    fn compute_filter() -> Filter {
        FilterBuilder::new()
            .require(FIELD_SERVICE_FAMILY, "Compute")
            .unwrap()
            .optional(FIELD_REGION, Some("westeurope"))
            .unwrap()
            .build()
    }

    #[test]
    fn test_first_page_url_encodes_params() {
        let config = PricingConfig::default();
        let client = RetailPriceClient::new(&config).unwrap();
        let url = client.first_page_url(&compute_filter(), Some(5000)).unwrap();

        assert!(url.starts_with("https://prices.azure.com/api/retail/prices?"));
        assert!(url.contains("api-version=2023-01-01-preview"));
        assert!(url.contains("%24filter=serviceFamily+eq+%27Compute%27"));
        assert!(url.ends_with("%24top=1000"));
    }

    #[tokio::test]
    async fn test_first_page_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/retail/prices"))
            .and(query_param("api-version", "2023-01-01-preview"))
            .and(query_param(
                "$filter",
                "serviceFamily eq 'Compute' and armRegionName eq 'westeurope'",
            ))
            .and(query_param("$top", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Items": [{"serviceName": "Virtual Machines", "productName": "VM A"}],
                "NextPageLink": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RetailPriceClient::new(&test_config(&server)).unwrap();
        let page = client.first_page(&compute_filter(), Some(100)).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].service_name, "Virtual Machines");
        assert!(page.next_link().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Invalid OData filter"))
            .mount(&server)
            .await;

        let client = RetailPriceClient::new(&test_config(&server)).unwrap();
        let err = client.first_page(&compute_filter(), None).await.unwrap_err();

        match err {
            PricingError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid OData filter"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = RetailPriceClient::new(&test_config(&server)).unwrap();
        let err = client.first_page(&compute_filter(), None).await.unwrap_err();
        assert!(matches!(err, PricingError::Decode(_)));
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.len(), 203);
    }
}
