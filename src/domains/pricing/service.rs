//! Pricing service: runs the query pipeline for each tool.
//!
//! Every call is independent. The service only holds the price source and
//! immutable configuration; records fetched during a call are dropped when
//! the call returns.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::client::{PriceSource, RetailPriceClient};
use super::cost::{CostBreakdown, aggregate};
use super::error::PricingResult;
use super::families::{
    SERVICE_FAMILIES, SERVICE_FAMILIES_REFERENCE, SERVICE_FAMILIES_SOURCE,
    SERVICE_FAMILIES_VERSION, is_sampled_family,
};
use super::paginator::{Paged, paginate, sample};
use super::projection::{NameField, NameSet, project_names};
use super::query::{CostQuery, QuerySpec, ServiceNamesQuery};
use crate::core::config::PricingConfig;

/// How a service-name listing was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStrategy {
    /// Single bounded page; may miss names.
    Sampled,
    /// Full pagination up to the page cap.
    Exhaustive,
}

/// The static service-family reference table.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceFamilies {
    pub service_families: Vec<&'static str>,
    pub count: usize,
    pub source: &'static str,
    pub reference: &'static str,
    pub version: &'static str,
}

/// Unique product names for a family.
#[derive(Debug, Clone)]
pub struct ProductListing {
    pub names: NameSet,
    pub pages_fetched: usize,
    pub truncated: bool,
}

/// Unique service names for a family.
#[derive(Debug, Clone)]
pub struct ServiceListing {
    pub names: NameSet,
    pub strategy: ListingStrategy,
    pub pages_fetched: usize,
    pub truncated: bool,
}

impl ServiceListing {
    /// Only an exhaustive listing with no unfollowed link is complete.
    pub fn is_complete(&self) -> bool {
        self.strategy == ListingStrategy::Exhaustive && !self.truncated
    }
}

/// Priced line items for a product.
#[derive(Debug, Clone)]
pub struct CostEstimate {
    pub breakdown: CostBreakdown,
    pub pages_fetched: usize,
    pub truncated: bool,
}

/// Runs pricing queries against a [`PriceSource`].
#[derive(Clone)]
pub struct PricingService {
    source: Arc<dyn PriceSource>,
    config: PricingConfig,
}

impl PricingService {
    /// Create a service backed by the live Retail Prices API.
    pub fn new(config: PricingConfig) -> PricingResult<Self> {
        let client = RetailPriceClient::new(&config)?;
        info!(
            "Pricing client ready: {} (api-version {})",
            config.api_url, config.api_version
        );
        Ok(Self::with_source(Arc::new(client), config))
    }

    /// Create a service backed by any price source.
    pub fn with_source(source: Arc<dyn PriceSource>, config: PricingConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// The service-family reference table. No network call.
    pub fn service_families(&self) -> ServiceFamilies {
        ServiceFamilies {
            service_families: SERVICE_FAMILIES.to_vec(),
            count: SERVICE_FAMILIES.len(),
            source: SERVICE_FAMILIES_SOURCE,
            reference: SERVICE_FAMILIES_REFERENCE,
            version: SERVICE_FAMILIES_VERSION,
        }
    }

    /// Unique product names matching a query.
    pub async fn products(&self, query: &QuerySpec) -> PricingResult<ProductListing> {
        info!("Querying API with filter: {}", query.filter());
        let paged = paginate(self.source.as_ref(), query.filter(), query.max_pages()).await?;

        let names = project_names(
            &paged.records,
            NameField::Product,
            query.product_name_contains(),
            query.limit(),
        );

        if let Some(contains) = query.product_name_contains() {
            info!(
                "Filtering: from {} products, {} contain '{}'",
                names.total_processed, names.total_matched, contains
            );
        }
        if names.was_limited {
            info!(
                "Limiting results: showing {} of {} total products",
                names.names.len(),
                names.total_unique
            );
        }
        info!(
            "Retrieved {} unique product names from {} records across {} page(s)",
            names.names.len(),
            names.total_processed,
            paged.pages_fetched
        );

        Ok(ProductListing {
            names,
            pages_fetched: paged.pages_fetched,
            truncated: paged.truncated,
        })
    }

    /// Unique service names in a family, sampled for very large families.
    pub async fn service_names(&self, query: &ServiceNamesQuery) -> PricingResult<ServiceListing> {
        let (paged, strategy): (Paged, ListingStrategy) = if is_sampled_family(query.family()) {
            info!(
                "Using sampled listing for {} family, limited to {} records",
                query.family(),
                query.max_results()
            );
            let paged = sample(self.source.as_ref(), query.filter(), query.max_results()).await?;
            (paged, ListingStrategy::Sampled)
        } else {
            info!("Querying API with filter: {}", query.filter());
            let paged = paginate(self.source.as_ref(), query.filter(), query.max_pages()).await?;
            (paged, ListingStrategy::Exhaustive)
        };

        let names = project_names(&paged.records, NameField::Service, None, 0);
        info!(
            "Retrieved {} unique service names from {} records",
            names.names.len(),
            names.total_processed
        );

        Ok(ServiceListing {
            names,
            strategy,
            pages_fetched: paged.pages_fetched,
            truncated: paged.truncated,
        })
    }

    /// Priced line items and monthly total for one product.
    pub async fn monthly_cost(&self, query: &CostQuery) -> PricingResult<CostEstimate> {
        info!(
            "Querying API to get the price of {} in {}",
            query.product_name(),
            query.region()
        );
        let paged = paginate(self.source.as_ref(), query.filter(), query.max_pages()).await?;

        if paged.records.is_empty() {
            warn!("No products found for: {}", query.product_name());
        }

        let breakdown = aggregate(&paged.records, query.monthly_hours());

        Ok(CostEstimate {
            breakdown,
            pages_fetched: paged.pages_fetched,
            truncated: paged.truncated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pricing::model::PriceRecord;
    use crate::domains::pricing::paginator::tests::FakeSource;

    fn service(source: FakeSource) -> PricingService {
        PricingService::with_source(Arc::new(source), PricingConfig::default())
    }

    fn named(service_name: &str, product_name: &str) -> PriceRecord {
        PriceRecord {
            service_name: service_name.to_string(),
            product_name: product_name.to_string(),
            ..PriceRecord::default()
        }
    }

    #[test]
    fn test_service_families() {
        let svc = service(FakeSource::new(vec![]));
        let families = svc.service_families();
        assert!(families.count >= 20);
        assert_eq!(families.count, families.service_families.len());
        assert!(families.service_families.contains(&"Compute"));
    }

    #[tokio::test]
    async fn test_products_across_pages() {
        let source = FakeSource::new(vec![
            vec![named("Redis Cache", "Azure Redis Cache"), named("SQL", "SQL Database")],
            vec![named("Redis Cache", "Azure Redis Cache Enterprise")],
        ]);
        let svc = service(source);
        let query = QuerySpec::new("Databases", "westeurope", None, None)
            .unwrap()
            .with_product_name_contains(Some("redis"));

        let listing = svc.products(&query).await.unwrap();
        assert_eq!(
            listing.names.names,
            vec!["Azure Redis Cache", "Azure Redis Cache Enterprise"]
        );
        assert_eq!(listing.pages_fetched, 2);
        assert!(!listing.truncated);
    }

    #[tokio::test]
    async fn test_compute_is_sampled() {
        let source = FakeSource::new(vec![
            vec![named("Virtual Machines", "A"), named("Azure App Service", "B")],
            vec![named("Cloud Services", "C")],
        ]);
        let svc = service(source);
        let query = ServiceNamesQuery::new("Compute", "westeurope", 500).unwrap();

        let listing = svc.service_names(&query).await.unwrap();
        assert_eq!(listing.strategy, ListingStrategy::Sampled);
        assert!(!listing.is_complete());
        assert_eq!(listing.pages_fetched, 1);
        assert_eq!(
            listing.names.names,
            vec!["Azure App Service", "Virtual Machines"]
        );
    }

    #[tokio::test]
    async fn test_other_families_are_exhaustive() {
        let source = FakeSource::new(vec![
            vec![named("Storage", "A")],
            vec![named("Backup", "B")],
        ]);
        let svc = service(source);
        let query = ServiceNamesQuery::new("Storage", "westeurope", 500).unwrap();

        let listing = svc.service_names(&query).await.unwrap();
        assert_eq!(listing.strategy, ListingStrategy::Exhaustive);
        assert!(listing.is_complete());
        assert_eq!(listing.names.names, vec!["Backup", "Storage"]);
    }

    #[tokio::test]
    async fn test_exhaustive_listing_incomplete_when_capped() {
        let source = FakeSource::new(vec![vec![named("Storage", "A")]; 5]).endless();
        let svc = service(source);
        let query = ServiceNamesQuery::new("Storage", "", 500)
            .unwrap()
            .with_max_pages(2);

        let listing = svc.service_names(&query).await.unwrap();
        assert_eq!(listing.pages_fetched, 2);
        assert!(listing.truncated);
        assert!(!listing.is_complete());
    }

    #[tokio::test]
    async fn test_monthly_cost_no_records() {
        let svc = service(FakeSource::new(vec![vec![]]));
        let query = CostQuery::new("Nope", "westeurope", None, 730.0).unwrap();

        let estimate = svc.monthly_cost(&query).await.unwrap();
        assert!(estimate.breakdown.items.is_empty());
        assert_eq!(estimate.breakdown.currency, "USD");
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let svc = service(FakeSource::new(vec![vec![]]).failing_at(0));
        let query = QuerySpec::new("Storage", "westeurope", None, None).unwrap();
        assert!(svc.products(&query).await.is_err());
    }
}
