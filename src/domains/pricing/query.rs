//! Validated, call-scoped query descriptions.
//!
//! Each query builds its filter expression at construction time, so an
//! invalid value is rejected before any request is made and the filter that
//! was applied is always available for diagnostics.

use super::client::MAX_TOP;
use super::error::{PricingError, PricingResult};
use super::filter::{
    FIELD_PRODUCT_NAME, FIELD_REGION, FIELD_SERVICE_FAMILY, FIELD_SERVICE_NAME, FIELD_TYPE,
    Filter, FilterBuilder,
};
use super::paginator::DEFAULT_MAX_PAGES;

/// Query for product names within a service family.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    family: String,
    region: String,
    product_name_contains: Option<String>,
    limit: usize,
    max_pages: usize,
    filter: Filter,
}

impl QuerySpec {
    pub fn new(
        family: &str,
        region: &str,
        price_type: Option<&str>,
        service_name: Option<&str>,
    ) -> PricingResult<Self> {
        let filter = FilterBuilder::new()
            .require(FIELD_SERVICE_FAMILY, family)?
            .optional(FIELD_REGION, Some(region))?
            .optional(FIELD_TYPE, price_type)?
            .optional(FIELD_SERVICE_NAME, service_name)?
            .build();

        Ok(Self {
            family: family.to_string(),
            region: region.to_string(),
            product_name_contains: None,
            limit: 0,
            max_pages: DEFAULT_MAX_PAGES,
            filter,
        })
    }

    /// Keep only product names containing this text (case-insensitive).
    pub fn with_product_name_contains(mut self, contains: Option<&str>) -> Self {
        self.product_name_contains = contains.filter(|c| !c.is_empty()).map(str::to_string);
        self
    }

    /// Return at most `limit` names; zero means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn product_name_contains(&self) -> Option<&str> {
        self.product_name_contains.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// Query for the service names within a service family.
#[derive(Debug, Clone)]
pub struct ServiceNamesQuery {
    family: String,
    region: String,
    max_results: u32,
    max_pages: usize,
    filter: Filter,
}

impl ServiceNamesQuery {
    pub fn new(family: &str, region: &str, max_results: u32) -> PricingResult<Self> {
        if max_results == 0 {
            return Err(PricingError::invalid_input("max_results must be at least 1"));
        }
        let filter = FilterBuilder::new()
            .require(FIELD_SERVICE_FAMILY, family)?
            .optional(FIELD_REGION, Some(region))?
            .build();

        Ok(Self {
            family: family.to_string(),
            region: region.to_string(),
            max_results: max_results.min(MAX_TOP),
            max_pages: DEFAULT_MAX_PAGES,
            filter,
        })
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Page size used when the family is sampled, capped at the API maximum.
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}

/// Query for the priced line items of one product.
#[derive(Debug, Clone)]
pub struct CostQuery {
    product_name: String,
    region: String,
    monthly_hours: f64,
    max_pages: usize,
    filter: Filter,
}

impl CostQuery {
    pub fn new(
        product_name: &str,
        region: &str,
        price_type: Option<&str>,
        monthly_hours: f64,
    ) -> PricingResult<Self> {
        let filter = FilterBuilder::new()
            .require(FIELD_PRODUCT_NAME, product_name)?
            .optional(FIELD_REGION, Some(region))?
            .optional(FIELD_TYPE, price_type)?
            .build();

        Ok(Self {
            product_name: product_name.to_string(),
            region: region.to_string(),
            monthly_hours,
            max_pages: DEFAULT_MAX_PAGES,
            filter,
        })
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn monthly_hours(&self) -> f64 {
        self.monthly_hours
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }
}
