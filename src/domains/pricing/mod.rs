//! Pricing domain: the query-and-aggregation pipeline over the Azure Retail
//! Prices API.
//!
//! ## Pipeline
//!
//! - `filter` - OData filter expression builder (quote-escaping)
//! - `client` - HTTP price source with per-request timeout
//! - `paginator` - bounded, sequential continuation-link following
//! - `projection` - unique, sorted product/service name lists
//! - `cost` - monthly cost aggregation and ranking
//! - `service` - orchestration of the above for each tool
//!
//! Nothing here is cached between calls.

pub mod client;
pub mod cost;
mod error;
pub mod families;
pub mod filter;
pub mod model;
pub mod paginator;
pub mod projection;
pub mod query;
pub mod service;

pub use client::{PriceSource, RetailPriceClient};
pub use cost::{CostBreakdown, LineItem};
pub use error::{PricingError, PricingResult};
pub use model::{PricePage, PriceRecord};
pub use projection::NameSet;
pub use query::{CostQuery, QuerySpec, ServiceNamesQuery};
pub use service::{
    CostEstimate, ListingStrategy, PricingService, ProductListing, ServiceFamilies,
    ServiceListing,
};
