//! Azure pricing tools module.
//!
//! The four tools follow the pricing workflow in order:
//! - `families`: list the service families (static reference table)
//! - `service_names`: service names within a family
//! - `products`: product names, with optional narrowing
//! - `monthly_cost`: priced line items and monthly total for one product
//!
//! Each tool has handlers for both HTTP and STDIO/TCP transports.

pub mod common;
pub mod families;
pub mod monthly_cost;
pub mod products;
pub mod service_names;

pub use families::{ListServiceFamiliesParams, ListServiceFamiliesTool};
pub use monthly_cost::{GetMonthlyCostParams, GetMonthlyCostTool};
pub use products::{GetProductsParams, GetProductsTool};
pub use service_names::{GetServiceNamesParams, GetServiceNamesTool};
