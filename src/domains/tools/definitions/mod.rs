//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod pricing;

pub use pricing::{
    GetMonthlyCostParams, GetMonthlyCostTool, GetProductsParams, GetProductsTool,
    GetServiceNamesParams, GetServiceNamesTool, ListServiceFamiliesParams,
    ListServiceFamiliesTool,
};
