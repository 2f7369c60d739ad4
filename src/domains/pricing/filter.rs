//! OData filter expression builder.
//!
//! The Retail Prices API accepts a `$filter` query parameter made of
//! `<field> eq '<value>'` clauses joined with `and`. Values are quoted
//! string literals, so an embedded single quote is escaped by doubling it.

use std::fmt;

use super::error::{PricingError, PricingResult};

pub const FIELD_SERVICE_FAMILY: &str = "serviceFamily";
pub const FIELD_REGION: &str = "armRegionName";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_SERVICE_NAME: &str = "serviceName";
pub const FIELD_PRODUCT_NAME: &str = "productName";

/// A built filter expression, ready to be sent as `$filter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds an equality-only filter expression, clause by clause.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    clauses: Vec<String>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mandatory `field eq 'value'` clause. Empty values are rejected.
    pub fn require(self, field: &str, value: &str) -> PricingResult<Self> {
        if value.trim().is_empty() {
            return Err(PricingError::invalid_input(format!(
                "'{}' must not be empty",
                field
            )));
        }
        self.clause(field, value)
    }

    /// Add a `field eq 'value'` clause only when the value is non-empty.
    pub fn optional(self, field: &str, value: Option<&str>) -> PricingResult<Self> {
        match value {
            Some(v) if !v.is_empty() => self.clause(field, v),
            _ => Ok(self),
        }
    }

    fn clause(mut self, field: &str, value: &str) -> PricingResult<Self> {
        let literal = quote_literal(field, value)?;
        self.clauses.push(format!("{} eq {}", field, literal));
        Ok(self)
    }

    pub fn build(self) -> Filter {
        Filter(self.clauses.join(" and "))
    }
}

/// Render a value as an OData string literal.
///
/// Control characters cannot appear in a valid catalog value and are
/// rejected outright.
pub fn quote_literal(field: &str, value: &str) -> PricingResult<String> {
    if value.chars().any(char::is_control) {
        return Err(PricingError::invalid_input(format!(
            "'{}' contains control characters",
            field
        )));
    }
    Ok(format!("'{}'", value.replace('\'', "''")))
}
