//! Common utilities shared across the pricing tools.
//!
//! Argument parsing for numeric inputs, the shared error payload, and
//! helpers that turn serializable payloads into `CallToolResult`s.

use rmcp::model::{CallToolResult, Content};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::tools::ToolError;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Longest month, in hours (31 days).
pub const MAX_MONTHLY_HOURS: f64 = 744.0;

/// A numeric argument as sent by the client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumericArg {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Parse a non-negative integer argument, or return `default` when absent.
pub fn parse_count(name: &str, arg: Option<&NumericArg>, default: u64) -> Result<u64, ToolError> {
    let invalid = || {
        ToolError::invalid_arguments(format!("'{}' must be a non-negative integer", name))
    };

    match arg {
        None => Ok(default),
        Some(NumericArg::Integer(i)) => u64::try_from(*i).map_err(|_| invalid()),
        Some(NumericArg::Float(f)) => {
            if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u32::MAX as f64 {
                Ok(*f as u64)
            } else {
                Err(invalid())
            }
        }
        Some(NumericArg::Text(s)) => s.trim().parse::<u64>().map_err(|_| invalid()),
    }
}

/// Parse the `monthly_hours` argument: a number in `(0, 744]`.
pub fn parse_hours(arg: Option<&NumericArg>, default: f64) -> Result<f64, ToolError> {
    let hours = match arg {
        None => return Ok(default),
        Some(NumericArg::Integer(i)) => *i as f64,
        Some(NumericArg::Float(f)) => *f,
        Some(NumericArg::Text(s)) => s.trim().parse::<f64>().map_err(|_| {
            ToolError::invalid_arguments(format!("'monthly_hours' is not a number: '{}'", s))
        })?,
    };

    if hours.is_finite() && hours > 0.0 && hours <= MAX_MONTHLY_HOURS {
        Ok(hours)
    } else {
        Err(ToolError::invalid_arguments(format!(
            "'monthly_hours' must be greater than 0 and at most {}, got {}",
            MAX_MONTHLY_HOURS, hours
        )))
    }
}

/// Use the given region, or the default when the argument is absent.
///
/// An explicit empty region is kept, which drops the region clause and
/// queries every region.
pub fn region_or<'a>(region: Option<&'a str>, default: &'a str) -> &'a str {
    match region {
        Some(r) => r.trim(),
        None => default,
    }
}

/// Structured payload of every failed tool call.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_applied: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            message: message.into(),
            filter_applied: None,
            service_family: None,
            product_name: None,
            region: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_applied = Some(filter.into());
        self
    }

    pub fn with_service_family(mut self, family: impl Into<String>) -> Self {
        self.service_family = Some(family.into());
        self
    }

    pub fn with_product(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl From<&ToolError> for ErrorResponse {
    fn from(error: &ToolError) -> Self {
        Self::new(error.to_string())
    }
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, data: &T) -> CallToolResult {
    match serde_json::to_value(data) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(value),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(ErrorResponse::new(format!(
            "Failed to serialize result: {}",
            e
        ))),
    }
}

/// Create an error result carrying the structured error payload.
pub fn error_result(response: ErrorResponse) -> CallToolResult {
    warn!("{}", response.message);
    let structured = serde_json::to_value(&response).ok();
    CallToolResult {
        content: vec![Content::text(response.message)],
        structured_content: structured,
        is_error: Some(true),
        meta: None,
    }
}

/// Serialize a full `CallToolResult` for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: &CallToolResult) -> Result<serde_json::Value, String> {
    serde_json::to_value(result).map_err(|e| e.to_string())
}

/// Parse HTTP tool arguments into a parameter struct.
#[cfg(feature = "http")]
pub fn parse_http_arguments<T: serde::de::DeserializeOwned>(
    arguments: serde_json::Value,
) -> Result<T, String> {
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Structured content of a tool result, for assertions.
    pub(crate) fn structured(result: &CallToolResult) -> &serde_json::Value {
        result
            .structured_content
            .as_ref()
            .expect("structured_content should be present")
    }

    #[test]
    fn test_numeric_arg_deserialize() {
        let arg: NumericArg = serde_json::from_str("5").unwrap();
        assert_eq!(arg, NumericArg::Integer(5));
        let arg: NumericArg = serde_json::from_str("7.5").unwrap();
        assert_eq!(arg, NumericArg::Float(7.5));
        let arg: NumericArg = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(arg, NumericArg::Text("12".to_string()));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("limit", None, 0).unwrap(), 0);
        assert_eq!(parse_count("limit", Some(&NumericArg::Integer(5)), 0).unwrap(), 5);
        assert_eq!(parse_count("limit", Some(&NumericArg::Float(3.0)), 0).unwrap(), 3);
        assert_eq!(
            parse_count("limit", Some(&NumericArg::Text(" 12 ".into())), 0).unwrap(),
            12
        );
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert!(parse_count("limit", Some(&NumericArg::Integer(-1)), 0).is_err());
        assert!(parse_count("limit", Some(&NumericArg::Float(2.5)), 0).is_err());
        assert!(parse_count("limit", Some(&NumericArg::Text("ten".into())), 0).is_err());
        let err = parse_count("limit", Some(&NumericArg::Text("-3".into())), 0).unwrap_err();
        assert!(err.to_string().contains("'limit'"));
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours(None, 730.0).unwrap(), 730.0);
        assert_eq!(parse_hours(Some(&NumericArg::Integer(100)), 730.0).unwrap(), 100.0);
        assert_eq!(
            parse_hours(Some(&NumericArg::Text("365.5".into())), 730.0).unwrap(),
            365.5
        );
        assert!(parse_hours(Some(&NumericArg::Integer(-5)), 730.0).is_err());
        assert!(parse_hours(Some(&NumericArg::Integer(0)), 730.0).is_err());
        assert!(parse_hours(Some(&NumericArg::Integer(1000)), 730.0).is_err());
        assert!(parse_hours(Some(&NumericArg::Text("lots".into())), 730.0).is_err());
    }

    #[test]
    fn test_region_or() {
        assert_eq!(region_or(None, "westeurope"), "westeurope");
        assert_eq!(region_or(Some(""), "westeurope"), "");
        assert_eq!(region_or(Some("  "), "westeurope"), "");
        assert_eq!(region_or(Some(" eastus "), "westeurope"), "eastus");
        assert_eq!(region_or(Some("eastus"), "westeurope"), "eastus");
    }

    #[test]
    fn test_error_result_is_structured() {
        let result = error_result(
            ErrorResponse::new("Product 'X' not found in region 'westeurope'.")
                .with_product("X")
                .with_region("westeurope")
                .with_filter("productName eq 'X'"),
        );
        assert_eq!(result.is_error, Some(true));
        let data = structured(&result);
        assert_eq!(data["status"], "error");
        assert_eq!(data["product_name"], "X");
        assert_eq!(data["filter_applied"], "productName eq 'X'");
        assert!(data.get("service_family").is_none());
    }
}
