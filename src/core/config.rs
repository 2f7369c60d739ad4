//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use crate::domains::pricing::cost::DEFAULT_MONTHLY_HOURS;
use crate::domains::pricing::paginator::DEFAULT_MAX_PAGES;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default Azure Retail Prices endpoint.
pub const DEFAULT_API_URL: &str = "https://prices.azure.com/api/retail/prices";

/// Default Azure Retail Prices API version.
pub const DEFAULT_API_VERSION: &str = "2023-01-01-preview";

/// Accepted log levels, lowercase.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Azure Retail Prices API and cost calculation settings.
    pub pricing: PricingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Debug mode forces the `debug` level regardless of `level`.
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
        }
    }
}

impl LoggingConfig {
    /// Load `MCP_LOG_LEVEL` and `MCP_DEBUG` (and `.env`, if present).
    ///
    /// Needs nothing else from the environment, so logging can be set up
    /// before the rest of the configuration is read and validated.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.level = validate_log_level(&level);
        }

        if let Ok(debug) = std::env::var("MCP_DEBUG") {
            config.debug = parse_bool(&debug);
        }

        config
    }

    /// The level actually used to initialise logging.
    pub fn effective_level(&self) -> &str {
        if self.debug { "debug" } else { &self.level }
    }
}

/// Configuration for the pricing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Retail Prices endpoint, without trailing slash.
    pub api_url: String,

    /// Value sent as `api-version`.
    pub api_version: String,

    /// Default hours per month for cost estimates.
    pub hours_in_month: f64,

    /// Default price type for cost estimates (e.g. "Consumption").
    pub default_price_type: String,

    /// Region used when a tool call does not name one.
    pub default_region: String,

    /// Maximum number of pages fetched per call.
    pub max_pages: usize,

    /// Timeout for each upstream HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            hours_in_month: DEFAULT_MONTHLY_HOURS,
            default_price_type: "Consumption".to_string(),
            default_region: "westeurope".to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_secs: 10,
        }
    }
}

impl PricingConfig {
    /// Load pricing settings from `MCP_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MCP_AZURE_RETAIL_PRICES_URL") {
            config.api_url = normalize_api_url(&url);
        }

        if let Ok(version) = std::env::var("MCP_AZURE_API_VERSION") {
            config.api_version = validate_api_version(&version);
        }

        if let Some(hours) = parse_env::<f64>("MCP_HOURS_IN_MONTH") {
            if hours > 0.0 && hours.is_finite() {
                config.hours_in_month = hours;
            } else {
                warn!("Ignoring MCP_HOURS_IN_MONTH={}: must be positive", hours);
            }
        }

        if let Ok(price_type) = std::env::var("MCP_PRICE_TYPE") {
            let price_type = price_type.trim();
            if !price_type.is_empty() {
                config.default_price_type = price_type.to_string();
            }
        }

        if let Ok(region) = std::env::var("MCP_DEFAULT_REGION") {
            let region = region.trim();
            if !region.is_empty() {
                config.default_region = region.to_string();
            }
        }

        if let Some(pages) = parse_env::<usize>("MCP_MAX_PAGES") {
            config.max_pages = pages.max(1);
        }

        if let Some(secs) = parse_env::<u64>("MCP_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = secs.max(1);
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "azure-pricing-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = TransportConfig::from_env();
        config.pricing = PricingConfig::from_env();

        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={}: not a valid value", key, raw);
            None
        }
    }
}

/// Interpret common truthy spellings; anything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Lowercase a log level, falling back to `info` for unknown values.
pub fn validate_log_level(level: &str) -> String {
    let level = level.trim().to_lowercase();
    let level = match level.as_str() {
        "warning" => "warn".to_string(),
        "critical" => "error".to_string(),
        _ => level,
    };

    if LOG_LEVELS.contains(&level.as_str()) {
        level
    } else {
        warn!("Invalid log level '{}', using 'info'", level);
        "info".to_string()
    }
}

/// Ensure the API URL has a scheme and no trailing slash.
pub fn normalize_api_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return DEFAULT_API_URL.to_string();
    }

    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

/// Accept versions shaped like `YYYY-MM-DD[-suffix]`, else use the default.
pub fn validate_api_version(version: &str) -> String {
    let version = version.trim();
    let date_parts: Vec<&str> = version.splitn(4, '-').take(3).collect();

    let valid = date_parts.len() == 3
        && date_parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    if valid {
        version.to_string()
    } else {
        warn!(
            "Invalid API version '{}', using '{}'",
            version, DEFAULT_API_VERSION
        );
        DEFAULT_API_VERSION.to_string()
    }
}
