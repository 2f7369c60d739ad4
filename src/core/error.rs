//! Error types and handling for the MCP server.
//!
//! Transport failures keep their own `TransportError`; this type covers
//! building the server itself.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
///
/// Returned by `McpServer::new`.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the pricing pipeline, such as an HTTP client
    /// that cannot be built.
    #[error("Pricing error: {0}")]
    Pricing(#[from] crate::domains::pricing::PricingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::pricing::PricingError;

    #[test]
    fn test_pricing_error_converts() {
        let err: Error = PricingError::invalid_input("bad region").into();
        assert!(matches!(err, Error::Pricing(_)));
        assert!(err.to_string().starts_with("Pricing error:"));
    }

    #[test]
    fn test_server_construction_uses_error() {
        let server: Result<crate::core::McpServer> =
            crate::core::McpServer::new(crate::core::Config::default());
        assert!(server.is_ok());
    }
}
