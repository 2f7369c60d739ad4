//! Pricing-specific error types.

use thiserror::Error;

/// A specialized Result type for pricing pipeline operations.
pub type PricingResult<T> = std::result::Result<T, PricingError>;

/// Errors that can occur while querying the Azure Retail Prices API.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The HTTP request could not be completed (DNS, connect, timeout, body read).
    #[error("Error connecting to API: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream API answered with a non-success status code.
    #[error("Upstream API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The upstream response body did not have the expected shape.
    #[error("Unexpected response from API: {0}")]
    Decode(String),

    /// A caller-supplied value was rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PricingError {
    /// Create a new status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new "invalid input" error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
