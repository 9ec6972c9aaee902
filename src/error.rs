//! Error types for the cookie cart.

use thiserror::Error;

/// Main error type for cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart cookie could not be decoded: {0}")]
    Decode(String),

    #[error("Cart could not be encoded: {0}")]
    Encode(String),

    #[error("Invalid cookie attribute: {0}")]
    InvalidAttribute(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Invalid cookie expiry: {0}")]
    InvalidExpiry(String),
}

impl From<http::header::InvalidHeaderValue> for CartError {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        CartError::InvalidHeader(e.to_string())
    }
}

impl From<time::error::Format> for CartError {
    fn from(e: time::error::Format) -> Self {
        CartError::InvalidExpiry(e.to_string())
    }
}

/// Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
