//! Error types for authorization decisions
//!
//! This module defines the error taxonomy every decision in the core can
//! surface, and how each maps onto the HTTP layer the surrounding
//! services speak.

use thiserror::Error;

use crate::store::StoreError;

/// Authorization error types.
///
/// The taxonomy is deliberately small: every check either passes or fails
/// into exactly one of these buckets, and callers are expected to surface
/// them without retrying or escalating.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No valid session accompanied the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated, but a capability or scope check failed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A referenced resource id does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed input rejected before any store access
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness violation that survived the bounded retry
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The external store failed
    #[error("Store error: {0}")]
    Store(String),
}

/// Result type for authorization operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials are expected outcomes and should not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AccessError::Store(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::Forbidden(_) => 403,
            AccessError::NotFound(_) => 404,
            AccessError::Conflict(_) => 409,
            AccessError::Validation(_) => 422,
            AccessError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::Unauthenticated => "UNAUTHENTICATED",
            AccessError::Forbidden(_) => "FORBIDDEN",
            AccessError::NotFound(_) => "NOT_FOUND",
            AccessError::Conflict(_) => "CONFLICT",
            AccessError::Validation(_) => "VALIDATION_ERROR",
            AccessError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<StoreError> for AccessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { entity, key } => {
                AccessError::Conflict(format!("{entity} already exists for key {key}"))
            }
            StoreError::Backend(message) => AccessError::Store(message),
        }
    }
}
