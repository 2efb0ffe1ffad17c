//! Errors raised by catalog and ledger operations.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Why a catalog or ledger operation refused to change anything.
///
/// Login and permission failures are `AuthError` / `AuthzError` in the auth
/// crate and never reach the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input under the strict policy: blank SKU or name, negative
    /// threshold, zero-quantity movement, malformed config value.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A movement whose quantities disagree (`new != previous ± quantity`) or
    /// that would take stock below zero.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Text that does not parse as a product, movement or user id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No product with that id (drafting a movement against it).
    #[error("not found")]
    NotFound,

    /// Stock changed since the movement was drafted, a duplicate SKU, or a
    /// poisoned ledger lock.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
