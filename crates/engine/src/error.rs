//! The module contains the error the engine can throw.
//!
//! Variants group into the categories the HTTP layer maps to statuses:
//!
//! - [`Unauthorized`] when no usable auth context exists.
//! - [`Forbidden`] when the actor's role or scope denies the operation.
//! - [`NotFound`] when a record does not exist in the actor's scope.
//! - [`InvalidInput`], [`Unbalanced`], [`VoucherState`], [`AlreadyExists`]
//!   for request-level failures.
//!
//!  [`Unauthorized`]: EngineError::Unauthorized
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`NotFound`]: EngineError::NotFound
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`Unbalanced`]: EngineError::Unbalanced
//!  [`VoucherState`]: EngineError::VoucherState
//!  [`AlreadyExists`]: EngineError::AlreadyExists
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("\"{0}\" already present!")]
    AlreadyExists(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unbalanced entries: {0}")]
    Unbalanced(String),
    #[error("Invalid voucher state: {0}")]
    VoucherState(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::AlreadyExists(a), Self::AlreadyExists(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::Unbalanced(a), Self::Unbalanced(b)) => a == b,
            (Self::VoucherState(a), Self::VoucherState(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
