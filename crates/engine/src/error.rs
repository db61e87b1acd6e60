//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`PermissionDenied`] thrown when the permission gate refuses a scope.
//! - [`Validation`] thrown when a submitted form does not pass validation.
//! - [`Store`] thrown when the ledger store fails to persist a change.
//! - [`KeyNotFound`] thrown when an item are not found.
//!
//!  [`PermissionDenied`]: EngineError::PermissionDenied
//!  [`Validation`]: EngineError::Validation
//!  [`Store`]: EngineError::Store
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use config::ConfigError;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Validation(String),
    #[error("Store failure: {0}")]
    Store(String),
    #[error("A submission is already in progress")]
    SubmitInProgress,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    #[error(transparent)]
    Settings(#[from] ConfigError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::PermissionDenied(a), Self::PermissionDenied(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Store(a), Self::Store(b)) => a == b,
            (Self::SubmitInProgress, Self::SubmitInProgress) => true,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::Settings(a), Self::Settings(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
