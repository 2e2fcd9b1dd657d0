//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a transaction id is not in its collection.
//! - [`InvalidAmount`] thrown when an amount is not strictly positive or can't
//!   be parsed.
//! - [`UnknownDriver`] thrown by strict engines when a driver id is not
//!   registered.
//! - [`Storage`] thrown when the backing store fails to persist a mutation.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`UnknownDriver`]: EngineError::UnknownDriver
//!  [`Storage`]: EngineError::Storage
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown driver: {0}")]
    UnknownDriver(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::UnknownDriver(a), Self::UnknownDriver(b)) => a == b,
            (Self::InvalidFilter(a), Self::InvalidFilter(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
