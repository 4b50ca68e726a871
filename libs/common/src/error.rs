//! Custom error types for the common library
//!
//! This module defines the store-level error type shared by every storage
//! adapter in the application.

use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Custom error type for document-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while connecting to the document store
    #[error("store connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred while executing a store operation
    #[error("store query error: {0}")]
    Query(#[source] MongoError),

    /// The supplied identifier is not a valid document id
    #[error("invalid document id: {0}")]
    InvalidId(String),

    /// No document matched the requested identifier or filter
    #[error("no matching document")]
    Missing,

    /// The store refused the write, typically a uniqueness violation
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The per-request deadline elapsed before the store answered
    #[error("store deadline elapsed")]
    Timeout,

    /// Configuration error
    #[error("store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
