//! Error types for field validation

use thiserror::Error;

/// Result type for field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur when working with ticket field descriptors
#[derive(Debug, Error)]
pub enum FieldsError {
    /// One or more requested field names are unknown to the ticket store.
    /// All offending names are collected before this is raised.
    #[error("unknown ticket fields: {}", names.join(", "))]
    UnknownFields { names: Vec<String> },
}
