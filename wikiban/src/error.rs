//! Error types for the board engine

use thiserror::Error;

use crate::store::{TicketStoreError, WikiStoreError};

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Board configuration is missing, unparseable or unusable. Surfaced to
    /// the caller as a configuration problem, never retried.
    #[error("invalid board data: {message}")]
    InvalidData { message: String },

    /// No embedded board block in the host document (no start marker, or a
    /// start marker with no end marker after it)
    #[error("no board block found in document")]
    BlockNotFound,

    /// Requested display fields unknown to the ticket store
    #[error(transparent)]
    Fields(#[from] wikiban_fields::FieldsError),

    /// Ticket store failure
    #[error("ticket store error: {0}")]
    TicketStore(#[from] TicketStoreError),

    /// Document store failure
    #[error("document store error: {0}")]
    Wiki(#[from] WikiStoreError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create an invalid-data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
