//! Store collaborators - I/O seams for tickets and wiki pages
//!
//! The engine never talks to a tracker database or a page table directly; it
//! goes through these traits. Implementations provide access, not logic: the
//! board and service layers decide what to do with the data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use wikiban_fields::FieldDef;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryTicketStore, MemoryWikiStore};

/// Errors from the ticket store collaborator
#[derive(Debug, Error)]
pub enum TicketStoreError {
    /// No ticket with the given id
    #[error("ticket not found: {id}")]
    NotFound { id: u64 },

    /// Backend failure
    #[error("{message}")]
    Backend { message: String },
}

/// Errors from the document store collaborator
#[derive(Debug, Error)]
pub enum WikiStoreError {
    /// No page with the given name
    #[error("wiki page \"{name}\" does not exist")]
    PageNotFound { name: String },

    /// Backend failure
    #[error("{message}")]
    Backend { message: String },
}

/// A ticket as the store returns it: the raw field map plus creation and
/// last-change times.
#[derive(Debug, Clone)]
pub struct TicketData {
    pub id: u64,
    /// Field name -> value, as the store reports them
    pub fields: Map<String, Value>,
    /// Creation time
    pub time: DateTime<Utc>,
    /// Last modification time
    pub changetime: DateTime<Utc>,
}

impl TicketData {
    /// A field value as a string, empty when unset
    pub fn field_str(&self, name: &str) -> String {
        self.fields
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// One raw changelog item: a single field change at a point in time.
/// The store reports these ordered by time, one item per changed field.
#[derive(Debug, Clone)]
pub struct RawFieldChange {
    pub time: DateTime<Utc>,
    pub author: String,
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
    /// Whether the change is part of the permanent ticket history
    pub permanent: bool,
}

/// Authoritative ticket tracking store.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Fetch a ticket's current field values
    async fn fetch(&self, id: u64) -> Result<TicketData, TicketStoreError>;

    /// Create a ticket from the given field values, returning its id
    async fn create(
        &self,
        fields: &Map<String, Value>,
        author: &str,
    ) -> Result<u64, TicketStoreError>;

    /// Apply field changes to an existing ticket
    async fn update(
        &self,
        id: u64,
        fields: &Map<String, Value>,
        author: &str,
        comment: &str,
    ) -> Result<(), TicketStoreError>;

    /// The ticket's change history, ordered by time
    async fn changelog(&self, id: u64) -> Result<Vec<RawFieldChange>, TicketStoreError>;

    /// Field descriptors the store currently recognizes
    async fn fields(&self) -> Result<Vec<FieldDef>, TicketStoreError>;
}

/// Document store hosting the wiki pages boards are embedded in.
#[async_trait]
pub trait WikiStore: Send + Sync {
    /// Read a page's full text
    async fn read(&self, name: &str) -> Result<String, WikiStoreError>;

    /// Replace a page's full text
    async fn write(
        &self,
        name: &str,
        text: &str,
        author: &str,
        comment: &str,
    ) -> Result<(), WikiStoreError>;
}
