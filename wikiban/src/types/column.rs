//! Column types: the stored column and the client-submitted update shape

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A board column: an ordered bucket of tickets.
///
/// `states` lists the ticket statuses that place a ticket here; `wip` is the
/// work-in-progress limit clients enforce when dragging. Configuration keys
/// this engine does not know about survive a load/save round-trip through
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    /// Unique within the board
    pub id: u64,
    pub name: String,
    /// Ticket statuses that map to this column
    pub states: Vec<String>,
    /// Ordered ticket ids
    #[serde(default)]
    pub tickets: Vec<u64>,
    /// Work-in-progress limit
    pub wip: u64,
    /// Open attribute map for forward compatibility
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Column {
    pub fn new(id: u64, name: impl Into<String>, states: Vec<String>, wip: u64) -> Self {
        Self {
            id,
            name: name.into(),
            states,
            tickets: Vec::new(),
            wip,
            extra: Map::new(),
        }
    }

    /// Set the initial ticket list
    pub fn with_tickets(mut self, tickets: Vec<u64>) -> Self {
        self.tickets = tickets;
        self
    }
}

/// A client-submitted column update.
///
/// Present keys overwrite the stored column; `id` only selects the target.
/// The ticket list may arrive as bare ids or as full ticket objects — objects
/// may carry field edits for the service layer to write to the ticket store.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnUpdate {
    /// The column to update
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default)]
    pub tickets: Option<Vec<TicketRef>>,
    #[serde(default)]
    pub wip: Option<u64>,
    /// Any further keys, applied to the column's open attribute map
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnUpdate {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            states: None,
            tickets: None,
            wip: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_states(mut self, states: Vec<String>) -> Self {
        self.states = Some(states);
        self
    }

    pub fn with_tickets(mut self, tickets: Vec<TicketRef>) -> Self {
        self.tickets = Some(tickets);
        self
    }

    pub fn with_wip(mut self, wip: u64) -> Self {
        self.wip = Some(wip);
        self
    }

    /// The submitted ticket list projected to ids, in submitted order.
    /// References without an id (tickets still to be created) are skipped.
    pub fn ticket_ids(&self) -> Option<Vec<u64>> {
        self.tickets
            .as_ref()
            .map(|list| list.iter().filter_map(TicketRef::id).collect())
    }
}

/// A ticket reference in a column payload: either a bare id or a ticket
/// object. Objects without an id describe tickets that do not exist yet.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TicketRef {
    Id(u64),
    Object {
        #[serde(default)]
        id: Option<u64>,
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
}

impl TicketRef {
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Object { id, .. } => *id,
        }
    }

    /// Field edits carried by the reference; `None` for bare ids
    pub fn edits(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Id(_) => None,
            Self::Object { fields, .. } => Some(fields),
        }
    }
}
