//! The board model: columns, status mapping and the ticket cache
//!
//! A `Board` is constructed per request from the embedded configuration
//! block, mutated by the request, reconciled, and discarded; nothing is
//! cached across requests. The status→column map is always derived from the
//! columns and never persisted on its own.

mod columns;
mod tickets;

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::{TicketStore, WikiStore, WikiStoreError};
use crate::types::{Column, TicketSnapshot};

use wikiban_fields::validate_fields;

/// Wiki change comment attached to every board save
const SAVE_COMMENT: &str = "Kanban board data changed";

/// The full kanban state derived from one embedded configuration block
pub struct Board {
    /// Host document name; identifies the embedded block
    pub name: String,
    /// Columns in display order. The first column receives newly added
    /// tickets.
    pub columns: Vec<Column>,
    /// Extra ticket fields exposed to clients
    pub fields: Vec<String>,
    /// Derived status -> column id map; rebuilt after any states change
    pub(crate) status_map: HashMap<String, u64>,
    /// Snapshot cache keyed by ticket id
    pub(crate) tickets: HashMap<u64, TicketSnapshot>,
}

/// The embedded block body. Older pages carry a bare column array instead
/// of the object form; both are readable, only the object form is written.
#[derive(Debug, Deserialize)]
struct BoardConfig {
    columns: Vec<Column>,
    #[serde(default)]
    fields: Vec<String>,
}

impl Board {
    /// Load a board from its host document and populate the snapshot cache.
    ///
    /// `detailed` lists the tickets to fetch at full fidelity. Fails with
    /// [`BoardError::InvalidData`] when the page, the block or the columns
    /// are missing or unusable, and with [`BoardError::Fields`] when the
    /// configured fields are unknown to the ticket store.
    pub async fn load(ctx: &BoardContext, name: &str, detailed: &[u64]) -> Result<Self> {
        tracing::debug!("loading board from wiki page {name}");

        let page = ctx.wiki().read(name).await.map_err(|err| match err {
            WikiStoreError::PageNotFound { name } => {
                BoardError::invalid_data(format!("wiki page \"{name}\" does not exist"))
            }
            other => BoardError::Wiki(other),
        })?;

        let body = ctx
            .syntax()
            .extract(&page)
            .map_err(|_| BoardError::invalid_data(format!("page \"{name}\" has no board block")))?;

        let config = parse_config(&body)?;
        if config.columns.is_empty() {
            return Err(BoardError::invalid_data("board has no columns"));
        }

        let known = ctx.tickets().fields().await?;
        validate_fields(&config.fields, &known)?;

        let mut board = Self {
            name: name.to_string(),
            columns: config.columns,
            fields: config.fields,
            status_map: HashMap::new(),
            tickets: HashMap::new(),
        };
        board.rebuild_status_map();
        board.fetch_snapshots(ctx, &known, detailed).await;

        Ok(board)
    }

    /// Ids of all tickets currently on the board, in column order
    pub fn ticket_ids(&self) -> Vec<u64> {
        self.columns
            .iter()
            .flat_map(|col| col.tickets.iter().copied())
            .collect()
    }

    /// The column a status maps to, if any
    pub fn status_column(&self, status: &str) -> Option<u64> {
        self.status_map.get(status).copied()
    }

    /// A cached snapshot, if the ticket is on the board
    pub fn snapshot(&self, id: u64) -> Option<&TicketSnapshot> {
        self.tickets.get(&id)
    }

    /// A column by id
    pub fn column(&self, id: u64) -> Option<&Column> {
        self.columns.iter().find(|col| col.id == id)
    }

    /// JSON representation of the board.
    ///
    /// With `include_tickets` each column's `tickets` list embeds the full
    /// snapshot objects (the client response shape); otherwise it stays a
    /// bare id list. `include_fields` adds the configured extra fields.
    pub fn to_json(&self, include_tickets: bool, include_fields: bool) -> Result<Value> {
        let mut root = Map::new();

        if include_tickets {
            let mut columns = Vec::with_capacity(self.columns.len());
            for col in &self.columns {
                let mut value = serde_json::to_value(col)?;
                let snapshots: Vec<&TicketSnapshot> = col
                    .tickets
                    .iter()
                    .filter_map(|id| self.tickets.get(id))
                    .collect();
                value["tickets"] = serde_json::to_value(&snapshots)?;
                columns.push(value);
            }
            root.insert("columns".into(), Value::Array(columns));
        } else {
            root.insert("columns".into(), serde_json::to_value(&self.columns)?);
        }

        if include_fields {
            root.insert("fields".into(), serde_json::to_value(&self.fields)?);
        }

        Ok(Value::Object(root))
    }

    /// Deterministic persistence form: pretty-printed, key-sorted, bare
    /// ticket ids — so unrelated re-saves produce stable page diffs
    pub fn to_persisted_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json(false, true)?)?)
    }

    /// Persist the columns back into the embedded block.
    ///
    /// A failing write is logged and swallowed; the in-memory board stays
    /// authoritative for the current response either way.
    pub async fn save(&self, ctx: &BoardContext) {
        tracing::debug!("saving board {}", self.name);
        if let Err(err) = self.try_save(ctx).await {
            tracing::error!("failed to save board {}: {err}", self.name);
        }
    }

    async fn try_save(&self, ctx: &BoardContext) -> Result<()> {
        let page = ctx.wiki().read(&self.name).await?;
        let updated = ctx.syntax().replace(&page, &self.to_persisted_string()?)?;
        ctx.wiki()
            .write(&self.name, &updated, ctx.author(), SAVE_COMMENT)
            .await?;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Board {
    /// Build a board directly from columns, bypassing the wiki page
    pub fn with_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        let mut board = Self {
            name: name.into(),
            columns,
            fields: Vec::new(),
            status_map: HashMap::new(),
            tickets: HashMap::new(),
        };
        board.rebuild_status_map();
        board
    }

    /// Seed a snapshot directly
    pub fn insert_snapshot(&mut self, snapshot: TicketSnapshot) {
        self.tickets.insert(snapshot.id, snapshot);
    }
}

fn parse_config(body: &str) -> Result<BoardConfig> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| BoardError::invalid_data(format!("board block is not valid JSON: {err}")))?;

    match value {
        Value::Array(_) => Ok(BoardConfig {
            columns: serde_json::from_value(value).map_err(invalid_columns)?,
            fields: Vec::new(),
        }),
        Value::Object(_) => serde_json::from_value(value).map_err(invalid_columns),
        _ => Err(BoardError::invalid_data(
            "board block must be an object or a column array",
        )),
    }
}

fn invalid_columns(err: serde_json::Error) -> BoardError {
    BoardError::invalid_data(format!("bad column configuration: {err}"))
}
