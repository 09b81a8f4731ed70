//! FetchBoard command

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::board::Board;
use crate::context::BoardContext;
use crate::error::Result;

use super::Execute;

/// Fetch a board, optionally adding/removing tickets first.
///
/// Reconciliation always runs; drift alone is only persisted when the
/// caller may edit (`save_changes`), while an explicit add or remove forces
/// a save regardless.
#[derive(Debug, Deserialize)]
pub struct FetchBoard {
    /// Host wiki page name
    pub name: String,
    /// Tickets to return at full fidelity
    #[serde(default)]
    pub detailed: Vec<u64>,
    /// Tickets to add before reconciling
    #[serde(default)]
    pub add: Vec<u64>,
    /// Tickets to remove before reconciling
    #[serde(default)]
    pub remove: Vec<u64>,
    /// Whether the caller may persist drift repairs
    #[serde(default)]
    pub save_changes: bool,
}

impl FetchBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detailed: Vec::new(),
            add: Vec::new(),
            remove: Vec::new(),
            save_changes: false,
        }
    }

    pub fn detailed(mut self, ids: Vec<u64>) -> Self {
        self.detailed = ids;
        self
    }

    pub fn add(mut self, ids: Vec<u64>) -> Self {
        self.add = ids;
        self
    }

    pub fn remove(mut self, ids: Vec<u64>) -> Self {
        self.remove = ids;
        self
    }

    pub fn save_changes(mut self, allowed: bool) -> Self {
        self.save_changes = allowed;
        self
    }
}

#[async_trait]
impl Execute for FetchBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut board = Board::load(ctx, &self.name, &self.detailed).await?;

        let added = if self.add.is_empty() {
            0
        } else {
            board.add_tickets(ctx, &self.add).await
        };
        let removed = if self.remove.is_empty() {
            0
        } else {
            board.remove_tickets(&self.remove)
        };

        board
            .reconcile_and_save(ctx, self.save_changes, added > 0 || removed > 0)
            .await;

        board.to_json(true, false)
    }
}
