//! UpdateBoard command

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::board::Board;
use crate::context::BoardContext;
use crate::error::Result;
use crate::store::TicketStore;
use crate::types::ColumnUpdate;

use super::Execute;

/// Apply a client-submitted column payload to a board.
///
/// Ticket field edits embedded in the payload reach the ticket store
/// *before* reconciliation, so the pass sees post-edit statuses; the board
/// is then force-saved so the stored configuration matches post-mutation
/// truth even when nothing moved.
#[derive(Debug, Deserialize)]
pub struct UpdateBoard {
    /// Host wiki page name
    pub name: String,
    /// Tickets to return at full fidelity
    #[serde(default)]
    pub detailed: Vec<u64>,
    /// Tickets to add before anything else
    #[serde(default)]
    pub add: Vec<u64>,
    /// Tickets to remove before anything else
    #[serde(default)]
    pub remove: Vec<u64>,
    /// The request body: one entry per updated column
    pub columns: Vec<ColumnUpdate>,
}

impl UpdateBoard {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnUpdate>) -> Self {
        Self {
            name: name.into(),
            detailed: Vec::new(),
            add: Vec::new(),
            remove: Vec::new(),
            columns,
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
}

#[async_trait]
impl Execute for UpdateBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut board = Board::load(ctx, &self.name, &self.detailed).await?;

        if !self.add.is_empty() {
            board.add_tickets(ctx, &self.add).await;
        }
        if !self.remove.is_empty() {
            board.remove_tickets(&self.remove);
        }

        // Ticket writes first, column structure second; a failed write is
        // logged and the remaining tickets still go through.
        let mut edited = Vec::new();
        for col in &self.columns {
            for ticket in col.tickets.as_deref().unwrap_or_default() {
                let Some(fields) = ticket.edits().filter(|fields| !fields.is_empty()) else {
                    continue;
                };
                match ticket.id() {
                    Some(id) => match ctx.tickets().update(id, fields, ctx.author(), "").await {
                        Ok(()) => edited.push(id),
                        Err(err) => tracing::error!("failed to save ticket {id}: {err}"),
                    },
                    None => match ctx.tickets().create(fields, ctx.author()).await {
                        Ok(id) => {
                            board.add_tickets(ctx, &[id]).await;
                        }
                        Err(err) => tracing::error!("failed to create ticket: {err}"),
                    },
                }
            }

            board.update_column(col);
        }

        if !edited.is_empty() {
            board.update_tickets(ctx, Some(&edited)).await;
        }

        board.reconcile_and_save(ctx, true, true).await;
        board.to_json(true, false)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::store::{MemoryTicketStore, MemoryWikiStore};
    use crate::types::TicketRef;

    use super::*;

    const PAGE: &str = "{{{#!KanbanBoard\n{\n  \"columns\": [\n    { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [1, 2, 3], \"wip\": 5 },\n    { \"id\": 2, \"name\": \"Done\", \"states\": [\"closed\"], \"tickets\": [], \"wip\": 5 }\n  ]\n}\n}}}\n";

    fn context() -> (Arc<MemoryTicketStore>, Arc<MemoryWikiStore>, BoardContext) {
        let tickets = Arc::new(MemoryTicketStore::new());
        tickets.insert(1, "One", "new");
        tickets.insert(2, "Two", "new");
        tickets.insert(3, "Three", "new");
        let wiki = Arc::new(MemoryWikiStore::with_page("Board", PAGE));
        let ctx = BoardContext::new(tickets.clone(), wiki.clone()).with_author("alice");
        (tickets, wiki, ctx)
    }

    #[tokio::test]
    async fn test_reorder_merges_against_server_list() {
        let (_tickets, wiki, ctx) = context();

        // Client saw only tickets 1 and 3 and swapped them
        let update = UpdateBoard::new(
            "Board",
            vec![ColumnUpdate::new(1).with_tickets(vec![TicketRef::Id(3), TicketRef::Id(1)])],
        );
        let json = update.execute(&ctx).await.unwrap();

        let ids: Vec<u64> = json["columns"][0]["tickets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);

        // Write-style requests always persist
        assert_eq!(wiki.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_embedded_edit_reaches_store_before_reconciliation() {
        let (tickets, _wiki, ctx) = context();

        // The client closed ticket 2 in place
        let body = json!([{
            "id": 1,
            "tickets": [
                { "id": 1 },
                { "id": 2, "status": "closed" },
                { "id": 3 }
            ]
        }]);
        let columns: Vec<ColumnUpdate> = serde_json::from_value(body).unwrap();

        let json = UpdateBoard::new("Board", columns).execute(&ctx).await.unwrap();

        // The store saw the edit, attributed to the acting author
        assert_eq!(tickets.ticket(2).unwrap().field_str("status"), "closed");
        assert_eq!(tickets.updates(), vec![(2, "alice".to_string())]);

        // Reconciliation saw the post-edit status and moved the ticket
        assert_eq!(json["columns"][1]["tickets"][0]["id"], 2);
    }

    #[tokio::test]
    async fn test_column_rename_and_wip() {
        let (_tickets, wiki, ctx) = context();

        let update = UpdateBoard::new(
            "Board",
            vec![ColumnUpdate::new(2).with_name("Finished").with_wip(7)],
        );
        let json = update.execute(&ctx).await.unwrap();

        assert_eq!(json["columns"][1]["name"], "Finished");
        assert_eq!(json["columns"][1]["wip"], 7);
        assert!(wiki.page("Board").unwrap().contains("Finished"));
    }

    #[tokio::test]
    async fn test_created_ticket_joins_the_board() {
        let (tickets, _wiki, ctx) = context();

        let body = json!([{
            "id": 1,
            "tickets": [
                { "id": 1 }, { "id": 2 }, { "id": 3 },
                { "summary": "Brand new", "status": "new" }
            ]
        }]);
        let columns: Vec<ColumnUpdate> = serde_json::from_value(body).unwrap();

        let json = UpdateBoard::new("Board", columns).execute(&ctx).await.unwrap();

        let created = tickets.ticket(4).unwrap();
        assert_eq!(created.field_str("summary"), "Brand new");

        let ids: Vec<u64> = json["columns"][0]["tickets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_u64().unwrap())
            .collect();
        assert!(ids.contains(&4));
    }
}
