//! SaveTicket command

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::board::Board;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::store::TicketStore;

use super::Execute;

/// Create or edit a single ticket, then return the reconciled board.
///
/// The payload edits an existing ticket when it carries an `id` and creates
/// one otherwise; a created ticket is put on the board immediately.
#[derive(Debug, Deserialize)]
pub struct SaveTicket {
    /// Host wiki page name
    pub name: String,
    /// Ticket payload: an `id` plus field values, or field values alone
    pub ticket: Map<String, Value>,
}

impl SaveTicket {
    pub fn new(name: impl Into<String>, ticket: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            ticket,
        }
    }
}

#[async_trait]
impl Execute for SaveTicket {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut board = Board::load(ctx, &self.name, &[]).await?;

        let mut fields = self.ticket.clone();
        match fields.remove("id") {
            Some(id) => {
                let id = id
                    .as_u64()
                    .ok_or_else(|| BoardError::invalid_data("ticket id must be an integer"))?;
                ctx.tickets().update(id, &fields, ctx.author(), "").await?;
                board.update_tickets(ctx, Some(&[id])).await;
            }
            None => {
                let id = ctx.tickets().create(&fields, ctx.author()).await?;
                tracing::debug!("created ticket {id}");
                board.add_tickets(ctx, &[id]).await;
            }
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

    use super::*;

    const PAGE: &str = "{{{#!KanbanBoard\n{\n  \"columns\": [\n    { \"id\": 1, \"name\": \"New\", \"states\": [\"new\"], \"tickets\": [100], \"wip\": 5 },\n    { \"id\": 2, \"name\": \"Done\", \"states\": [\"closed\"], \"tickets\": [], \"wip\": 5 }\n  ]\n}\n}}}\n";

    fn context() -> (Arc<MemoryTicketStore>, Arc<MemoryWikiStore>, BoardContext) {
        let tickets = Arc::new(MemoryTicketStore::new());
        tickets.insert(100, "Hundred", "new");
        let wiki = Arc::new(MemoryWikiStore::with_page("Board", PAGE));
        let ctx = BoardContext::new(tickets.clone(), wiki.clone()).with_author("alice");
        (tickets, wiki, ctx)
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_edit_moves_ticket_with_status() {
        let (tickets, wiki, ctx) = context();

        let save = SaveTicket::new("Board", payload(json!({ "id": 100, "status": "closed" })));
        let json = save.execute(&ctx).await.unwrap();

        assert_eq!(tickets.ticket(100).unwrap().field_str("status"), "closed");
        assert_eq!(json["columns"][1]["tickets"][0]["id"], 100);
        // Write path always persists
        assert_eq!(wiki.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_create_puts_ticket_on_the_board() {
        let (tickets, _wiki, ctx) = context();

        let save = SaveTicket::new("Board", payload(json!({ "summary": "Fresh", "status": "new" })));
        let json = save.execute(&ctx).await.unwrap();

        // Creation goes through create, not update, and allocates after 100
        assert!(tickets.updates().is_empty());
        let id = 101;
        assert_eq!(tickets.ticket(id).unwrap().field_str("summary"), "Fresh");

        let ids: Vec<u64> = json["columns"][0]["tickets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![100, id]);
    }

    #[tokio::test]
    async fn test_edit_of_unknown_ticket_fails() {
        let (_tickets, _wiki, ctx) = context();

        let save = SaveTicket::new("Board", payload(json!({ "id": 999, "status": "closed" })));
        let result = save.execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::TicketStore(_))));
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let (_tickets, _wiki, ctx) = context();

        let save = SaveTicket::new("Board", payload(json!({ "id": "abc", "status": "new" })));
        let result = save.execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::InvalidData { .. })));
    }
}
