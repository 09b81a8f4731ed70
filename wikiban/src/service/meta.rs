//! BoardMeta command

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::BoardContext;
use crate::error::Result;
use crate::store::TicketStore;

use super::Execute;

/// Ticket fields that should offer a "not defined" choice
const OPTIONAL_FIELDS: &[&str] = &["milestone", "version"];

/// Board metadata: the ticket fields boards may expose
#[derive(Debug, Default, Deserialize)]
pub struct BoardMeta;

#[async_trait]
impl Execute for BoardMeta {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut fields = ctx.tickets().fields().await?;
        for field in &mut fields {
            if OPTIONAL_FIELDS.contains(&field.name.as_str()) {
                field.optional = true;
            }
        }
        Ok(json!({ "ticketFields": fields }))
    }
}
