//! Ticket cache operations: fetch, add, remove, refresh
//!
//! Every fetch is isolated per ticket: a slow or failing ticket is logged
//! and skipped, never aborting the rest of the batch.

use std::collections::HashSet;

use wikiban_fields::FieldDef;

use crate::context::BoardContext;
use crate::error::Result;
use crate::store::TicketStore;
use crate::types::{group_changelog, TicketSnapshot};

use super::Board;

impl Board {
    /// Fetch snapshots for every ticket listed on the board. Ids in
    /// `detailed` get full fidelity; the rest stay minimal.
    pub(crate) async fn fetch_snapshots(
        &mut self,
        ctx: &BoardContext,
        known: &[FieldDef],
        detailed: &[u64],
    ) {
        self.tickets.clear();
        for id in self.ticket_ids() {
            match fetch_snapshot(ctx, id, known, detailed.contains(&id)).await {
                Ok(snapshot) => {
                    self.tickets.insert(id, snapshot);
                }
                Err(err) => tracing::warn!("failed to fetch ticket {id}: {err}"),
            }
        }
    }

    /// Add tickets to the board. New tickets always land at the end of the
    /// *first* column; the next reconciliation pass moves them where their
    /// status says. Returns how many were actually added.
    pub async fn add_tickets(&mut self, ctx: &BoardContext, ids: &[u64]) -> usize {
        if self.columns.is_empty() {
            return 0;
        }

        let current: HashSet<u64> = self.ticket_ids().into_iter().collect();
        let mut valid = Vec::new();

        for &id in ids {
            if current.contains(&id) || valid.contains(&id) {
                tracing::warn!("ticket {id} is already on the board");
                continue;
            }
            match fetch_snapshot(ctx, id, &[], false).await {
                Ok(snapshot) => {
                    self.tickets.insert(id, snapshot);
                    valid.push(id);
                }
                Err(err) => tracing::warn!("failed to fetch ticket {id}: {err}"),
            }
        }

        let added = valid.len();
        self.columns[0].tickets.extend(valid);
        added
    }

    /// Remove tickets from every column, dropping their snapshots.
    /// Returns how many snapshots were actually dropped.
    pub fn remove_tickets(&mut self, ids: &[u64]) -> usize {
        let mut removed = 0;
        let tickets = &mut self.tickets;

        for col in &mut self.columns {
            col.tickets.retain(|tid| {
                if ids.contains(tid) {
                    if tickets.remove(tid).is_some() {
                        removed += 1;
                    }
                    false
                } else {
                    true
                }
            });
        }

        removed
    }

    /// Refresh snapshots at minimal fidelity for the given ids, or for
    /// every ticket on the board when `ids` is `None`. A ticket that fails
    /// to fetch drops out of the cache (and, at the next reconciliation,
    /// off the board).
    pub async fn update_tickets(&mut self, ctx: &BoardContext, ids: Option<&[u64]>) {
        let targets: Vec<u64> = match ids {
            Some(ids) => ids.to_vec(),
            None => self.ticket_ids(),
        };

        for id in targets {
            match fetch_snapshot(ctx, id, &[], false).await {
                Ok(snapshot) => {
                    self.tickets.insert(id, snapshot);
                }
                Err(err) => {
                    tracing::warn!("failed to refresh ticket {id}: {err}");
                    self.tickets.remove(&id);
                }
            }
        }
    }
}

/// Fetch one snapshot at the requested fidelity
async fn fetch_snapshot(
    ctx: &BoardContext,
    id: u64,
    known: &[FieldDef],
    detailed: bool,
) -> Result<TicketSnapshot> {
    let data = ctx.tickets().fetch(id).await?;

    if detailed {
        let raw = ctx.tickets().changelog(id).await?;
        Ok(TicketSnapshot::detailed(
            &data,
            known,
            group_changelog(&raw),
        ))
    } else {
        Ok(TicketSnapshot::minimal(
            id,
            data.field_str("summary"),
            data.field_str("status"),
        ))
    }
}
