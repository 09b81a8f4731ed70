//! Status-driven reconciliation
//!
//! A ticket's column membership is derived state: the authoritative status
//! decides where the ticket belongs. Each pass rebuilds every column's list
//! from live statuses, reports whether anything drifted, and persists when
//! the outcome (or the caller) asks for it. Running a second pass with no
//! intervening status change is a no-op.

use std::collections::HashMap;

use crate::board::Board;
use crate::context::BoardContext;

impl Board {
    /// Re-derive column membership from ticket statuses.
    ///
    /// Tickets already in their correct column keep their relative order.
    /// Moved tickets go to the *front* of their target column, so the most
    /// recently changed work surfaces first. Ids without a snapshot
    /// (deleted or unfetchable tickets) are dropped from all columns. A
    /// status that maps to no column leaves its ticket where it is.
    ///
    /// Returns whether any ticket changed columns.
    pub fn reconcile(&mut self) -> bool {
        let mut modified = false;

        let old_lists: HashMap<u64, Vec<u64>> = self
            .columns
            .iter()
            .map(|col| (col.id, col.tickets.clone()))
            .collect();
        let mut new_lists: HashMap<u64, Vec<u64>> = self
            .columns
            .iter()
            .map(|col| (col.id, Vec::new()))
            .collect();

        for col in &self.columns {
            for &tid in &col.tickets {
                let Some(snapshot) = self.tickets.get(&tid) else {
                    tracing::debug!("dropping ticket {tid}: no snapshot");
                    continue;
                };

                let target = match self.status_map.get(&snapshot.status) {
                    Some(&target) => target,
                    None => {
                        tracing::warn!(
                            "status \"{}\" of ticket {tid} maps to no column, leaving it in column {}",
                            snapshot.status,
                            col.id
                        );
                        col.id
                    }
                };

                if target == col.id {
                    if let Some(list) = new_lists.get_mut(&col.id) {
                        list.push(tid);
                    }
                } else if old_lists
                    .get(&target)
                    .is_some_and(|list| list.contains(&tid))
                {
                    // Already listed in its target column; this stray copy
                    // just disappears.
                    tracing::debug!("ticket {tid} is already listed in column {target}");
                } else {
                    tracing::debug!("moving ticket {tid} from column {} to column {target}", col.id);
                    modified = true;
                    if let Some(list) = new_lists.get_mut(&target) {
                        list.insert(0, tid);
                    }
                }
            }
        }

        for col in &mut self.columns {
            if let Some(list) = new_lists.remove(&col.id) {
                col.tickets = list;
            }
        }

        modified
    }

    /// Run a reconciliation pass and persist when the outcome calls for it:
    /// on drift if the caller may save (`save_changes`), or unconditionally
    /// when `force_save` is set (callers force-save after any write so the
    /// stored configuration matches post-mutation truth).
    ///
    /// Returns whether the pass detected drift.
    pub async fn reconcile_and_save(
        &mut self,
        ctx: &BoardContext,
        save_changes: bool,
        force_save: bool,
    ) -> bool {
        let modified = self.reconcile();
        if (modified && save_changes) || force_save {
            self.save(ctx).await;
        }
        modified
    }
}
