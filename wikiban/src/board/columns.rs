//! Column configuration updates and the derived status map

use crate::merge::merge_order;
use crate::types::ColumnUpdate;

use super::Board;

impl Board {
    /// Re-derive the status -> column map from the current columns.
    /// When two columns list the same status, the later column wins.
    pub(crate) fn rebuild_status_map(&mut self) {
        self.status_map.clear();
        for col in &self.columns {
            for status in &col.states {
                self.status_map.insert(status.clone(), col.id);
            }
        }
    }

    /// Apply a client-submitted column update.
    ///
    /// Every present field except `id` overwrites the stored column. The
    /// ticket list is not replaced wholesale: the submitted order is merged
    /// against the current one, so tickets the client never saw survive.
    pub fn update_column(&mut self, update: &ColumnUpdate) {
        tracing::debug!("updating column {}", update.id);

        let Some(col) = self.columns.iter_mut().find(|col| col.id == update.id) else {
            tracing::warn!("no column {} on this board", update.id);
            return;
        };

        if let Some(name) = &update.name {
            col.name = name.clone();
        }
        if let Some(states) = &update.states {
            col.states = states.clone();
        }
        if let Some(wip) = update.wip {
            col.wip = wip;
        }
        if let Some(ids) = update.ticket_ids() {
            col.tickets = merge_order(&col.tickets, &ids);
        }
        for (key, value) in &update.extra {
            col.extra.insert(key.clone(), value.clone());
        }

        self.rebuild_status_map();
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Column, TicketRef};

    use super::*;

    fn board() -> Board {
        Board::with_columns(
            "Test",
            vec![
                Column::new(1, "New", vec!["new".into()], 5).with_tickets(vec![1, 2, 3, 4, 5]),
                Column::new(2, "Done", vec!["closed".into()], 5),
            ],
        )
    }

    #[test]
    fn test_update_overwrites_everything_but_id() {
        let mut board = board();
        board.update_column(
            &ColumnUpdate::new(2)
                .with_name("Finished")
                .with_states(vec!["closed".into(), "testing".into()])
                .with_wip(9),
        );

        let col = board.column(2).unwrap();
        assert_eq!(col.name, "Finished");
        assert_eq!(col.wip, 9);
        assert_eq!(board.status_column("testing"), Some(2));
    }

    #[test]
    fn test_update_merges_ticket_order() {
        let mut board = board();
        board.update_column(&ColumnUpdate::new(1).with_tickets(vec![
            TicketRef::Id(1),
            TicketRef::Id(4),
            TicketRef::Id(2),
            TicketRef::Id(5),
        ]));

        assert_eq!(board.column(1).unwrap().tickets, vec![1, 4, 2, 3, 5]);
    }

    #[test]
    fn test_update_unknown_column_is_ignored() {
        let mut board = board();
        board.update_column(&ColumnUpdate::new(42).with_name("Ghost"));
        assert!(board.column(42).is_none());
        assert_eq!(board.column(1).unwrap().name, "New");
    }

    #[test]
    fn test_later_column_wins_shared_status() {
        let board = Board::with_columns(
            "Test",
            vec![
                Column::new(1, "A", vec!["odd".into()], 1),
                Column::new(2, "B", vec!["odd".into()], 1),
            ],
        );
        assert_eq!(board.status_column("odd"), Some(2));
    }
}
