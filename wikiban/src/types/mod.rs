//! Core data types for the board engine

mod changelog;
mod column;
mod ticket;

pub use changelog::{group_changelog, ChangelogEntry, FieldChange};
pub use column::{Column, ColumnUpdate, TicketRef};
pub use ticket::TicketSnapshot;
