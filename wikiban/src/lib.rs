//! Kanban boards reconciled against an authoritative ticket store
//!
//! A board lives as a JSON configuration block embedded in a wiki page:
//! columns with work-in-progress limits, each listing the ticket statuses it
//! covers and the ordered tickets it currently holds. The ticket store, not
//! the board, owns ticket truth — so every request reloads the board, checks
//! each ticket's live status against the column it sits in, moves drifted
//! tickets to the front of their correct column, and writes the repaired
//! configuration back into the page without touching any surrounding text.
//!
//! ## Embedded configuration
//!
//! ```text
//! = Sprint board =
//! Some wiki prose around the block.
//!
//! {{{#!KanbanBoard
//! {
//!   "columns": [
//!     { "id": 1, "name": "New", "states": ["new"], "tickets": [100, 124], "wip": 5 },
//!     { "id": 2, "name": "Ongoing", "states": ["assigned", "accepted"], "tickets": [], "wip": 3 },
//!     { "id": 3, "name": "Done", "states": ["closed"], "tickets": [], "wip": 5 }
//!   ],
//!   "fields": ["priority"]
//! }
//! }}}
//! ```
//!
//! Fenced (` ```kanban `) and tagged (`<kanban>`) block syntaxes are accepted
//! as well; see [`BlockSyntax`]. A bare column array without the wrapping
//! object is readable for older pages, but saves always write the object form.
//!
//! ## Basic usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wikiban::{BoardContext, Execute, FetchBoard};
//!
//! let ctx = BoardContext::new(ticket_store, wiki_store).with_author("alice");
//! let board = FetchBoard::new("SprintBoard")
//!     .detailed(vec![100])
//!     .save_changes(true)
//!     .execute(&ctx)
//!     .await?;
//! ```
//!
//! Boards are rebuilt from the page and the ticket store on every request and
//! dropped with it; there is no cross-request cache and no internal locking.
//! Concurrent writers resolve to last-writer-wins in the document store, and
//! the next request re-derives a correct board either way.

pub mod block;
pub mod board;
mod context;
mod error;
pub mod merge;
mod reconcile;
pub mod service;
pub mod store;
pub mod types;

pub use block::BlockSyntax;
pub use board::Board;
pub use context::BoardContext;
pub use error::{BoardError, Result};
pub use merge::merge_order;
pub use service::{parse_id_list, BoardMeta, Execute, FetchBoard, SaveTicket, UpdateBoard};
pub use types::{ChangelogEntry, Column, ColumnUpdate, FieldChange, TicketRef, TicketSnapshot};
