//! Ticket snapshots: cached copies of a ticket's store-side fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use wikiban_fields::FieldDef;

use super::changelog::ChangelogEntry;
use crate::store::TicketData;

/// A cached, partially- or fully-populated copy of a ticket.
///
/// Minimal fidelity carries id, summary and status — enough to list a ticket
/// and reconcile its column. Detailed fidelity adds the full field set,
/// creation/change times (millisecond epochs on the wire) and the grouped
/// changelog, for tickets a client asked to display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketSnapshot {
    pub id: u64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: String,

    /// Creation time, millisecond epoch
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub time: Option<DateTime<Utc>>,

    /// Last-change time, millisecond epoch
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub changetime: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<Vec<ChangelogEntry>>,

    /// Remaining ticket fields (detailed fidelity only)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TicketSnapshot {
    /// Minimal snapshot for a ticket merely listed on the board
    pub fn minimal(id: u64, summary: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            summary: summary.into(),
            status: status.into(),
            time: None,
            changetime: None,
            changelog: None,
            fields: Map::new(),
        }
    }

    /// Detailed snapshot carrying every field the store recognizes, the
    /// ticket's timestamps and its grouped change history
    pub fn detailed(
        data: &TicketData,
        known: &[FieldDef],
        changelog: Vec<ChangelogEntry>,
    ) -> Self {
        let mut fields = Map::new();
        for field in known {
            if field.name == "summary" || field.name == "status" {
                continue;
            }
            let value = data
                .fields
                .get(&field.name)
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            fields.insert(field.name.clone(), value);
        }

        Self {
            id: data.id,
            summary: data.field_str("summary"),
            status: data.field_str("status"),
            time: Some(data.time),
            changetime: Some(data.changetime),
            changelog: Some(changelog),
            fields,
        }
    }
}
