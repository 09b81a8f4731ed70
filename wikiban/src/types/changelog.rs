//! Grouped ticket change history
//!
//! The ticket store reports one raw item per changed field. Clients want one
//! entry per edit, so consecutive items sharing a timestamp are folded
//! together before they reach a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::RawFieldChange;

/// One field change within a changelog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldChange {
    pub field: String,
    #[serde(rename = "oldValue")]
    pub old_value: Value,
    #[serde(rename = "newValue")]
    pub new_value: Value,
}

/// A group of field changes sharing one timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangelogEntry {
    /// Millisecond epoch
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    pub author: String,
    pub changes: Vec<FieldChange>,
}

/// Fold the store's raw per-field log into per-timestamp entries.
///
/// The raw log is ordered by time; a new entry starts when the timestamp
/// strictly increases.
pub fn group_changelog(raw: &[RawFieldChange]) -> Vec<ChangelogEntry> {
    let mut entries: Vec<ChangelogEntry> = Vec::new();

    for item in raw {
        let change = FieldChange {
            field: item.field.clone(),
            old_value: item.old_value.clone(),
            new_value: item.new_value.clone(),
        };

        match entries.last_mut() {
            Some(last) if item.time <= last.time => last.changes.push(change),
            _ => entries.push(ChangelogEntry {
                time: item.time,
                author: item.author.clone(),
                changes: vec![change],
            }),
        }
    }

    entries
}
