//! Field descriptor types.
//!
//! A `FieldDef` is a ticket field as the ticket store reports it. Only the
//! name is required; whatever else the store attaches (type, options, order)
//! rides along in the open attribute map and survives serialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ticket field descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Field name as tickets carry it (e.g. "status", "milestone")
    pub name: String,

    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether the field may be left unset on a ticket. Set by the service
    /// layer for fields like milestone; serialized as `kanbanOptional` so
    /// clients can render a "not defined" choice.
    #[serde(
        rename = "kanbanOptional",
        default,
        skip_serializing_if = "is_false"
    )]
    pub optional: bool,

    /// Any further descriptor attributes the store reports
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl FieldDef {
    /// Create a descriptor with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            optional: false,
            extra: Map::new(),
        }
    }

    /// Attach a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the field as optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}
