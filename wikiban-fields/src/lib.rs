//! Ticket field descriptors and validation
//!
//! `wikiban-fields` is a standalone, schema-only crate. It models the field
//! descriptors a ticket store reports (`name`, optional label, anything else
//! the store attaches) and checks requested display-field names against that
//! set. It knows nothing about boards, columns or wiki pages — consumers hand
//! it the known-field list for the current request.

pub mod error;
pub mod types;
pub mod validation;

pub use error::{FieldsError, Result};
pub use types::FieldDef;
pub use validation::validate_fields;
