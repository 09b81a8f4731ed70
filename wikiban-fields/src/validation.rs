//! Requested-field validation.

use crate::error::{FieldsError, Result};
use crate::types::FieldDef;

/// Check every requested display-field name against the known field set.
///
/// Unknown names are collected and reported together, not fail-fast, so the
/// caller can surface all of them at once.
pub fn validate_fields(requested: &[String], known: &[FieldDef]) -> Result<()> {
    let names: Vec<String> = requested
        .iter()
        .filter(|name| !known.iter().any(|field| field.name == **name))
        .cloned()
        .collect();

    if names.is_empty() {
        Ok(())
    } else {
        Err(FieldsError::UnknownFields { names })
    }
}
