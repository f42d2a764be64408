//! Field validation helpers for raw facility records.
//!
//! A single pair of required/optional accessors is reused for every
//! mandatory check in the decode pipeline, so all missing-field failures
//! carry the same shape and name the offending property.

use crate::error::{FacilitiesError, Result};

/// Get a required scalar value, failing with the field name when absent.
pub fn require_value<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| FacilitiesError::missing_field(field))
}

/// Get a required text value, trimmed, failing when absent or empty.
pub fn require_text<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    optional_text(value).ok_or_else(|| FacilitiesError::missing_field(field))
}

/// Get an optional text value, trimmed, treating empty strings as absent.
pub fn optional_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
