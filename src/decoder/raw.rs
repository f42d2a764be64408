//! Raw facility record mapping.
//!
//! `RawRecord` mirrors the flattened source JSON one-to-one: every field is
//! optional and untrusted. It carries no invariants of its own; all
//! validation happens when the record is exported to a canonical
//! [`Facility`](crate::models::Facility). Unknown fields in the source are
//! ignored.

use crate::error::{FacilitiesError, Result};
use serde::Deserialize;
use tracing::error;

/// One loosely-typed facility record, straight from a source JSON line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRecord {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub name: Option<String>,
    pub object_id: Option<String>,
    pub row_id: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
    pub telephone: Option<String>,
    #[serde(rename = "type")]
    pub facility_type: Option<String>,
    pub status: Option<String>,
    pub open: Option<bool>,
    pub county: Option<String>,
    pub country: Option<String>,
    pub naics_code: Option<String>,
    pub naics_desc: Option<String>,
    pub website: Option<String>,
    pub alt_name: Option<String>,
    pub owner_type: Option<String>,
    pub beds: Option<i64>,
    pub trauma1: Option<String>,
    pub trauma2: Option<String>,
    pub helipad: Option<bool>,
    pub source: Option<String>,
    pub owner: Option<String>,
    pub pediatric: Option<bool>,
}

impl RawRecord {
    /// Decode a raw facility from one line of source JSON.
    ///
    /// # Errors
    /// Returns `FacilitiesError::Syntax` citing the offending line content
    /// when the line is not valid JSON.
    pub fn decode(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|source| {
            error!("failed to decode facility data:\n{}", line);
            FacilitiesError::syntax(line, source)
        })
    }
}
