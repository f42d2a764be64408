//! Load configuration and validation.
//!
//! Provides the options structure controlling dataset loading: progress
//! reporting and the minimum prefix length kept in the geohash bucket
//! index. Geohash precision itself is fixed at the standard twelve
//! characters and is not configurable; stored hashes must stay consistent
//! with externally computed reference hashes.

use crate::constants::{GEOHASH_PRECISION, MIN_GEOHASH_PREFIX};
use crate::error::{FacilitiesError, Result};
use serde::{Deserialize, Serialize};

/// Options for loading a facility dataset into an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Display an indicatif progress spinner while decoding records.
    pub show_progress: bool,

    /// Shortest geohash prefix maintained in the bucket index. Proximity
    /// searches never widen below this length, which bounds the result set
    /// for sparse regions.
    pub min_prefix_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            show_progress: false,
            min_prefix_length: MIN_GEOHASH_PREFIX,
        }
    }
}

impl LoadOptions {
    /// Validate option consistency before a load begins.
    pub fn validate(&self) -> Result<()> {
        if self.min_prefix_length == 0 {
            return Err(FacilitiesError::invalid_field(
                "min_prefix_length",
                "must be at least 1".to_string(),
            ));
        }
        if self.min_prefix_length >= GEOHASH_PRECISION {
            return Err(FacilitiesError::invalid_field(
                "min_prefix_length",
                format!(
                    "{} must be shorter than the geohash precision {}",
                    self.min_prefix_length, GEOHASH_PRECISION
                ),
            ));
        }
        Ok(())
    }
}
