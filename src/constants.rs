//! Application constants for the facilities index
//!
//! This module contains the geohash parameters, categorical label tables,
//! and default values used throughout the decode pipeline and index.

// =============================================================================
// Geohash Parameters
// =============================================================================

/// Character precision of computed geohash values.
///
/// Twelve base32 characters resolve to a cell of roughly 3.7cm x 1.9cm,
/// which is far finer than any facility footprint. Stored hashes always
/// carry exactly this many characters.
pub const GEOHASH_PRECISION: usize = 12;

/// Minimum geohash prefix length maintained in the bucket index.
///
/// Proximity searches never widen below this length, which bounds the
/// worst-case result set for sparse regions.
pub const MIN_GEOHASH_PREFIX: usize = 2;

/// Standard geohash base32 alphabet (omits a, i, l, o).
pub const GEOHASH_BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

// =============================================================================
// Categorical Label Tables
// =============================================================================

/// Source labels recognized as facility types, paired with notes on the
/// matching rules applied before lookup (trimmed, uppercased).
pub mod facility_type_labels {
    pub const GENERAL_ACUTE_CARE: &str = "GENERAL ACUTE CARE";
    pub const CRITICAL_ACCESS: &str = "CRITICAL ACCESS";
    pub const PSYCHIATRIC: &str = "PSYCHIATRIC";
    pub const LONG_TERM_CARE: &str = "LONG TERM CARE";
    pub const REHABILITATION: &str = "REHABILITATION";
    pub const MILITARY: &str = "MILITARY";
    pub const CHILDREN: &str = "CHILDREN";
    pub const SPECIAL: &str = "SPECIAL";
    pub const WOMEN: &str = "WOMEN";
    pub const CHRONIC_DISEASE: &str = "CHRONIC DISEASE";
}

/// Source labels recognized as governance types.
pub mod governance_labels {
    pub const GOVERNMENT: &str = "GOVERNMENT";
    pub const NON_PROFIT: &str = "NON-PROFIT";

    /// Source datasets use "PROPRIETARY" for privately held facilities.
    pub const PROPRIETARY: &str = "PROPRIETARY";
}

/// Trauma designation labels that mean "no trauma capability" rather than
/// an unrecognized value.
pub const TRAUMA_NO_DESIGNATION_LABELS: &[&str] = &["NOT DESIGNATED", "UNCLASSIFIED"];

/// Suffix token stripped from trauma labels before table lookup. Whether the
/// original text carried it feeds the pediatric capability flag.
pub const TRAUMA_PEDIATRIC_SUFFIX: &str = " PEDIATRIC";

// =============================================================================
// Record Field Values
// =============================================================================

/// Status text that marks a facility as open, compared case-insensitively.
pub const STATUS_OPEN: &str = "open";

/// Country codes treated as the United States for address purposes.
pub const US_COUNTRY_CODES: &[&str] = &["US", "USA"];

/// Scheme prefixed to website values that fail a direct URL parse.
pub const URL_FALLBACK_SCHEME: &str = "http://";

// =============================================================================
// Coordinate Bounds
// =============================================================================

/// Valid latitude range in WGS84 decimal degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in WGS84 decimal degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geohash_alphabet_is_base32() {
        assert_eq!(GEOHASH_BASE32.len(), 32);
        for skipped in [b'a', b'i', b'l', b'o'] {
            assert!(!GEOHASH_BASE32.contains(&skipped));
        }
    }

    #[test]
    fn test_prefix_bounds_are_consistent() {
        assert!(MIN_GEOHASH_PREFIX >= 1);
        assert!(MIN_GEOHASH_PREFIX < GEOHASH_PRECISION);
    }
}
