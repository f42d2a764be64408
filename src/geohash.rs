//! Geohash encoding and decoding at fixed character precision.
//!
//! Implements the standard geohash algorithm: latitude and longitude ranges
//! are repeatedly bisected, the resulting bits are interleaved starting with
//! longitude, and every five bits are emitted as one character of the
//! standard base32 alphabet. Identical inputs always produce identical
//! tokens, which keeps stored hashes consistent with externally computed
//! reference hashes for the same coordinates.

use crate::constants::{GEOHASH_BASE32, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::error::{FacilitiesError, Result};

/// Number of bits contributed by each base32 character.
const BITS_PER_CHAR: usize = 5;

/// A point decoded from a geohash token: the center of the cell the token
/// describes, plus the per-axis half-width of that cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_error: f64,
    pub longitude_error: f64,
}

/// Encode a latitude/longitude pair as a geohash of exactly `precision`
/// characters.
///
/// # Errors
/// Returns `FacilitiesError::InvalidField` when either coordinate falls
/// outside the valid WGS84 range.
pub fn encode(latitude: f64, longitude: f64, precision: usize) -> Result<String> {
    if !LATITUDE_RANGE.contains(&latitude) {
        return Err(FacilitiesError::invalid_field(
            "latitude",
            format!("{} is outside [-90, 90]", latitude),
        ));
    }
    if !LONGITUDE_RANGE.contains(&longitude) {
        return Err(FacilitiesError::invalid_field(
            "longitude",
            format!("{} is outside [-180, 180]", longitude),
        ));
    }

    let mut lat_range = (*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end());
    let mut lng_range = (*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end());

    let mut hash = String::with_capacity(precision);
    let mut even_bit = true; // longitude first
    let mut bit_count = 0;
    let mut char_index: usize = 0;

    while hash.len() < precision {
        if even_bit {
            let mid = (lng_range.0 + lng_range.1) / 2.0;
            if longitude >= mid {
                char_index = (char_index << 1) | 1;
                lng_range.0 = mid;
            } else {
                char_index <<= 1;
                lng_range.1 = mid;
            }
        } else {
            let mid = (lat_range.0 + lat_range.1) / 2.0;
            if latitude >= mid {
                char_index = (char_index << 1) | 1;
                lat_range.0 = mid;
            } else {
                char_index <<= 1;
                lat_range.1 = mid;
            }
        }
        even_bit = !even_bit;

        bit_count += 1;
        if bit_count == BITS_PER_CHAR {
            hash.push(GEOHASH_BASE32[char_index] as char);
            bit_count = 0;
            char_index = 0;
        }
    }

    Ok(hash)
}

/// Decode a geohash token back to the center point of its cell.
///
/// Used for point-based proximity queries; the error margins describe how
/// coarse the token is.
///
/// # Errors
/// Returns `FacilitiesError::InvalidField` for an empty token or one
/// containing characters outside the geohash alphabet.
pub fn decode(token: &str) -> Result<DecodedPoint> {
    if token.is_empty() {
        return Err(FacilitiesError::invalid_field(
            "geohash",
            "token is empty".to_string(),
        ));
    }

    let mut lat_range = (*LATITUDE_RANGE.start(), *LATITUDE_RANGE.end());
    let mut lng_range = (*LONGITUDE_RANGE.start(), *LONGITUDE_RANGE.end());
    let mut even_bit = true;

    for ch in token.bytes() {
        let char_index = GEOHASH_BASE32
            .iter()
            .position(|&b| b == ch.to_ascii_lowercase())
            .ok_or_else(|| {
                FacilitiesError::invalid_field(
                    "geohash",
                    format!("'{}' is not a geohash character", ch as char),
                )
            })?;

        for bit in (0..BITS_PER_CHAR).rev() {
            let is_set = (char_index >> bit) & 1 == 1;
            if even_bit {
                let mid = (lng_range.0 + lng_range.1) / 2.0;
                if is_set {
                    lng_range.0 = mid;
                } else {
                    lng_range.1 = mid;
                }
            } else {
                let mid = (lat_range.0 + lat_range.1) / 2.0;
                if is_set {
                    lat_range.0 = mid;
                } else {
                    lat_range.1 = mid;
                }
            }
            even_bit = !even_bit;
        }
    }

    Ok(DecodedPoint {
        latitude: (lat_range.0 + lat_range.1) / 2.0,
        longitude: (lng_range.0 + lng_range.1) / 2.0,
        latitude_error: (lat_range.1 - lat_range.0) / 2.0,
        longitude_error: (lng_range.1 - lng_range.0) / 2.0,
    })
}
