//! Canonical data model for facility records.
//!
//! This module contains the fully validated, normalized entity produced by
//! the decode pipeline. Field names on the wire follow the stable downstream
//! schema (`key.id`, `alternateName[]`, `location.hash`, `contact.phone[]`,
//! and so on), so serving layers can rely on them not moving.
//!
//! A `Facility` is only ever constructed by a successful decode; partially
//! populated entities are never exposed, and entities never mutate after the
//! index that owns them is built.

use crate::constants::{GEOHASH_PRECISION, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::error::{FacilitiesError, Result};
use crate::geohash;
use serde::{Deserialize, Serialize};

// =============================================================================
// Facility Entity
// =============================================================================

/// A single canonical facility record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    /// Identity of this facility within the dataset.
    pub key: FacilityKey,

    /// Normalized display name.
    pub name: String,

    /// Alternate names carried verbatim from the source record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_name: Vec<String>,

    /// Classification of the care this facility provides.
    #[serde(rename = "type")]
    pub facility_type: FacilityType,

    /// Whether the facility is currently operating.
    pub open: bool,

    /// NAICS industry code for the facility.
    pub naics: String,

    /// Normalized NAICS category description.
    pub category: String,

    /// Ownership/governance classification.
    pub governance: Governance,

    /// Geographic position, geohash, and postal address.
    pub location: Location,

    /// Websites and phone numbers.
    pub contact: Contact,

    /// Medical capabilities (helipad, beds, trauma designations).
    pub capabilities: Capabilities,
}

/// Identity fields for a facility. Two records with the same `id` refer to
/// the same facility; the dataset must not contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityKey {
    /// Externally unique row identifier.
    pub id: String,

    /// Source object identifier.
    pub object_id: String,
}

// =============================================================================
// Classification Enumerations
// =============================================================================

/// Fixed enumeration of facility types. Resolution from source text is
/// mandatory; an unrecognized value fails the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    GeneralAcuteCare,
    CriticalAccess,
    Psychiatric,
    LongTermCare,
    Rehabilitation,
    Military,
    Children,
    Special,
    Women,
    ChronicDisease,
}

/// Ownership classification. Unlike `FacilityType`, unresolved source text
/// falls back to `UnknownType` rather than failing the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Governance {
    Government,
    NonProfit,
    Private,
    #[default]
    UnknownType,
}

/// Trauma care designation levels and certifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraumaType {
    #[serde(rename = "LEVEL_1")]
    Level1,
    #[serde(rename = "LEVEL_2")]
    Level2,
    #[serde(rename = "LEVEL_3")]
    Level3,
    #[serde(rename = "LEVEL_4")]
    Level4,
    #[serde(rename = "LEVEL_5")]
    Level5,
    #[serde(rename = "TRH")]
    Trh,
    #[serde(rename = "TRF")]
    Trf,
    #[serde(rename = "CTH")]
    Cth,
    #[serde(rename = "ATH")]
    Ath,
    #[serde(rename = "TRAUMA_SYSTEM_HOSPITAL")]
    TraumaSystemHospital,
    #[serde(rename = "RTC")]
    Rtc,
    #[serde(rename = "RTH")]
    Rth,
    #[serde(rename = "AREA")]
    Area,
    #[serde(rename = "CTF")]
    Ctf,
    #[serde(rename = "PARC")]
    Parc,
    #[serde(rename = "RPTC")]
    Rptc,
}

// =============================================================================
// Location Structures
// =============================================================================

/// Geographic location: the precise point, its geohash, and the address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// WGS84 coordinates of the facility.
    pub point: Point,

    /// Geohash of `point` at the standard character precision. Always
    /// exactly twelve characters and deterministically derived.
    pub hash: String,

    /// Postal address.
    pub address: Address,
}

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

/// A normalized postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Uppercased country code from the source record.
    pub country: String,

    /// Normalized county name; empty when the source omitted it.
    #[serde(default)]
    pub county: String,

    /// Normalized city name.
    pub city: String,

    /// US state code or non-US province, exactly one of the two.
    #[serde(flatten)]
    pub region: AddressRegion,

    /// Postal/ZIP code, carried verbatim.
    pub postal_code: String,

    /// Ordered address lines, derived by splitting the source address on
    /// newlines.
    pub line: Vec<String>,
}

/// Exactly one of a US state code or a non-US province name. US records
/// (country US/USA) carry an uppercased state code; everything else keeps
/// the source province text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AddressRegion {
    #[serde(rename = "usState")]
    UsState(String),
    #[serde(rename = "province")]
    Province(String),
}

// =============================================================================
// Contact Structures
// =============================================================================

/// Contact details for a facility.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Normalized website URLs. Malformed source values are dropped with a
    /// warning rather than failing the record.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub website: Vec<String>,

    /// Phone numbers; at most one MAIN entry from the source telephone.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone: Vec<Phone>,
}

/// A single phone number entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    /// Number as carried in the source record.
    pub e164: String,

    /// Role of this number.
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneType {
    Main,
}

// =============================================================================
// Capability Structures
// =============================================================================

/// Medical capabilities of a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// Whether the facility has a helipad. Mandatory in the source data.
    pub helipad: bool,

    /// Bed count, included only when present and positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<u32>,

    /// Trauma designations, at most two (one per source trauma field).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trauma: Vec<TraumaDesignation>,

    /// Whether any trauma designation or the dedicated source indicator
    /// implies pediatric service.
    pub pediatric: bool,
}

/// A single trauma designation, optionally pediatric-qualified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraumaDesignation {
    pub trauma_type: TraumaType,
    pub pediatric: bool,
}

impl Facility {
    /// Validate internal consistency of a decoded facility.
    ///
    /// Checks the invariants the decode pipeline promises: non-empty
    /// identity fields, in-range coordinates, and a geohash of standard
    /// length that agrees with the stored point.
    pub fn validate(&self) -> Result<()> {
        if self.key.id.trim().is_empty() {
            return Err(FacilitiesError::missing_field("key.id"));
        }
        if self.key.object_id.trim().is_empty() {
            return Err(FacilitiesError::missing_field("key.objectId"));
        }
        if self.naics.trim().is_empty() {
            return Err(FacilitiesError::missing_field("naics"));
        }

        if !LATITUDE_RANGE.contains(&self.location.point.latitude) {
            return Err(FacilitiesError::invalid_field(
                "latitude",
                format!("{} is outside [-90, 90]", self.location.point.latitude),
            ));
        }
        if !LONGITUDE_RANGE.contains(&self.location.point.longitude) {
            return Err(FacilitiesError::invalid_field(
                "longitude",
                format!("{} is outside [-180, 180]", self.location.point.longitude),
            ));
        }

        if self.location.hash.len() != GEOHASH_PRECISION {
            return Err(FacilitiesError::invalid_field(
                "geohash",
                format!(
                    "hash '{}' is not {} characters",
                    self.location.hash, GEOHASH_PRECISION
                ),
            ));
        }
        let expected = geohash::encode(
            self.location.point.latitude,
            self.location.point.longitude,
            GEOHASH_PRECISION,
        )?;
        if expected != self.location.hash {
            return Err(FacilitiesError::invalid_field(
                "geohash",
                format!(
                    "hash '{}' disagrees with point hash '{}'",
                    self.location.hash, expected
                ),
            ));
        }

        if self.capabilities.trauma.len() > 2 {
            return Err(FacilitiesError::invalid_field(
                "trauma",
                format!(
                    "{} designations exceed the two source fields",
                    self.capabilities.trauma.len()
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_facility() -> Facility {
        let point = Point {
            latitude: 18.2677131,
            longitude: -66.70128518,
        };
        Facility {
            key: FacilityKey {
                id: "700641".to_string(),
                object_id: "41".to_string(),
            },
            name: "Hospital General Castaner".to_string(),
            alternate_name: vec![],
            facility_type: FacilityType::GeneralAcuteCare,
            open: true,
            naics: "622110".to_string(),
            category: "General Medical & Surgical Hospitals".to_string(),
            governance: Governance::NonProfit,
            location: Location {
                point,
                hash: "de0xfjt95ksc".to_string(),
                address: Address {
                    country: "USA".to_string(),
                    county: "Lares".to_string(),
                    city: "Castaner".to_string(),
                    region: AddressRegion::UsState("PR".to_string()),
                    postal_code: "00631".to_string(),
                    line: vec!["Km 64.2 Route 135".to_string()],
                },
            },
            contact: Contact {
                website: vec!["http://www.hospitalcastaner.com/".to_string()],
                phone: vec![Phone {
                    e164: "(787) 829-5010".to_string(),
                    phone_type: PhoneType::Main,
                }],
            },
            capabilities: Capabilities {
                helipad: false,
                beds: Some(24),
                trauma: vec![],
                pediatric: false,
            },
        }
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn test_valid_facility_passes() {
            assert!(sample_facility().validate().is_ok());
        }

        #[test]
        fn test_empty_identity_fields_fail() {
            let mut facility = sample_facility();
            facility.key.id = "  ".to_string();
            assert!(facility.validate().is_err());

            let mut facility = sample_facility();
            facility.key.object_id = String::new();
            assert!(facility.validate().is_err());
        }

        #[test]
        fn test_out_of_range_coordinates_fail() {
            let mut facility = sample_facility();
            facility.location.point.latitude = 95.0;
            assert!(facility.validate().is_err());
        }

        #[test]
        fn test_short_hash_fails() {
            let mut facility = sample_facility();
            facility.location.hash = "de0xfjt".to_string();
            assert!(facility.validate().is_err());
        }

        #[test]
        fn test_hash_disagreeing_with_point_fails() {
            let mut facility = sample_facility();
            facility.location.hash = "de28z5uvjd48".to_string();
            let err = facility.validate().unwrap_err();
            assert!(err.to_string().contains("disagrees"));
        }
    }

    mod schema_tests {
        use super::*;

        #[test]
        fn test_serialized_field_names_are_stable() {
            let json = serde_json::to_value(sample_facility()).unwrap();
            assert_eq!(json["key"]["id"], "700641");
            assert_eq!(json["key"]["objectId"], "41");
            assert_eq!(json["type"], "GENERAL_ACUTE_CARE");
            assert_eq!(json["governance"], "NON_PROFIT");
            assert_eq!(json["naics"], "622110");
            assert_eq!(json["location"]["hash"], "de0xfjt95ksc");
            assert_eq!(json["location"]["address"]["usState"], "PR");
            assert_eq!(json["location"]["address"]["postalCode"], "00631");
            assert_eq!(json["location"]["address"]["line"][0], "Km 64.2 Route 135");
            assert_eq!(json["contact"]["phone"][0]["type"], "MAIN");
            assert_eq!(json["capabilities"]["helipad"], false);
            assert_eq!(json["capabilities"]["beds"], 24);
        }

        #[test]
        fn test_province_serializes_in_place_of_us_state() {
            let mut facility = sample_facility();
            facility.location.address.region = AddressRegion::Province("Ontario".to_string());
            let json = serde_json::to_value(&facility).unwrap();
            assert_eq!(json["location"]["address"]["province"], "Ontario");
            assert!(json["location"]["address"].get("usState").is_none());
        }

        #[test]
        fn test_trauma_levels_serialize_with_underscores() {
            let designation = TraumaDesignation {
                trauma_type: TraumaType::Level1,
                pediatric: true,
            };
            let json = serde_json::to_value(designation).unwrap();
            assert_eq!(json["traumaType"], "LEVEL_1");
            assert_eq!(json["pediatric"], true);
        }

        #[test]
        fn test_facility_round_trips_through_json() {
            let facility = sample_facility();
            let json = serde_json::to_string(&facility).unwrap();
            let back: Facility = serde_json::from_str(&json).unwrap();
            assert_eq!(facility, back);
        }
    }
}
