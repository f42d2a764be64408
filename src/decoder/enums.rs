//! Table-driven resolution of free-text categorical values.
//!
//! Source records carry facility type, governance, and trauma designations
//! as free text with mixed casing and padding. Each resolver trims and
//! uppercases before a lookup against a fixed table. The failure policy
//! differs per field: type and trauma misses are fatal for the record,
//! governance misses fall back to `UnknownType` with a warning.

use crate::constants::{
    facility_type_labels, governance_labels, TRAUMA_NO_DESIGNATION_LABELS,
    TRAUMA_PEDIATRIC_SUFFIX,
};
use crate::error::{FacilitiesError, Result};
use crate::models::{FacilityType, Governance, TraumaDesignation, TraumaType};
use tracing::warn;

/// Recognized facility type labels.
const FACILITY_TYPE_TABLE: &[(&str, FacilityType)] = &[
    (
        facility_type_labels::GENERAL_ACUTE_CARE,
        FacilityType::GeneralAcuteCare,
    ),
    (
        facility_type_labels::CRITICAL_ACCESS,
        FacilityType::CriticalAccess,
    ),
    (facility_type_labels::PSYCHIATRIC, FacilityType::Psychiatric),
    (
        facility_type_labels::LONG_TERM_CARE,
        FacilityType::LongTermCare,
    ),
    (
        facility_type_labels::REHABILITATION,
        FacilityType::Rehabilitation,
    ),
    (facility_type_labels::MILITARY, FacilityType::Military),
    (facility_type_labels::CHILDREN, FacilityType::Children),
    (facility_type_labels::SPECIAL, FacilityType::Special),
    (facility_type_labels::WOMEN, FacilityType::Women),
    (
        facility_type_labels::CHRONIC_DISEASE,
        FacilityType::ChronicDisease,
    ),
];

/// Recognized governance labels.
const GOVERNANCE_TABLE: &[(&str, Governance)] = &[
    (governance_labels::GOVERNMENT, Governance::Government),
    (governance_labels::NON_PROFIT, Governance::NonProfit),
    (governance_labels::PROPRIETARY, Governance::Private),
];

/// Recognized trauma designation labels, after pediatric-suffix stripping.
const TRAUMA_TABLE: &[(&str, TraumaType)] = &[
    ("LEVEL I", TraumaType::Level1),
    ("LEVEL II", TraumaType::Level2),
    ("LEVEL III", TraumaType::Level3),
    ("LEVEL IV", TraumaType::Level4),
    ("LEVEL V", TraumaType::Level5),
    ("TRH", TraumaType::Trh),
    ("TRF", TraumaType::Trf),
    ("CTH", TraumaType::Cth),
    ("ATH", TraumaType::Ath),
    ("TRAUMA SYSTEM HOSPITAL", TraumaType::TraumaSystemHospital),
    ("RTC", TraumaType::Rtc),
    ("RTH", TraumaType::Rth),
    ("AREA", TraumaType::Area),
    ("CTF", TraumaType::Ctf),
    ("PARC", TraumaType::Parc),
    ("RPTC", TraumaType::Rptc),
];

fn lookup<T: Copy>(table: &[(&str, T)], normalized: &str) -> Option<T> {
    table
        .iter()
        .find(|(label, _)| *label == normalized)
        .map(|(_, tag)| *tag)
}

/// Resolve the type of facility from its source text. Unrecognized values
/// are fatal for the record.
pub fn resolve_facility_type(value: &str) -> Result<FacilityType> {
    let normalized = value.trim().to_uppercase();
    lookup(FACILITY_TYPE_TABLE, &normalized)
        .ok_or_else(|| FacilitiesError::unresolved_enum("type", value))
}

/// Resolve the governance type from its source text, defaulting to
/// `UnknownType` when the value is unrecognized.
pub fn resolve_governance(value: &str) -> Governance {
    let normalized = value.trim().to_uppercase();
    lookup(GOVERNANCE_TABLE, &normalized).unwrap_or_else(|| {
        warn!(
            "unrecognized governance type '{}', defaulting to UNKNOWN_TYPE",
            value
        );
        Governance::UnknownType
    })
}

/// Resolve a trauma designation from its source text.
///
/// A " PEDIATRIC" suffix is stripped before table lookup; whether the
/// original text mentioned PEDIATRIC at all sets the designation's
/// pediatric flag. "NOT DESIGNATED" and "UNCLASSIFIED" mean no trauma
/// capability and resolve to `Ok(None)`. Any other unrecognized value is
/// fatal for the record.
pub fn resolve_trauma(value: &str, field: &'static str) -> Result<Option<TraumaDesignation>> {
    let normalized = value.trim().to_uppercase();
    let pediatric = normalized.contains("PEDIATRIC");
    let stripped = normalized.replace(TRAUMA_PEDIATRIC_SUFFIX, "");

    if TRAUMA_NO_DESIGNATION_LABELS.contains(&stripped.as_str()) {
        return Ok(None);
    }

    lookup(TRAUMA_TABLE, &stripped)
        .map(|trauma_type| {
            Some(TraumaDesignation {
                trauma_type,
                pediatric,
            })
        })
        .ok_or_else(|| FacilitiesError::unresolved_enum(field, value))
}
