//! Facility record decoding.
//!
//! Transforms one raw JSON line into one canonical [`Facility`], reconciling
//! the source dataset's inconsistent encodings (free-text enums, optional
//! fields, malformed URLs, mixed casing) into the strict schema. The whole
//! record fails on any missing mandatory field or unresolvable type/trauma
//! value; malformed websites and unrecognized governance text are logged and
//! softened instead.

pub mod enums;
pub mod fields;
pub mod raw;
pub mod text;
pub mod url;

use crate::constants::{GEOHASH_PRECISION, STATUS_OPEN, US_COUNTRY_CODES};
use crate::error::Result;
use crate::geohash;
use crate::models::{
    Address, AddressRegion, Capabilities, Contact, Facility, FacilityKey, Location, Phone,
    PhoneType, Point, TraumaDesignation,
};
use fields::{optional_text, require_text, require_value};
use text::prettify;

pub use raw::RawRecord;

/// Decode one line of source JSON into a canonical facility.
///
/// # Errors
/// * `Syntax` when the line is not valid JSON.
/// * `MissingField` naming the first absent/empty mandatory field.
/// * `UnresolvedEnum` when the type or a trauma value has no table match.
/// * `InvalidField` when a coordinate is out of range.
pub fn decode_line(line: &str) -> Result<Facility> {
    export(RawRecord::decode(line)?)
}

/// Export a raw record as a validated canonical facility.
pub fn export(raw: RawRecord) -> Result<Facility> {
    // identity first
    let key = FacilityKey {
        id: require_text(&raw.row_id, "rowId")?.to_string(),
        object_id: require_text(&raw.object_id, "objectId")?.to_string(),
    };

    // name + alternate names
    let name = prettify(require_text(&raw.name, "name")?);
    // alternate names are carried verbatim, not normalized
    let alternate_name = match &raw.alt_name {
        Some(alt) if !alt.is_empty() => vec![alt.clone()],
        _ => Vec::new(),
    };

    // classification
    let facility_type = enums::resolve_facility_type(require_text(&raw.facility_type, "type")?)?;
    let open = raw.open == Some(true)
        || optional_text(&raw.status).is_some_and(|status| status.eq_ignore_ascii_case(STATUS_OPEN));
    let naics = require_text(&raw.naics_code, "naicsCode")?.to_string();
    let category = prettify(require_text(&raw.naics_desc, "naicsDesc")?);
    let governance = optional_text(&raw.owner_type)
        .map(enums::resolve_governance)
        .unwrap_or_default();

    // location: point, geohash, address
    let point = Point {
        latitude: require_value(raw.latitude, "latitude")?,
        longitude: require_value(raw.longitude, "longitude")?,
    };
    let hash = geohash::encode(point.latitude, point.longitude, GEOHASH_PRECISION)?;

    let country = require_text(&raw.country, "country")?.to_uppercase();
    let state = require_text(&raw.state, "state")?;
    let region = if US_COUNTRY_CODES.contains(&country.as_str()) {
        AddressRegion::UsState(state.to_uppercase())
    } else {
        AddressRegion::Province(state.to_string())
    };
    let address = Address {
        county: optional_text(&raw.county).map(prettify).unwrap_or_default(),
        city: prettify(require_text(&raw.city, "city")?),
        region,
        postal_code: require_text(&raw.zip, "zip")?.to_string(),
        line: prettify(require_text(&raw.address, "address")?)
            .split('\n')
            .map(str::to_string)
            .collect(),
        country,
    };

    // contact
    let website = optional_text(&raw.website)
        .and_then(url::normalize)
        .map(|url| url.to_string())
        .into_iter()
        .collect();
    let phone = optional_text(&raw.telephone)
        .map(|telephone| Phone {
            e164: telephone.to_string(),
            phone_type: PhoneType::Main,
        })
        .into_iter()
        .collect();

    let facility = Facility {
        key,
        name,
        alternate_name,
        facility_type,
        open,
        naics,
        category,
        governance,
        location: Location {
            point,
            hash,
            address,
        },
        contact: Contact { website, phone },
        capabilities: specify_capabilities(&raw)?,
    };

    facility.validate()?;
    Ok(facility)
}

/// Build the capabilities block from the raw record.
fn specify_capabilities(raw: &RawRecord) -> Result<Capabilities> {
    let helipad = require_value(raw.helipad, "helipad")?;
    let beds = raw.beds.filter(|&beds| beds > 0).map(|beds| beds as u32);

    let mut trauma: Vec<TraumaDesignation> = Vec::with_capacity(2);
    let mut pediatric = raw.pediatric == Some(true);

    for (value, field) in [(&raw.trauma1, "trauma1"), (&raw.trauma2, "trauma2")] {
        if let Some(source_text) = optional_text(value) {
            if let Some(designation) = enums::resolve_trauma(source_text, field)? {
                trauma.push(designation);
            }
            if source_text.to_lowercase().contains("pediatric") {
                pediatric = true;
            }
        }
    }

    Ok(Capabilities {
        helipad,
        beds,
        trauma,
        pediatric,
    })
}
