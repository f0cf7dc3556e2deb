//! Turn raw collector records into validated points of interest.

use std::collections::HashSet;

use geo::Coord;
use log::{debug, info, warn};
use serde::Serialize;
use wayfare_core::{BusinessStatus, Categories, PointOfInterest, is_valid_location};

use crate::raw::{
    BUSINESS_STATUS, CITY, COUNTRY, EDITORIAL_SUMMARY, GOOD_FOR_CHILDREN, GOOD_FOR_GROUPS, LAT,
    LOCATION_NAME, LONG, MAPS_ID, PRIMARY_TYPE, RATING, REVIEWS, TYPES,
};
use crate::{MalformedRecord, RawRecord};

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Counts describing a batch normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NormalizeReport {
    /// Records that became points of interest.
    pub accepted: usize,
    /// Records rejected as [`MalformedRecord`].
    pub malformed: usize,
    /// Records dropped because an earlier record had the same identifier.
    pub duplicates: usize,
}

/// Output of [`normalize_records`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    /// Valid points of interest, in input order, with unique identifiers.
    pub pois: Vec<PointOfInterest>,
    /// Drop counts.
    pub report: NormalizeReport,
}

/// Validate and coerce one raw record.
///
/// Only the identifier and coordinates are required. Optional fields that
/// fail to parse are treated as absent; ratings are clamped into
/// `1.0..=5.0`.
///
/// # Errors
/// Returns [`MalformedRecord`] when the record is not a JSON object, when
/// `maps_id`, `lat` or `long` is missing or unparsable, or when the
/// coordinate is outside WGS84 bounds.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wayfare_data::{RawRecord, normalize_record};
///
/// let record = RawRecord::from_value(json!({
///     "maps_id": "ChIJ1",
///     "location_name": "Duomo",
///     "lat": "45.4641",
///     "long": 9.1919,
///     "rating": 4.8,
///     "reviews": "12000",
///     "primary_type": "church",
///     "types": "church/tourist_attraction",
/// }))
/// .expect("object");
///
/// let poi = normalize_record(&record)?;
/// assert_eq!(poi.primary_type(), "church");
/// assert_eq!(poi.review_count, Some(12_000));
/// # Ok::<(), wayfare_data::MalformedRecord>(())
/// ```
pub fn normalize_record(record: &RawRecord) -> Result<PointOfInterest, MalformedRecord> {
    record.ensure_object()?;
    let id = record
        .text(MAPS_ID)
        .ok_or(MalformedRecord::MissingField { field: MAPS_ID })?;
    let lat = record.required_float(LAT)?;
    let long = record.required_float(LONG)?;
    let location = Coord { x: long, y: lat };
    if !is_valid_location(location) {
        return Err(MalformedRecord::LocationOutOfRange { lat, long });
    }

    let categories = Categories::new(
        record.text(PRIMARY_TYPE).unwrap_or_default(),
        record.tags(TYPES),
    );

    Ok(PointOfInterest {
        name: record.text(LOCATION_NAME).unwrap_or_default(),
        rating: optional(&id, RATING, record.float(RATING))
            .map(|rating| rating.clamp(MIN_RATING, MAX_RATING)),
        review_count: optional(&id, REVIEWS, record.count(REVIEWS)),
        location,
        categories,
        business_status: record
            .text(BUSINESS_STATUS)
            .map(|status| BusinessStatus::parse_lenient(&status))
            .unwrap_or_default(),
        good_for_groups: record.flag(GOOD_FOR_GROUPS),
        good_for_children: record.flag(GOOD_FOR_CHILDREN),
        editorial_summary: record.text(EDITORIAL_SUMMARY),
        city: record.text(CITY).unwrap_or_default(),
        country: record.text(COUNTRY).unwrap_or_default(),
        id,
    })
}

fn optional<T>(id: &str, field: &str, parsed: Result<Option<T>, MalformedRecord>) -> Option<T> {
    parsed.unwrap_or_else(|err| {
        debug!("Treating {field} of {id} as absent: {err}");
        None
    })
}

/// Normalize a batch, dropping malformed records and repeated identifiers.
///
/// The first record seen for an identifier wins. Every drop is logged at
/// `warn` level and counted in the returned [`NormalizeReport`].
#[must_use]
pub fn normalize_records<'a, I>(records: I) -> Normalized
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut seen = HashSet::new();
    let mut normalized = Normalized::default();
    for (index, record) in records.into_iter().enumerate() {
        match normalize_record(record) {
            Ok(poi) if seen.insert(poi.id.clone()) => normalized.pois.push(poi),
            Ok(poi) => {
                warn!("Dropping record {index}: duplicate maps_id {}", poi.id);
                normalized.report.duplicates += 1;
            }
            Err(err) => {
                warn!("Dropping record {index}: {err}");
                normalized.report.malformed += 1;
            }
        }
    }
    normalized.report.accepted = normalized.pois.len();
    info!(
        "Normalized {} records ({} malformed, {} duplicates)",
        normalized.report.accepted, normalized.report.malformed, normalized.report.duplicates
    );
    normalized
}
