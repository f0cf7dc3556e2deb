//! Flat, column-style representation of a point of interest.
//!
//! The curated table keeps the collector's column names (`maps_id`,
//! `location_name`, `reviews`, `lat`, `long`, ...), so serialized POIs can be
//! read back by the same tooling that produced the raw records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BusinessStatus, Categories, PointOfInterest, is_valid_location};

/// Column-style POI record used for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    /// Provider identifier.
    pub maps_id: String,
    /// Display name.
    #[serde(default)]
    pub location_name: String,
    /// Average rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Review count.
    #[serde(default)]
    pub reviews: Option<u32>,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub long: f64,
    /// Canonical category.
    #[serde(default)]
    pub primary_type: String,
    /// All type tags.
    #[serde(default)]
    pub types: Vec<String>,
    /// Provider business status.
    #[serde(default)]
    pub business_status: String,
    /// City context tag.
    #[serde(default)]
    pub city: String,
    /// Country context tag.
    #[serde(default)]
    pub country: String,
    /// Group suitability.
    #[serde(default)]
    pub good_for_groups: Option<bool>,
    /// Child suitability.
    #[serde(default)]
    pub good_for_children: Option<bool>,
    /// Editorial summary.
    #[serde(default)]
    pub editorial_summary: Option<String>,
}

/// Errors raised when converting a [`PoiRecord`] into a [`PointOfInterest`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoiRecordError {
    /// The identifier was blank.
    #[error("maps_id must not be empty")]
    MissingId,
    /// The coordinate was not a valid WGS84 position.
    #[error("coordinate ({lat}, {long}) is outside WGS84 bounds")]
    InvalidLocation {
        /// Latitude read from the record.
        lat: f64,
        /// Longitude read from the record.
        long: f64,
    },
}

impl From<PointOfInterest> for PoiRecord {
    fn from(poi: PointOfInterest) -> Self {
        let PointOfInterest {
            id,
            name,
            rating,
            review_count,
            location,
            categories,
            business_status,
            good_for_groups,
            good_for_children,
            editorial_summary,
            city,
            country,
        } = poi;
        Self {
            maps_id: id,
            location_name: name,
            rating,
            reviews: review_count,
            lat: location.y,
            long: location.x,
            primary_type: categories.primary().to_owned(),
            types: categories.types().iter().cloned().collect(),
            business_status: business_status.as_str().to_owned(),
            city,
            country,
            good_for_groups,
            good_for_children,
            editorial_summary,
        }
    }
}

impl TryFrom<PoiRecord> for PointOfInterest {
    type Error = PoiRecordError;

    fn try_from(record: PoiRecord) -> Result<Self, Self::Error> {
        if record.maps_id.trim().is_empty() {
            return Err(PoiRecordError::MissingId);
        }
        let location = geo::Coord {
            x: record.long,
            y: record.lat,
        };
        if !is_valid_location(location) {
            return Err(PoiRecordError::InvalidLocation {
                lat: record.lat,
                long: record.long,
            });
        }
        Ok(Self {
            id: record.maps_id,
            name: record.location_name,
            rating: record.rating,
            review_count: record.reviews,
            location,
            categories: Categories::new(record.primary_type, record.types),
            business_status: BusinessStatus::parse_lenient(&record.business_status),
            good_for_groups: record.good_for_groups,
            good_for_children: record.good_for_children,
            editorial_summary: record.editorial_summary,
            city: record.city,
            country: record.country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    #[rstest]
    fn serialises_with_collector_column_names() {
        let poi = PointOfInterest::new(
            "abc",
            Coord { x: 9.19, y: 45.46 },
            Categories::new("museum", ["tourist_attraction"]),
        )
        .with_review_count(120);
        let json = serde_json::to_value(&poi).expect("serialise poi");
        assert_eq!(json["maps_id"], "abc");
        assert_eq!(json["reviews"], 120);
        assert_eq!(json["lat"], 45.46);
        assert_eq!(json["long"], 9.19);
        assert_eq!(json["primary_type"], "museum");
    }

    #[rstest]
    fn rejects_out_of_range_coordinates() {
        let json = r#"{"maps_id":"x","lat":95.0,"long":0.0}"#;
        let err = serde_json::from_str::<PointOfInterest>(json).expect_err("latitude too large");
        assert!(err.to_string().contains("outside WGS84 bounds"));
    }

    #[rstest]
    fn reads_back_what_it_writes() {
        let poi = PointOfInterest::new(
            "abc",
            Coord { x: 2.29, y: 48.85 },
            Categories::new("park", ["tourist_attraction"]),
        )
        .with_name("Champ de Mars")
        .with_rating(4.6)
        .with_editorial_summary("Lawns by the tower.")
        .with_place("Paris", "France");
        let json = serde_json::to_string(&poi).expect("serialise poi");
        let back: PointOfInterest = serde_json::from_str(&json).expect("deserialise poi");
        assert_eq!(back, poi);
    }
}
