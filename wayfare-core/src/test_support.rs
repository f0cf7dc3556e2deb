//! Test-only builders shared by unit and behaviour tests across the
//! workspace.

use std::collections::HashMap;

use geo::Coord;

use crate::{BusinessStatus, Categories, PointOfInterest, Scorer, ScoredPoi};

/// Construct an operational, well-reviewed POI at (`lat`, `lon`) with a
/// `tourist_attraction` tag and the given primary type.
///
/// # Examples
/// ```rust
/// use wayfare_core::test_support::poi;
///
/// let poi = poi("a", 41.9, 12.5, "museum");
/// assert_eq!(poi.primary_type(), "museum");
/// assert!(poi.categories.contains("tourist_attraction"));
/// ```
pub fn poi(id: &str, lat: f64, lon: f64, primary_type: &str) -> PointOfInterest {
    PointOfInterest::new(
        id,
        Coord { x: lon, y: lat },
        Categories::new(primary_type, ["tourist_attraction"]),
    )
    .with_name(id)
    .with_rating(4.5)
    .with_review_count(500)
    .with_status(BusinessStatus::Operational)
}

/// Construct a scored POI at (`lat`, `lon`).
pub fn scored(id: &str, lat: f64, lon: f64, score: f64) -> ScoredPoi {
    ScoredPoi::new(poi(id, lat, lon, "tourist_attraction"), score)
}

/// Construct a scored POI in category `primary_type`, at the origin.
pub fn scored_in(id: &str, primary_type: &str, score: f64) -> ScoredPoi {
    ScoredPoi::new(poi(id, 0.0, 0.0, primary_type), score)
}

/// `Scorer` returning pre-assigned scores by POI identifier.
///
/// Unknown identifiers score `0.0`.
#[derive(Debug, Clone, Default)]
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    /// Build a scorer from `(id, score)` pairs.
    pub fn new<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            scores: scores.into_iter().map(|(id, s)| (id.into(), s)).collect(),
        }
    }
}

impl Scorer for FixedScorer {
    fn score(&self, poi: &PointOfInterest) -> f64 {
        Self::sanitise(self.scores.get(&poi.id).copied().unwrap_or(0.0))
    }
}
