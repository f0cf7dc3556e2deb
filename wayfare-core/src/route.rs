//! Routes through points of interest.
//!
//! Aggregates ordered, scored POIs with the total great-circle distance
//! travelled between them.

use crate::ScoredPoi;

/// An ordered visiting sequence with its travel distance.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::{Categories, PointOfInterest, Route, ScoredPoi};
///
/// let poi = PointOfInterest::new("a", Coord { x: 0.0, y: 0.0 }, Categories::from_types(["park"]));
/// let route = Route::new(vec![ScoredPoi::new(poi, 4.0)], 120.0);
///
/// assert_eq!(route.ids(), vec!["a"]);
/// assert_eq!(route.total_distance_metres(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pois: Vec<ScoredPoi>,
    total_distance_metres: f64,
}

impl Route {
    /// Construct a route from ordered stops and the distance covered.
    pub const fn new(pois: Vec<ScoredPoi>, total_distance_metres: f64) -> Self {
        Self {
            pois,
            total_distance_metres,
        }
    }

    /// Construct an empty route.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::Route;
    ///
    /// let route = Route::empty();
    /// assert!(route.is_empty());
    /// assert_eq!(route.total_distance_metres(), 0.0);
    /// ```
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Stops in visiting order.
    pub fn pois(&self) -> &[ScoredPoi] {
        &self.pois
    }

    /// Provider identifiers in visiting order.
    pub fn ids(&self) -> Vec<&str> {
        self.pois.iter().map(ScoredPoi::id).collect()
    }

    /// Great-circle distance from the start through every stop, in metres.
    pub const fn total_distance_metres(&self) -> f64 {
        self.total_distance_metres
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.pois.len()
    }

    /// Report whether the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Sum of the stop scores.
    pub fn total_score(&self) -> f64 {
        self.pois.iter().map(|stop| stop.score).sum()
    }
}
