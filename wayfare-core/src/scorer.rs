//! Score points of interest by overall quality.
//!
//! The `Scorer` trait assigns a quality score to a
//! [`PointOfInterest`](crate::PointOfInterest). Scored POIs travel through the
//! rest of the engine as [`ScoredPoi`] values, so a score is attached exactly
//! once and can never be missing downstream.

use std::cmp::Ordering;

use crate::PointOfInterest;

/// Upper bound of every score produced by a [`Scorer`].
pub const MAX_SCORE: f64 = 5.0;

/// Calculate a quality score for a point of interest.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so scoring can be
/// sharded across workers. The method is infallible; implementers must return
/// `0.0` when no information is available.
///
/// Implementations must:
/// - Produce finite scores in `0.0..=MAX_SCORE`.
/// - Be monotone: better inputs never lower the score.
///
/// Use [`Scorer::sanitise`] to apply the range guard.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use wayfare_core::{Categories, PointOfInterest, Scorer};
///
/// struct RatingScorer;
///
/// impl Scorer for RatingScorer {
///     fn score(&self, poi: &PointOfInterest) -> f64 {
///         Self::sanitise(poi.rating.unwrap_or(0.0))
///     }
/// }
///
/// let poi = PointOfInterest::new("a", Coord { x: 0.0, y: 0.0 }, Categories::from_types(["park"]))
///     .with_rating(4.5);
/// assert_eq!(RatingScorer.score(&poi), 4.5);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `poi`.
    fn score(&self, poi: &PointOfInterest) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=MAX_SCORE`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, MAX_SCORE)
    }
}

/// A point of interest paired with its quality score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredPoi {
    /// The scored place.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub poi: PointOfInterest,
    /// Quality score in `0.0..=MAX_SCORE`.
    pub score: f64,
}

impl ScoredPoi {
    /// Pair a POI with a score.
    pub const fn new(poi: PointOfInterest, score: f64) -> Self {
        Self { poi, score }
    }

    /// Score all `pois` with `scorer`.
    pub fn score_all<S>(scorer: &S, pois: Vec<PointOfInterest>) -> Vec<Self>
    where
        S: Scorer + ?Sized,
    {
        pois.into_iter()
            .map(|poi| {
                let score = scorer.score(&poi);
                Self::new(poi, score)
            })
            .collect()
    }

    /// Provider identifier of the underlying POI.
    pub fn id(&self) -> &str {
        &self.poi.id
    }

    /// Score rescaled into `0.0..=1.0`.
    pub fn normalised_score(&self) -> f64 {
        if !self.score.is_finite() {
            return 0.0;
        }
        (self.score / MAX_SCORE).clamp(0.0, 1.0)
    }

    /// Ranking order: higher score first, then more reviews, then ascending
    /// identifier.
    ///
    /// The order is total, so sorting with it is fully deterministic.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.poi.review_count.cmp(&self.poi.review_count))
            .then_with(|| self.poi.id.cmp(&other.poi.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Categories;
    use geo::Coord;
    use rstest::rstest;

    fn scored(id: &str, score: f64, reviews: Option<u32>) -> ScoredPoi {
        let mut poi = PointOfInterest::new(
            id,
            Coord { x: 0.0, y: 0.0 },
            Categories::from_types(["park"]),
        );
        poi.review_count = reviews;
        ScoredPoi::new(poi, score)
    }

    #[rstest]
    fn higher_score_ranks_first() {
        let a = scored("a", 3.0, Some(10));
        let b = scored("b", 4.0, Some(10));
        assert_eq!(a.rank_cmp(&b), Ordering::Greater);
    }

    #[rstest]
    fn ties_prefer_more_reviews_then_lower_id() {
        let few = scored("a", 4.0, Some(10));
        let many = scored("b", 4.0, Some(100));
        assert_eq!(many.rank_cmp(&few), Ordering::Less);

        let first = scored("a", 4.0, Some(10));
        let second = scored("b", 4.0, Some(10));
        assert_eq!(first.rank_cmp(&second), Ordering::Less);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(2.5, 0.5)]
    #[case(5.0, 1.0)]
    #[case(7.0, 1.0)]
    #[case(f64::NAN, 0.0)]
    fn normalised_score_is_unit_interval(#[case] score: f64, #[case] expected: f64) {
        let poi = scored("a", score, None);
        assert!((poi.normalised_score() - expected).abs() < 1e-12);
    }
}
