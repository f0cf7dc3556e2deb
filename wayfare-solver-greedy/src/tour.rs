//! Score-discounted nearest-neighbour tour construction.

use std::cmp::Ordering;

use geo::Coord;
use log::debug;
use wayfare_core::{ScoredPoi, haversine_metres};

/// One step of a [`GreedyTour`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg<'a> {
    /// POI visited at the end of the leg.
    pub poi: &'a ScoredPoi,
    /// Great-circle length of the leg in metres.
    pub distance_metres: f64,
    /// Distance after the score discount, used for selection.
    pub adjusted_metres: f64,
}

/// Discount `distance` by up to `discount_strength` for high-scoring POIs.
///
/// Returns `distance * (1 - discount_strength * s)` where `s` is the
/// normalized score, never less than zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the discount scales distance by normalized score"
)]
pub fn adjusted_distance(distance: f64, poi: &ScoredPoi, discount_strength: f64) -> f64 {
    (distance * (1.0 - discount_strength * poi.normalised_score())).max(0.0)
}

/// Iterator producing a greedy tour one leg at a time.
///
/// Each step moves to the remaining POI with the smallest adjusted distance
/// from the current point. Ties prefer the higher score, then the smaller
/// identifier, so the tour is fully deterministic.
///
/// All state lives in the iterator, so concurrent tours never interfere.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::test_support::scored;
/// use wayfare_solver_greedy::GreedyTour;
///
/// let candidates = vec![scored("far", 0.0, 1.0, 5.0), scored("near", 0.0, 0.1, 1.0)];
/// let tour = GreedyTour::new(Coord { x: 0.0, y: 0.0 }, &candidates, 0.5);
/// let ids: Vec<_> = tour.map(|leg| leg.poi.id()).collect();
/// assert_eq!(ids, vec!["near", "far"]);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyTour<'a> {
    current_point: Coord<f64>,
    remaining: Vec<&'a ScoredPoi>,
    discount_strength: f64,
    distance_evaluations: u64,
}

impl<'a> GreedyTour<'a> {
    /// Start a tour at `start` over `candidates`.
    pub fn new<I>(start: Coord<f64>, candidates: I, discount_strength: f64) -> Self
    where
        I: IntoIterator<Item = &'a ScoredPoi>,
    {
        Self {
            current_point: start,
            remaining: candidates.into_iter().collect(),
            discount_strength,
            distance_evaluations: 0,
        }
    }

    /// Location the next leg departs from.
    #[must_use]
    pub const fn current_point(&self) -> Coord<f64> {
        self.current_point
    }

    /// Number of POIs not yet visited.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Number of distance computations performed so far.
    #[must_use]
    pub const fn distance_evaluations(&self) -> u64 {
        self.distance_evaluations
    }

    fn nearest(&mut self) -> Option<(usize, Leg<'a>)> {
        let mut best: Option<(usize, Leg<'a>)> = None;
        for (index, poi) in self.remaining.iter().copied().enumerate() {
            let distance_metres = haversine_metres(self.current_point, poi.poi.location);
            self.distance_evaluations = self.distance_evaluations.saturating_add(1);
            let leg = Leg {
                poi,
                distance_metres,
                adjusted_metres: adjusted_distance(distance_metres, poi, self.discount_strength),
            };
            let better = best
                .as_ref()
                .is_none_or(|(_, current)| leg_cmp(&leg, current) == Ordering::Less);
            if better {
                best = Some((index, leg));
            }
        }
        best
    }
}

impl<'a> Iterator for GreedyTour<'a> {
    type Item = Leg<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, leg) = self.nearest()?;
        self.remaining.swap_remove(index);
        self.current_point = leg.poi.poi.location;
        debug!(
            "Visiting {} after {:.0} m (adjusted {:.0} m), {} remaining",
            leg.poi.id(),
            leg.distance_metres,
            leg.adjusted_metres,
            self.remaining.len()
        );
        Some(leg)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl ExactSizeIterator for GreedyTour<'_> {}

fn leg_cmp(lhs: &Leg<'_>, rhs: &Leg<'_>) -> Ordering {
    lhs.adjusted_metres
        .total_cmp(&rhs.adjusted_metres)
        .then_with(|| rhs.poi.score.total_cmp(&lhs.poi.score))
        .then_with(|| lhs.poi.id().cmp(rhs.poi.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayfare_core::test_support::scored;

    #[rstest]
    #[case(1000.0, 5.0, 0.5, 500.0)]
    #[case(1000.0, 0.0, 0.5, 1000.0)]
    #[case(1000.0, 2.5, 0.0, 1000.0)]
    #[case(1000.0, 9.0, 0.5, 500.0)]
    #[case(0.0, 5.0, 0.9, 0.0)]
    fn adjusted_distance_discounts_by_score(
        #[case] distance: f64,
        #[case] score: f64,
        #[case] strength: f64,
        #[case] expected: f64,
    ) {
        let poi = scored("a", 0.0, 0.0, score);
        assert_eq!(adjusted_distance(distance, &poi, strength), expected);
    }

    #[rstest]
    fn equal_adjusted_distance_prefers_higher_score_then_id() {
        let candidates = vec![
            scored("b", 0.0, 0.0, 3.0),
            scored("c", 0.0, 0.0, 4.0),
            scored("a", 0.0, 0.0, 3.0),
        ];
        let tour = GreedyTour::new(Coord { x: 0.0, y: 0.0 }, &candidates, 0.5);
        let ids: Vec<_> = tour.map(|leg| leg.poi.id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[rstest]
    fn tour_tracks_state_between_steps() {
        let candidates = vec![scored("a", 0.0, 0.001, 4.0), scored("b", 0.0, 0.002, 4.0)];
        let mut tour = GreedyTour::new(Coord { x: 0.0, y: 0.0 }, &candidates, 0.5);
        assert_eq!(tour.len(), 2);

        let first = tour.next().expect("first leg");
        assert_eq!(first.poi.id(), "a");
        assert_eq!(tour.current_point(), first.poi.poi.location);
        assert_eq!(tour.remaining(), 1);
        assert_eq!(tour.distance_evaluations(), 2);

        assert!(tour.next().is_some());
        assert!(tour.next().is_none());
        assert_eq!(tour.distance_evaluations(), 3);
    }

    #[rstest]
    fn empty_tour_yields_nothing() {
        let mut tour = GreedyTour::new(Coord { x: 0.0, y: 0.0 }, std::iter::empty(), 0.5);
        assert!(tour.next().is_none());
        assert_eq!(tour.distance_evaluations(), 0);
    }
}
