//! Drop points of interest that are not worth recommending.

use std::collections::BTreeSet;

use log::{debug, info};
use serde::Serialize;
use wayfare_core::PointOfInterest;

/// Default minimum number of reviews a POI needs to be kept.
pub const DEFAULT_MIN_REVIEWS: u32 = 30;

/// Default tag a POI must carry to be considered relevant.
pub const DEFAULT_RELEVANCE_TYPE: &str = "tourist_attraction";

/// Why the [`QualityFilter`] rejected a POI.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The place is temporarily or permanently closed.
    Closed,
    /// The rating or review count is missing.
    Incomplete,
    /// Fewer reviews than the configured minimum.
    LowEngagement,
    /// None of the POI's types is in the relevance set.
    Irrelevant,
}

/// Per-reason drop counts from [`QualityFilter::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilterReport {
    /// POIs dropped as closed.
    pub closed: usize,
    /// POIs dropped for missing rating or review count.
    pub incomplete: usize,
    /// POIs dropped for too few reviews.
    pub low_engagement: usize,
    /// POIs dropped for lacking a relevant type.
    pub irrelevant: usize,
}

impl FilterReport {
    /// Total number of dropped POIs.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.closed + self.incomplete + self.low_engagement + self.irrelevant
    }

    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::Closed => self.closed += 1,
            DropReason::Incomplete => self.incomplete += 1,
            DropReason::LowEngagement => self.low_engagement += 1,
            DropReason::Irrelevant => self.irrelevant += 1,
        }
    }
}

/// Output of [`QualityFilter::apply`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filtered {
    /// Retained POIs in input order.
    pub pois: Vec<PointOfInterest>,
    /// Drop counts by reason.
    pub report: FilterReport,
}

/// Order-preserving quality predicates.
///
/// # Examples
/// ```
/// use wayfare_core::test_support::poi;
/// use wayfare_data::{DropReason, QualityFilter};
///
/// let filter = QualityFilter::default();
/// let mut quiet = poi("a", 45.46, 9.19, "museum");
/// quiet.review_count = Some(3);
/// assert_eq!(filter.check(&quiet), Err(DropReason::LowEngagement));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityFilter {
    /// Minimum review count.
    pub min_reviews: u32,
    /// A POI must carry at least one of these tags. Empty disables the check.
    pub relevance_types: BTreeSet<String>,
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self {
            min_reviews: DEFAULT_MIN_REVIEWS,
            relevance_types: BTreeSet::from([DEFAULT_RELEVANCE_TYPE.to_owned()]),
        }
    }
}

impl QualityFilter {
    /// Create a filter with explicit thresholds.
    #[must_use]
    pub fn new<I, S>(min_reviews: u32, relevance_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min_reviews,
            relevance_types: relevance_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Return the first check `poi` fails, if any.
    ///
    /// # Errors
    /// Returns the [`DropReason`] of the first failing check.
    pub fn check(&self, poi: &PointOfInterest) -> Result<(), DropReason> {
        if poi.business_status.is_closed() {
            return Err(DropReason::Closed);
        }
        let (Some(_), Some(reviews)) = (poi.rating, poi.review_count) else {
            return Err(DropReason::Incomplete);
        };
        if reviews < self.min_reviews {
            return Err(DropReason::LowEngagement);
        }
        if !self.relevance_types.is_empty()
            && !self
                .relevance_types
                .iter()
                .any(|tag| poi.categories.contains(tag))
        {
            return Err(DropReason::Irrelevant);
        }
        Ok(())
    }

    /// Keep the POIs passing every check.
    #[must_use]
    pub fn apply(&self, pois: Vec<PointOfInterest>) -> Filtered {
        let mut filtered = Filtered::default();
        for poi in pois {
            match self.check(&poi) {
                Ok(()) => filtered.pois.push(poi),
                Err(reason) => {
                    debug!("Filtered {}: {reason:?}", poi.id);
                    filtered.report.record(reason);
                }
            }
        }
        info!(
            "Quality filter kept {} POIs, dropped {}",
            filtered.pois.len(),
            filtered.report.dropped()
        );
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayfare_core::BusinessStatus;
    use wayfare_core::test_support::poi;

    #[fixture]
    fn filter() -> QualityFilter {
        QualityFilter::default()
    }

    #[rstest]
    fn keeps_good_poi(filter: QualityFilter) {
        assert_eq!(filter.check(&poi("a", 45.0, 9.0, "museum")), Ok(()));
    }

    #[rstest]
    #[case(BusinessStatus::ClosedTemporarily)]
    #[case(BusinessStatus::ClosedPermanently)]
    fn closed_places_are_dropped(filter: QualityFilter, #[case] status: BusinessStatus) {
        let closed = poi("a", 45.0, 9.0, "museum").with_status(status);
        assert_eq!(filter.check(&closed), Err(DropReason::Closed));
    }

    #[rstest]
    fn unspecified_status_is_kept(filter: QualityFilter) {
        let unknown = poi("a", 45.0, 9.0, "museum").with_status(BusinessStatus::Unspecified);
        assert_eq!(filter.check(&unknown), Ok(()));
    }

    #[rstest]
    fn missing_rating_is_incomplete(filter: QualityFilter) {
        let mut unrated = poi("a", 45.0, 9.0, "museum");
        unrated.rating = None;
        assert_eq!(filter.check(&unrated), Err(DropReason::Incomplete));
    }

    #[rstest]
    #[case(29, Err(DropReason::LowEngagement))]
    #[case(30, Ok(()))]
    fn review_threshold_is_inclusive(
        filter: QualityFilter,
        #[case] reviews: u32,
        #[case] expected: Result<(), DropReason>,
    ) {
        let candidate = poi("a", 45.0, 9.0, "museum").with_review_count(reviews);
        assert_eq!(filter.check(&candidate), expected);
    }

    #[rstest]
    fn first_failing_check_is_reported(filter: QualityFilter) {
        let mut both = poi("a", 45.0, 9.0, "museum").with_status(BusinessStatus::ClosedPermanently);
        both.review_count = None;
        assert_eq!(filter.check(&both), Err(DropReason::Closed));
    }

    #[rstest]
    fn relevance_requires_a_matching_tag() {
        let filter = QualityFilter::new(0, ["museum"]);
        let park = poi("a", 45.0, 9.0, "park");
        assert_eq!(filter.check(&park), Err(DropReason::Irrelevant));
        assert_eq!(filter.check(&poi("b", 45.0, 9.0, "museum")), Ok(()));
    }

    #[rstest]
    fn empty_relevance_set_disables_check() {
        let filter = QualityFilter::new(0, Vec::<String>::new());
        let mut untagged = poi("a", 45.0, 9.0, "park");
        untagged.categories = wayfare_core::Categories::from_types(["park"]);
        assert_eq!(filter.check(&untagged), Ok(()));
    }

    #[rstest]
    fn apply_preserves_order_and_counts(filter: QualityFilter) {
        let mut unrated = poi("c", 45.0, 9.0, "museum");
        unrated.rating = None;
        let pois = vec![
            poi("a", 45.0, 9.0, "museum"),
            poi("b", 45.0, 9.0, "museum").with_status(BusinessStatus::ClosedTemporarily),
            unrated,
            poi("d", 45.0, 9.0, "museum").with_review_count(1),
            poi("e", 45.0, 9.0, "park"),
        ];

        let filtered = filter.apply(pois);

        let ids: Vec<_> = filtered.pois.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "e"]);
        assert_eq!(
            filtered.report,
            FilterReport {
                closed: 1,
                incomplete: 1,
                low_engagement: 1,
                irrelevant: 0,
            }
        );
        assert_eq!(filtered.report.dropped(), 3);
    }
}
