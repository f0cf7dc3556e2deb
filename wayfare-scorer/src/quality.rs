//! Composite quality scorer.
//!
//! The score blends three signals, each mapped into `0.0..=1.0`:
//! - the rating, rescaled from `1.0..=5.0`;
//! - the review count on a logarithmic scale that saturates at
//!   [`ScoreConfig::review_saturation`];
//! - whether an editorial summary is present.
//!
//! The weighted mean is stretched to `0.0..=MAX_SCORE`. Every signal is
//! monotone and every weight non-negative, so a better input never lowers the
//! score.
#![forbid(unsafe_code)]

use log::debug;
use wayfare_core::{MAX_SCORE, PointOfInterest, Scorer};

use crate::{ScoreConfig, ScoreConfigError, ScoreWeights};

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Per-signal contributions behind a score, each in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Normalized rating.
    pub rating: f64,
    /// Saturated review engagement.
    pub reviews: f64,
    /// `1.0` when an editorial summary is present.
    pub editorial: f64,
}

/// Scores POIs by rating, review volume and editorial coverage.
///
/// # Examples
/// ```
/// use wayfare_core::{Scorer, test_support::poi};
/// use wayfare_scorer::QualityScorer;
///
/// let scorer = QualityScorer::default();
/// let mut modest = poi("a", 45.46, 9.19, "museum");
/// modest.review_count = Some(40);
/// let famous = poi("b", 45.46, 9.19, "museum").with_review_count(40_000);
/// assert!(scorer.score(&famous) > scorer.score(&modest));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QualityScorer {
    weights: ScoreWeights,
    saturation_log: f64,
}

impl QualityScorer {
    /// Build a scorer from a validated configuration.
    ///
    /// # Errors
    /// Returns [`ScoreConfigError`] when `config` fails validation.
    pub fn new(config: ScoreConfig) -> Result<Self, ScoreConfigError> {
        let config = config.validate()?;
        debug!(
            "Quality scorer weights {:?}, saturating at {} reviews",
            config.weights, config.review_saturation
        );
        Ok(Self {
            weights: config.weights,
            saturation_log: f64::from(config.review_saturation).ln_1p(),
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Break a POI's score into its per-signal components.
    #[must_use]
    pub fn breakdown(&self, poi: &PointOfInterest) -> ScoreBreakdown {
        ScoreBreakdown {
            rating: rating_component(poi.rating),
            reviews: self.review_component(poi.review_count),
            editorial: if poi.has_editorial_summary() {
                1.0
            } else {
                0.0
            },
        }
    }

    fn review_component(&self, reviews: Option<u32>) -> f64 {
        let Some(reviews) = reviews else {
            return 0.0;
        };
        #[expect(
            clippy::float_arithmetic,
            reason = "log saturation divides two logarithms"
        )]
        let ratio = f64::from(reviews).ln_1p() / self.saturation_log;
        ratio.min(1.0)
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "score blending requires weighted averages"
    )]
    fn blend(&self, parts: ScoreBreakdown) -> f64 {
        // Each share lies in 0..=1, so no intermediate can overflow.
        let total = self.weights.total();
        let share = |weight: f64| weight / total;
        let unit = share(self.weights.rating) * parts.rating
            + share(self.weights.reviews) * parts.reviews
            + share(self.weights.editorial) * parts.editorial;
        MAX_SCORE * unit
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        let config = ScoreConfig::default();
        Self {
            weights: config.weights,
            saturation_log: f64::from(config.review_saturation).ln_1p(),
        }
    }
}

impl Scorer for QualityScorer {
    fn score(&self, poi: &PointOfInterest) -> f64 {
        Self::sanitise(self.blend(self.breakdown(poi)))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "ratings are rescaled linearly into the unit interval"
)]
fn rating_component(rating: Option<f64>) -> f64 {
    match rating {
        Some(value) if value.is_finite() => {
            (value.clamp(MIN_RATING, MAX_RATING) - MIN_RATING) / (MAX_RATING - MIN_RATING)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floats within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use wayfare_core::test_support::poi;

    #[fixture]
    fn scorer() -> QualityScorer {
        QualityScorer::default()
    }

    fn bare(rating: Option<f64>, reviews: Option<u32>) -> PointOfInterest {
        let mut candidate = poi("a", 45.0, 9.0, "museum");
        candidate.rating = rating;
        candidate.review_count = reviews;
        candidate.editorial_summary = None;
        candidate
    }

    #[rstest]
    #[case(None, 0.0)]
    #[case(Some(1.0), 0.0)]
    #[case(Some(3.0), 0.5)]
    #[case(Some(5.0), 1.0)]
    #[case(Some(9.0), 1.0)]
    fn rating_is_rescaled(#[case] rating: Option<f64>, #[case] expected: f64) {
        assert!((rating_component(rating) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn review_component_saturates(scorer: QualityScorer) {
        assert!((scorer.review_component(Some(10_000)) - 1.0).abs() < 1e-12);
        assert!((scorer.review_component(Some(1_000_000)) - 1.0).abs() < 1e-12);
        assert_eq!(scorer.review_component(None), 0.0);
        assert_eq!(scorer.review_component(Some(0)), 0.0);
    }

    #[rstest]
    fn perfect_poi_scores_maximum(scorer: QualityScorer) {
        let best = bare(Some(5.0), Some(50_000)).with_editorial_summary("Iconic.");
        assert!((scorer.score(&best) - MAX_SCORE).abs() < 1e-9);
    }

    #[rstest]
    fn empty_poi_scores_zero(scorer: QualityScorer) {
        assert_eq!(scorer.score(&bare(None, None)), 0.0);
    }

    #[rstest]
    fn blank_editorial_summary_earns_nothing(scorer: QualityScorer) {
        let blank = bare(Some(4.0), Some(100)).with_editorial_summary("   ");
        let none = bare(Some(4.0), Some(100));
        assert_eq!(scorer.score(&blank), scorer.score(&none));
    }

    #[rstest]
    fn rating_only_weights_ignore_other_signals() {
        let config = ScoreConfig {
            weights: ScoreWeights {
                rating: 1.0,
                reviews: 0.0,
                editorial: 0.0,
            },
            ..ScoreConfig::default()
        };
        let scorer = QualityScorer::new(config).expect("valid config");
        let candidate = bare(Some(4.0), Some(5)).with_editorial_summary("Nice.");
        assert!((scorer.score(&candidate) - 3.75).abs() < 1e-9);
    }

    #[rstest]
    #[case(1e308, 0.0, 0.0)]
    #[case(1e308, 1e307, 1e-300)]
    fn huge_weights_keep_scores_ordered(
        #[case] rating: f64,
        #[case] reviews: f64,
        #[case] editorial: f64,
    ) {
        let config = ScoreConfig {
            weights: ScoreWeights {
                rating,
                reviews,
                editorial,
            },
            ..ScoreConfig::default()
        };
        let scorer = QualityScorer::new(config).expect("valid config");

        let worse = scorer.score(&bare(Some(2.0), Some(100)));
        let better = scorer.score(&bare(Some(5.0), Some(100)));

        assert!(worse > 0.0, "worse scored {worse}");
        assert!(worse < better, "{worse} >= {better}");
        assert!(better <= MAX_SCORE);
    }

    #[rstest]
    fn invalid_config_is_rejected() {
        let config = ScoreConfig {
            review_saturation: 0,
            ..ScoreConfig::default()
        };
        assert_eq!(
            QualityScorer::new(config),
            Err(ScoreConfigError::ZeroSaturation)
        );
    }
}
