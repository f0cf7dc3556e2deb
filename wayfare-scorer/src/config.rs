//! Tunable parameters for quality scoring.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Review count at which the engagement component saturates by default.
pub const DEFAULT_REVIEW_SATURATION: u32 = 10_000;

/// Relative weighting of the three quality signals.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier applied to the normalized rating.
    pub rating: f64,
    /// Multiplier applied to the saturated review count.
    pub reviews: f64,
    /// Multiplier applied to editorial summary presence.
    pub editorial: f64,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreConfigError::InvalidWeights`] when any value is not
    /// finite or negative, or the total weight is zero or overflows.
    pub fn validate(self) -> Result<Self, ScoreConfigError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ScoreConfigError::InvalidWeights {
                rating: self.rating,
                reviews: self.reviews,
                editorial: self.editorial,
            })
        }
    }

    /// Sum of the three weights.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the total normalizes the weighted sum"
    )]
    pub const fn total(self) -> f64 {
        self.rating + self.reviews + self.editorial
    }

    const fn is_valid(self) -> bool {
        self.has_finite_values()
            && self.has_non_negative_values()
            && self.total() > 0.0
            && self.total().is_finite()
    }

    const fn has_finite_values(self) -> bool {
        self.rating.is_finite() && self.reviews.is_finite() && self.editorial.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.rating >= 0.0 && self.reviews >= 0.0 && self.editorial >= 0.0
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating: 0.5,
            reviews: 0.35,
            editorial: 0.15,
        }
    }
}

/// Complete scorer configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Signal weights.
    pub weights: ScoreWeights,
    /// Review count at which engagement stops adding to the score.
    pub review_saturation: u32,
}

impl ScoreConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreConfigError`] for invalid weights or a zero saturation
    /// point.
    pub fn validate(self) -> Result<Self, ScoreConfigError> {
        self.weights.validate()?;
        if self.review_saturation == 0 {
            return Err(ScoreConfigError::ZeroSaturation);
        }
        Ok(self)
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            review_saturation: DEFAULT_REVIEW_SATURATION,
        }
    }
}

/// Errors raised when configuring the quality scorer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreConfigError {
    /// Weights were negative or non-finite, or their sum was zero or
    /// overflowed.
    #[error(
        "score weights must be finite, non-negative, not all zero and sum to a finite total \
         (rating {rating}, reviews {reviews}, editorial {editorial})"
    )]
    InvalidWeights {
        /// Rating weight as supplied.
        rating: f64,
        /// Review weight as supplied.
        reviews: f64,
        /// Editorial weight as supplied.
        editorial: f64,
    },
    /// The review saturation point was zero.
    #[error("review saturation must be at least one review")]
    ZeroSaturation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert!(ScoreConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(-0.1, 0.5, 0.5)]
    #[case(f64::NAN, 0.5, 0.5)]
    #[case(0.5, f64::INFINITY, 0.5)]
    #[case(0.0, 0.0, 0.0)]
    #[case(f64::MAX, f64::MAX, 0.0)]
    fn invalid_weights_are_rejected(
        #[case] rating: f64,
        #[case] reviews: f64,
        #[case] editorial: f64,
    ) {
        let weights = ScoreWeights {
            rating,
            reviews,
            editorial,
        };
        assert!(matches!(
            weights.validate(),
            Err(ScoreConfigError::InvalidWeights { .. })
        ));
    }

    #[rstest]
    fn single_non_zero_weight_is_valid() {
        let weights = ScoreWeights {
            rating: 1.0,
            reviews: 0.0,
            editorial: 0.0,
        };
        assert_eq!(weights.validate(), Ok(weights));
    }

    #[rstest]
    fn zero_saturation_is_rejected() {
        let config = ScoreConfig {
            review_saturation: 0,
            ..ScoreConfig::default()
        };
        assert_eq!(config.validate(), Err(ScoreConfigError::ZeroSaturation));
    }
}
