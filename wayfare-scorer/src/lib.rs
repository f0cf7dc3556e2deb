//! Quality scoring for Wayfare points of interest.
//!
//! [`QualityScorer`] implements the [`Scorer`](wayfare_core::Scorer) trait by
//! blending the rating, a log-saturated review count and editorial coverage
//! into a score in `0.0..=MAX_SCORE`. Weights and the saturation point are
//! configured through [`ScoreConfig`] and validated before use.
//!
//! # Examples
//!
//! ```
//! use wayfare_core::{ScoredPoi, test_support::poi};
//! use wayfare_scorer::{QualityScorer, ScoreConfig};
//!
//! let scorer = QualityScorer::new(ScoreConfig::default())?;
//! let scored = ScoredPoi::score_all(&scorer, vec![poi("a", 45.46, 9.19, "museum")]);
//! assert!(scored.iter().all(|p| (0.0..=5.0).contains(&p.score)));
//! # Ok::<(), wayfare_scorer::ScoreConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod quality;

pub use config::{DEFAULT_REVIEW_SATURATION, ScoreConfig, ScoreConfigError, ScoreWeights};
pub use quality::{QualityScorer, ScoreBreakdown};
