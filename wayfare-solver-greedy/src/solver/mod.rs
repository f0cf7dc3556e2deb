//! `GreedySolver` implementation over an in-memory candidate set.

use std::time::Instant;

use log::info;
use thiserror::Error;
use wayfare_core::{
    Diagnostics, Route, ScoredPoi, SolveError, SolveRequest, SolveResponse, Solver,
};

use crate::GreedyTour;

/// Default strength of the score discount applied to distances.
pub const DEFAULT_DISCOUNT_STRENGTH: f64 = 0.5;

/// Configuration for [`GreedySolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedySolverConfig {
    /// Fraction of a leg's distance forgiven for a top-scoring POI.
    ///
    /// Must lie in `0.0..1.0`; at `0.0` the tour is a plain nearest-neighbour
    /// walk.
    pub discount_strength: f64,
}

impl GreedySolverConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`GreedySolverConfigError::DiscountStrengthOutOfRange`] unless
    /// `discount_strength` lies in `0.0..1.0`.
    pub fn validate(self) -> Result<Self, GreedySolverConfigError> {
        if (0.0..1.0).contains(&self.discount_strength) {
            Ok(self)
        } else {
            Err(GreedySolverConfigError::DiscountStrengthOutOfRange {
                discount_strength: self.discount_strength,
            })
        }
    }
}

impl Default for GreedySolverConfig {
    fn default() -> Self {
        Self {
            discount_strength: DEFAULT_DISCOUNT_STRENGTH,
        }
    }
}

/// Errors raised when configuring a [`GreedySolver`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GreedySolverConfigError {
    /// The discount strength was NaN or outside `0.0..1.0`.
    #[error("discount strength {discount_strength} must lie in [0, 1)")]
    DiscountStrengthOutOfRange {
        /// Rejected value.
        discount_strength: f64,
    },
}

/// Builds itineraries by walking to the best nearby POI at each step.
///
/// The solver owns its candidates and is immutable once built, so one
/// instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct GreedySolver {
    candidates: Vec<ScoredPoi>,
    config: GreedySolverConfig,
}

impl GreedySolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new(candidates: Vec<ScoredPoi>) -> Self {
        Self {
            candidates,
            config: GreedySolverConfig::default(),
        }
    }

    /// Construct a solver with explicit configuration.
    ///
    /// # Errors
    /// Returns [`GreedySolverConfigError`] when `config` fails validation.
    pub fn with_config(
        candidates: Vec<ScoredPoi>,
        config: GreedySolverConfig,
    ) -> Result<Self, GreedySolverConfigError> {
        Ok(Self {
            candidates,
            config: config.validate()?,
        })
    }

    /// Candidates the solver draws from.
    #[must_use]
    pub fn candidates(&self) -> &[ScoredPoi] {
        &self.candidates
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> GreedySolverConfig {
        self.config
    }

    fn select_candidates<'a>(
        &'a self,
        request: &'a SolveRequest,
    ) -> impl Iterator<Item = &'a ScoredPoi> + 'a {
        self.candidates.iter().filter(move |candidate| {
            request
                .city
                .as_deref()
                .is_none_or(|city| candidate.poi.city == city)
        })
    }
}

impl Solver for GreedySolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        request.validate()?;
        let started_at = Instant::now();

        let mut tour = GreedyTour::new(
            request.start,
            self.select_candidates(request),
            self.config.discount_strength,
        );
        let candidates_evaluated = u64::try_from(tour.len()).unwrap_or(u64::MAX);

        let legs: Vec<_> = tour.by_ref().take(request.n_points).collect();
        let total_distance_metres: f64 = legs.iter().map(|leg| leg.distance_metres).sum();
        let stops: Vec<ScoredPoi> = legs.into_iter().map(|leg| leg.poi.clone()).collect();

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            candidates_evaluated,
            distance_evaluations: tour.distance_evaluations(),
        };
        info!(
            "Greedy route with {} stops covering {total_distance_metres:.0} m from {candidates_evaluated} candidates",
            stops.len()
        );

        Ok(SolveResponse {
            route: Route::new(stops, total_distance_metres),
            diagnostics,
        })
    }
}
