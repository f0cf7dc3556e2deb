//! Build itineraries from curated points of interest.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{Route, is_valid_location};

/// Parameters for a route request.
///
/// The request captures the starting point, the number of stops wanted, and
/// an optional city restricting which candidates are considered.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use wayfare_core::SolveRequest;
///
/// let request = SolveRequest::new(Coord { x: 9.19, y: 45.46 }, 9);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Start location for the tour.
    pub start: Coord<f64>,
    /// Maximum number of stops.
    pub n_points: usize,
    /// Only consider candidates collected for this city.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
}

impl SolveRequest {
    /// Request `n_points` stops starting at `start`, across all cities.
    pub const fn new(start: Coord<f64>, n_points: usize) -> Self {
        Self {
            start,
            n_points,
            city: None,
        }
    }

    /// Restrict candidates to `city`.
    #[must_use]
    pub fn in_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Check the request before any candidate is evaluated.
    ///
    /// # Errors
    /// Returns [`SolveRequestValidationError`] when the request asks for no
    /// stops or starts outside WGS84 bounds.
    pub fn validate(&self) -> Result<(), SolveRequestValidationError> {
        if self.n_points == 0 {
            return Err(SolveRequestValidationError::ZeroPoints);
        }
        if !is_valid_location(self.start) {
            return Err(SolveRequestValidationError::InvalidStart {
                lat: self.start.y,
                long: self.start.x,
            });
        }
        Ok(())
    }
}

/// Reasons a [`SolveRequest`] is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveRequestValidationError {
    /// The request asked for zero stops.
    #[error("n_points must be at least 1")]
    ZeroPoints,
    /// The start coordinate is not a valid WGS84 position.
    #[error("start coordinate ({lat}, {long}) is outside WGS84 bounds")]
    InvalidStart {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        long: f64,
    },
}

/// Solver metrics for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent building the route.
    pub solve_time: Duration,
    /// Number of candidates the solver considered.
    pub candidates_evaluated: u64,
    /// Number of start-to-candidate distances computed.
    pub distance_evaluations: u64,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The ordered route for the visitor.
    pub route: Route,
    /// Metrics describing the solve.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Request parameters were invalid, e.g. zero stops.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] SolveRequestValidationError),
}

/// Order candidates into an itinerary for a request.
///
/// Implementations should return [`SolveError::InvalidRequest`] for invalid
/// parameters rather than panicking. Asking for more stops than there are
/// candidates is not an error: the route is simply shorter.
/// Solvers must be `Send + Sync` so independent requests can run
/// concurrently.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a route or an error.
    ///
    /// # Errors
    /// Returns [`SolveError`] when the request is invalid.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}
