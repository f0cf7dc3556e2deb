//! Greedy itinerary construction for Wayfare.
//!
//! This crate provides [`GreedySolver`], an implementation of the
//! [`Solver`](wayfare_core::Solver) trait that orders curated POIs into a
//! walkable route. Starting from the requested coordinate, it repeatedly moves
//! to the unvisited POI with the smallest *adjusted distance*: the haversine
//! distance discounted in proportion to the POI's score. High-scoring places
//! are therefore worth a slightly longer walk.
//!
//! Tour state lives in a per-call [`GreedyTour`] iterator, so a single solver
//! can answer concurrent requests.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod solver;
mod start;
mod tour;

pub use solver::{
    DEFAULT_DISCOUNT_STRENGTH, GreedySolver, GreedySolverConfig, GreedySolverConfigError,
};
pub use start::median_start;
pub use tour::{GreedyTour, Leg, adjusted_distance};
