//! Core domain types for the Wayfare engine.
//!
//! The crate defines the points of interest flowing through curation, the
//! scored wrapper the balancer and router consume, and the traits that
//! scoring and routing implementations plug into.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod geodesy;
pub mod poi;
#[cfg(feature = "serde")]
mod record;
mod route;
mod scorer;
mod solver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use geodesy::{haversine_metres, is_valid_location};
pub use poi::{BusinessStatus, Categories, PointOfInterest, UNCLASSIFIED};
#[cfg(feature = "serde")]
pub use record::{PoiRecord, PoiRecordError};
pub use route::Route;
pub use scorer::{MAX_SCORE, ScoredPoi, Scorer};
pub use solver::{
    Diagnostics, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver,
};
