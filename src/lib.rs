//! Facade crate for the Wayfare curation and itinerary engine.
//!
//! This crate re-exports the domain types, the curation pipeline, and the
//! greedy route optimizer so applications can depend on a single crate.
//!
//! ```
//! use geo::Coord;
//! use serde_json::json;
//! use wayfare::{CurationConfig, GreedySolver, RawRecord, SolveRequest, Solver, curate};
//!
//! let records: Vec<RawRecord> = (0..3)
//!     .map(|i| {
//!         RawRecord::from_value(json!({
//!             "maps_id": format!("museum-{i}"),
//!             "rating": 4.7,
//!             "reviews": 1800,
//!             "lat": 45.46,
//!             "long": 9.18 + f64::from(i) / 100.0,
//!             "primary_type": "museum",
//!             "types": "tourist_attraction/museum",
//!             "editorial_summary": "A fine collection.",
//!         }))
//!         .expect("object")
//!     })
//!     .collect();
//!
//! let curation = curate(&records, None, CurationConfig::default()).expect("valid config");
//! assert_eq!(curation.pois.len(), 3);
//!
//! let solver = GreedySolver::new(curation.pois);
//! let request = SolveRequest::new(Coord { x: 9.18, y: 45.46 }, 2);
//! let response = solver.solve(&request).expect("valid request");
//! assert_eq!(response.route.ids(), vec!["museum-0", "museum-1"]);
//! ```

#![forbid(unsafe_code)]

pub use wayfare_core::{
    BusinessStatus, Categories, Diagnostics, MAX_SCORE, PointOfInterest, Route, ScoredPoi,
    Scorer, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver,
    UNCLASSIFIED, haversine_metres,
};

#[cfg(feature = "serde")]
pub use wayfare_core::{PoiRecord, PoiRecordError};

pub use wayfare_curator::{
    BalancedSelection, CategoryAllocation, CuratedCities, Curation, CurationConfig,
    CurationConfigError, CurationReport, Curator, balance, curate, curate_by_city,
};
pub use wayfare_data::{MalformedRecord, QualityFilter, RawRecord};
pub use wayfare_scorer::{QualityScorer, ScoreConfig, ScoreConfigError, ScoreWeights};
pub use wayfare_solver_greedy::{
    GreedySolver, GreedySolverConfig, GreedySolverConfigError, median_start,
};
