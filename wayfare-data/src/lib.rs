//! Record ingestion and cleaning for the Wayfare engine.
//!
//! Responsibilities:
//! - Coerce loosely typed collector records into [`PointOfInterest`] values.
//! - Merge place-detail enrichment into normalized POIs.
//! - Apply the quality filter ahead of scoring.
//!
//! Boundaries:
//! - Do not score or rank POIs (live in `wayfare-scorer` and
//!   `wayfare-curator`).
//! - Perform no I/O; callers hand in parsed JSON values.
//!
//! Invariants:
//! - Every stage is a pure transformation returning a new collection.
//! - Dropped records are logged through `log` and counted, never silently
//!   discarded.
//!
//! [`PointOfInterest`]: wayfare_core::PointOfInterest
#![forbid(unsafe_code)]

mod enrich;
mod error;
mod filter;
mod normalize;
pub mod raw;

pub use enrich::{
    Enriched, EnrichmentRecord, ParsedEnrichment, merge_enrichment, parse_enrichment,
};
pub use error::MalformedRecord;
pub use filter::{
    DEFAULT_MIN_REVIEWS, DEFAULT_RELEVANCE_TYPE, DropReason, FilterReport, Filtered, QualityFilter,
};
pub use normalize::{NormalizeReport, Normalized, normalize_record, normalize_records};
pub use raw::RawRecord;
