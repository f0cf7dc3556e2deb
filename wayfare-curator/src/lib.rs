//! Curation of points of interest for Wayfare itineraries.
//!
//! The [`Curator`] chains the stages of a curation run:
//!
//! 1. normalize raw collector records,
//! 2. optionally merge place-detail enrichment,
//! 3. apply the quality filter,
//! 4. score with a [`Scorer`](wayfare_core::Scorer) and drop low scores,
//! 5. [`balance`] the survivors across significant categories.
//!
//! Configuration is validated once, up front; after that, curation cannot
//! fail. Dropped records are counted in a [`CurationReport`] and logged via
//! `log`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod balance;
mod pipeline;

pub use balance::{
    BalancedSelection, CategoryAllocation, DEFAULT_MIN_TYPE_COUNT, DEFAULT_TOTAL_SLOTS, balance,
};
pub use pipeline::{
    CityCuration, CuratedCities, Curation, CurationConfig, CurationConfigError, CurationReport,
    Curator, DEFAULT_MIN_SCORE, curate, curate_by_city,
};
