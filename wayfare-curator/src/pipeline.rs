//! End-to-end curation: normalize, enrich, filter, score and balance.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;
use thiserror::Error;
use wayfare_core::{MAX_SCORE, PointOfInterest, ScoredPoi, Scorer};
use wayfare_data::{
    FilterReport, NormalizeReport, QualityFilter, RawRecord, merge_enrichment, normalize_records,
    parse_enrichment,
};
use wayfare_scorer::{QualityScorer, ScoreConfig, ScoreConfigError};

use crate::balance::{
    BalancedSelection, CategoryAllocation, DEFAULT_MIN_TYPE_COUNT, DEFAULT_TOTAL_SLOTS, balance,
};

/// Default minimum score a POI needs to be eligible for selection.
pub const DEFAULT_MIN_SCORE: f64 = 3.0;

/// Thresholds and weights for a curation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CurationConfig {
    /// Review and relevance thresholds.
    pub filter: QualityFilter,
    /// Scores strictly below this are dropped after scoring.
    pub min_score: f64,
    /// Number of POIs to select per run (or per city).
    pub total_slots: usize,
    /// Member count a category must exceed to be significant.
    pub min_type_count: usize,
    /// Quality scorer configuration.
    pub scoring: ScoreConfig,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            filter: QualityFilter::default(),
            min_score: DEFAULT_MIN_SCORE,
            total_slots: DEFAULT_TOTAL_SLOTS,
            min_type_count: DEFAULT_MIN_TYPE_COUNT,
            scoring: ScoreConfig::default(),
        }
    }
}

impl CurationConfig {
    /// Check the configuration before any record is processed.
    ///
    /// # Errors
    /// Returns [`CurationConfigError`] when no slots are requested, the
    /// minimum score is outside `0.0..=MAX_SCORE`, or the scorer
    /// configuration is invalid.
    pub fn validate(&self) -> Result<(), CurationConfigError> {
        if self.total_slots == 0 {
            return Err(CurationConfigError::ZeroSlots);
        }
        if !(0.0..=MAX_SCORE).contains(&self.min_score) {
            return Err(CurationConfigError::MinScoreOutOfRange {
                min_score: self.min_score,
            });
        }
        self.scoring.validate()?;
        Ok(())
    }
}

/// Fatal configuration problems detected before curation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurationConfigError {
    /// `total_slots` was zero.
    #[error("total slots must be at least one")]
    ZeroSlots,
    /// `min_score` was NaN or outside the score range.
    #[error("minimum score {min_score} is outside 0..={MAX_SCORE}")]
    MinScoreOutOfRange {
        /// Rejected minimum score.
        min_score: f64,
    },
    /// The scorer rejected its configuration.
    #[error("invalid scoring configuration")]
    Scoring(#[from] ScoreConfigError),
}

/// Counts collected across every curation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CurationReport {
    /// Normalization outcome.
    pub normalize: NormalizeReport,
    /// Enrichment records skipped for lacking an identifier.
    pub skipped_enrichment: usize,
    /// POIs dropped for lack of an enrichment record.
    pub unmatched_enrichment: usize,
    /// Quality filter drops.
    pub filter: FilterReport,
    /// POIs scoring below the minimum.
    pub below_min_score: usize,
    /// POIs added by leftover fill.
    pub leftover_fill: usize,
    /// POIs in the final selection.
    pub selected: usize,
}

impl CurationReport {
    /// Add the stage counts of `other` to `self`.
    ///
    /// Normalization and enrichment parsing counts are left alone because
    /// those stages run once per batch, before any per-city split.
    pub const fn absorb(&mut self, other: &Self) {
        self.unmatched_enrichment += other.unmatched_enrichment;
        self.filter.closed += other.filter.closed;
        self.filter.incomplete += other.filter.incomplete;
        self.filter.low_engagement += other.filter.low_engagement;
        self.filter.irrelevant += other.filter.irrelevant;
        self.below_min_score += other.below_min_score;
        self.leftover_fill += other.leftover_fill;
        self.selected += other.selected;
    }
}

/// Result of curating one batch of POIs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curation {
    /// Selected POIs in balancer order.
    pub pois: Vec<ScoredPoi>,
    /// Per-category allocations.
    pub allocations: Vec<CategoryAllocation>,
    /// Stage counts.
    pub report: CurationReport,
}

/// Curation of one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCuration {
    /// City name as found in the records; empty when unknown.
    pub city: String,
    /// Curation of that city's POIs.
    pub curation: Curation,
}

/// Result of [`Curator::curate_by_city`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CuratedCities {
    /// One entry per city, in ascending name order.
    pub cities: Vec<CityCuration>,
    /// Counts summed across all cities.
    pub report: CurationReport,
}

impl CuratedCities {
    /// Selected POIs of every city, city by city.
    #[must_use]
    pub fn into_pois(self) -> Vec<ScoredPoi> {
        self.cities
            .into_iter()
            .flat_map(|city| city.curation.pois)
            .collect()
    }
}

/// Runs the curation pipeline with a validated configuration.
///
/// The scorer defaults to [`QualityScorer`] but any [`Scorer`] can be
/// plugged in via [`Curator::with_scorer`].
#[derive(Debug, Clone)]
pub struct Curator<S = QualityScorer> {
    config: CurationConfig,
    scorer: S,
}

impl Curator<QualityScorer> {
    /// Validate `config` and build the matching quality scorer.
    ///
    /// # Errors
    /// Returns [`CurationConfigError`] when `config` is invalid.
    pub fn new(config: CurationConfig) -> Result<Self, CurationConfigError> {
        config.validate()?;
        let scorer = QualityScorer::new(config.scoring)?;
        Ok(Self { config, scorer })
    }
}

impl<S: Scorer> Curator<S> {
    /// Validate `config` and pair it with a custom scorer.
    ///
    /// # Errors
    /// Returns [`CurationConfigError`] when `config` is invalid.
    pub fn with_scorer(config: CurationConfig, scorer: S) -> Result<Self, CurationConfigError> {
        config.validate()?;
        Ok(Self { config, scorer })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CurationConfig {
        &self.config
    }

    /// Curate raw records into a balanced selection.
    ///
    /// Without `enrichment` the merge step is skipped and every normalized
    /// POI proceeds to the quality filter.
    #[must_use]
    pub fn curate(&self, records: &[RawRecord], enrichment: Option<&[RawRecord]>) -> Curation {
        let (pois, mut report) = self.prepare(records, enrichment);
        let curation = self.select(pois);
        report.absorb(&curation.report);
        log_report(&report);
        Curation { report, ..curation }
    }

    /// Curate each city independently, each to its own slot budget.
    ///
    /// Records are normalized and enriched as one batch, so duplicate
    /// identifiers are resolved across cities.
    #[must_use]
    pub fn curate_by_city(
        &self,
        records: &[RawRecord],
        enrichment: Option<&[RawRecord]>,
    ) -> CuratedCities {
        let (pois, mut report) = self.prepare(records, enrichment);
        let mut by_city: BTreeMap<String, Vec<PointOfInterest>> = BTreeMap::new();
        for poi in pois {
            by_city.entry(poi.city.clone()).or_default().push(poi);
        }

        let mut cities = Vec::with_capacity(by_city.len());
        for (city, members) in by_city {
            let curation = self.select(members);
            info!("Curated {} POIs for {city:?}", curation.pois.len());
            report.absorb(&curation.report);
            cities.push(CityCuration { city, curation });
        }
        log_report(&report);
        CuratedCities { cities, report }
    }

    fn prepare(
        &self,
        records: &[RawRecord],
        enrichment: Option<&[RawRecord]>,
    ) -> (Vec<PointOfInterest>, CurationReport) {
        let normalized = normalize_records(records);
        let mut report = CurationReport {
            normalize: normalized.report,
            ..CurationReport::default()
        };
        let pois = match enrichment {
            Some(raw) => {
                let parsed = parse_enrichment(raw);
                report.skipped_enrichment = parsed.skipped;
                let enriched = merge_enrichment(normalized.pois, parsed.records);
                report.unmatched_enrichment = enriched.unmatched;
                enriched.pois
            }
            None => normalized.pois,
        };
        (pois, report)
    }

    fn select(&self, pois: Vec<PointOfInterest>) -> Curation {
        let filtered = self.config.filter.apply(pois);
        let scored = ScoredPoi::score_all(&self.scorer, filtered.pois);
        let before = scored.len();
        let eligible: Vec<ScoredPoi> = scored
            .into_iter()
            .filter(|poi| poi.score >= self.config.min_score)
            .collect();
        let below_min_score = before - eligible.len();

        let BalancedSelection {
            selected,
            allocations,
            leftover_fill,
        } = balance(
            eligible,
            self.config.total_slots,
            self.config.min_type_count,
        );
        Curation {
            report: CurationReport {
                filter: filtered.report,
                below_min_score,
                leftover_fill,
                selected: selected.len(),
                ..CurationReport::default()
            },
            pois: selected,
            allocations,
        }
    }
}

/// Validate `config` and curate `records` with the quality scorer.
///
/// # Errors
/// Returns [`CurationConfigError`] when `config` is invalid; no record is
/// processed in that case.
pub fn curate(
    records: &[RawRecord],
    enrichment: Option<&[RawRecord]>,
    config: CurationConfig,
) -> Result<Curation, CurationConfigError> {
    Ok(Curator::new(config)?.curate(records, enrichment))
}

/// Validate `config` and curate `records` city by city.
///
/// # Errors
/// Returns [`CurationConfigError`] when `config` is invalid.
pub fn curate_by_city(
    records: &[RawRecord],
    enrichment: Option<&[RawRecord]>,
    config: CurationConfig,
) -> Result<CuratedCities, CurationConfigError> {
    Ok(Curator::new(config)?.curate_by_city(records, enrichment))
}

fn log_report(report: &CurationReport) {
    info!(
        "Curation selected {} POIs: {} malformed, {} duplicate, {} skipped enrichment, \
         {} unenriched, {} filtered, {} below minimum score, {} leftover fill",
        report.selected,
        report.normalize.malformed,
        report.normalize.duplicates,
        report.skipped_enrichment,
        report.unmatched_enrichment,
        report.filter.dropped(),
        report.below_min_score,
        report.leftover_fill
    );
}
