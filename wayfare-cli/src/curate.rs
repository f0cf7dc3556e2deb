//! Curate command implementation for the Wayfare CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::ScoredPoi;
use wayfare_curator::{CurationConfig, CurationReport, curate, curate_by_city};
use wayfare_data::{QualityFilter, RawRecord};
use wayfare_scorer::{ScoreConfig, ScoreWeights};

use crate::io::{emit_json, load_json, require_existing};
use crate::{
    ARG_CURATE_EDITORIAL_WEIGHT, ARG_CURATE_ENRICHMENT, ARG_CURATE_MIN_REVIEWS,
    ARG_CURATE_MIN_SCORE, ARG_CURATE_MIN_TYPE_COUNT, ARG_CURATE_OUTPUT, ARG_CURATE_PER_CITY,
    ARG_CURATE_RATING_WEIGHT, ARG_CURATE_RECORDS, ARG_CURATE_RELEVANCE_TYPE,
    ARG_CURATE_REVIEW_SATURATION, ARG_CURATE_REVIEW_WEIGHT, ARG_CURATE_TOTAL_SLOTS, CliError,
    ENV_CURATE_RECORDS,
};

/// CLI arguments for the `curate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Normalize, filter, score and balance a JSON array of \
                 collected place records. Place-detail enrichment can be \
                 merged in first. The curated table is written as JSON \
                 together with the number of records dropped at each stage.",
    about = "Curate collected records into a balanced shortlist"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct CurateArgs {
    /// Path to a JSON array of collected records.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) records_path: Option<Utf8PathBuf>,
    /// Path to a JSON array of place-detail enrichment records.
    #[arg(long = ARG_CURATE_ENRICHMENT, value_name = "path")]
    #[serde(default)]
    pub(crate) enrichment: Option<Utf8PathBuf>,
    /// Write the curated table here instead of stdout.
    #[arg(long = ARG_CURATE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Number of POIs to select (per city with `--per-city`).
    #[arg(long = ARG_CURATE_TOTAL_SLOTS, value_name = "n")]
    #[serde(default)]
    pub(crate) total_slots: Option<usize>,
    /// Places with fewer reviews are dropped.
    #[arg(long = ARG_CURATE_MIN_REVIEWS, value_name = "n")]
    #[serde(default)]
    pub(crate) min_reviews: Option<u32>,
    /// Places scoring below this are dropped.
    #[arg(long = ARG_CURATE_MIN_SCORE, value_name = "score")]
    #[serde(default)]
    pub(crate) min_score: Option<f64>,
    /// Member count a category must exceed to receive its own allocation.
    #[arg(long = ARG_CURATE_MIN_TYPE_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) min_type_count: Option<usize>,
    /// Type tag that marks a place as relevant; repeat for several.
    #[arg(long = ARG_CURATE_RELEVANCE_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) relevance_types: Option<Vec<String>>,
    /// Curate each city to its own slot budget.
    #[arg(long = ARG_CURATE_PER_CITY)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) per_city: bool,
    /// Weight of the rating in the quality score.
    #[arg(long = ARG_CURATE_RATING_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) rating_weight: Option<f64>,
    /// Weight of the review volume in the quality score.
    #[arg(long = ARG_CURATE_REVIEW_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) review_weight: Option<f64>,
    /// Weight of editorial coverage in the quality score.
    #[arg(long = ARG_CURATE_EDITORIAL_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) editorial_weight: Option<f64>,
    /// Review count at which review volume stops raising the score.
    #[arg(long = ARG_CURATE_REVIEW_SATURATION, value_name = "n")]
    #[serde(default)]
    pub(crate) review_saturation: Option<u32>,
}

impl CurateArgs {
    pub(crate) fn into_config(self) -> Result<CurateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CurateConfig::try_from(merged)
    }
}

/// Resolved `curate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CurateConfig {
    /// Path to the collected records.
    pub(crate) records_path: Utf8PathBuf,
    /// Optional path to enrichment records.
    pub(crate) enrichment_path: Option<Utf8PathBuf>,
    /// Optional output path; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Whether to curate each city separately.
    pub(crate) per_city: bool,
    /// Pipeline thresholds.
    pub(crate) curation: CurationConfig,
}

impl CurateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.records_path, ARG_CURATE_RECORDS)?;
        if let Some(path) = &self.enrichment_path {
            require_existing(path, ARG_CURATE_ENRICHMENT)?;
        }
        Ok(())
    }
}

impl TryFrom<CurateArgs> for CurateConfig {
    type Error = CliError;

    fn try_from(args: CurateArgs) -> Result<Self, Self::Error> {
        let records_path = args.records_path.ok_or(CliError::MissingArgument {
            field: ARG_CURATE_RECORDS,
            env: ENV_CURATE_RECORDS,
        })?;

        let defaults = CurationConfig::default();
        let min_reviews = args.min_reviews.unwrap_or(defaults.filter.min_reviews);
        let filter = match args.relevance_types {
            Some(types) => QualityFilter::new(min_reviews, types),
            None => QualityFilter {
                min_reviews,
                ..defaults.filter
            },
        };
        let default_weights = defaults.scoring.weights;
        let scoring = ScoreConfig {
            weights: ScoreWeights {
                rating: args.rating_weight.unwrap_or(default_weights.rating),
                reviews: args.review_weight.unwrap_or(default_weights.reviews),
                editorial: args.editorial_weight.unwrap_or(default_weights.editorial),
            },
            review_saturation: args
                .review_saturation
                .unwrap_or(defaults.scoring.review_saturation),
        };
        let curation = CurationConfig {
            filter,
            min_score: args.min_score.unwrap_or(defaults.min_score),
            total_slots: args.total_slots.unwrap_or(defaults.total_slots),
            min_type_count: args.min_type_count.unwrap_or(defaults.min_type_count),
            scoring,
        };
        curation.validate()?;

        Ok(Self {
            records_path,
            enrichment_path: args.enrichment,
            output: args.output,
            per_city: args.per_city,
            curation,
        })
    }
}

pub(crate) fn run_curate(args: CurateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_curate_with(args, &mut stdout)
}

pub(crate) fn run_curate_with(args: CurateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_curate_config(args)?;
    let curated = execute_curate(&config)?;
    emit_json(&curated, config.output.as_deref(), writer)
}

fn resolve_curate_config(args: CurateArgs) -> Result<CurateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// JSON document written by `wayfare curate`.
///
/// `wayfare route` reads the `pois` table back and ignores the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CurateOutput {
    /// Selected POIs; with `--per-city`, city by city in ascending name order.
    pub(crate) pois: Vec<ScoredPoi>,
    /// Drop counts from every stage, summed over cities.
    pub(crate) report: CurationReport,
}

fn execute_curate(config: &CurateConfig) -> Result<CurateOutput, CliError> {
    let records = load_records(&config.records_path)?;
    let enrichment = config
        .enrichment_path
        .as_deref()
        .map(load_records)
        .transpose()?;

    let curation = config.curation.clone();
    let output = if config.per_city {
        let cities = curate_by_city(&records, enrichment.as_deref(), curation)?;
        let report = cities.report;
        CurateOutput {
            pois: cities.into_pois(),
            report,
        }
    } else {
        let curated = curate(&records, enrichment.as_deref(), curation)?;
        CurateOutput {
            pois: curated.pois,
            report: curated.report,
        }
    };
    Ok(output)
}

/// Loads a JSON array of collected records from disk.
pub(crate) fn load_records(path: &Utf8Path) -> Result<Vec<RawRecord>, CliError> {
    load_json(path)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CurateConfig, CliError> {
    let merged = CurateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CurateConfig::try_from(merged)
}
