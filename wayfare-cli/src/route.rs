//! Route command implementation for the Wayfare CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{ScoredPoi, SolveRequest, SolveResponse, Solver};
use wayfare_solver_greedy::{
    DEFAULT_DISCOUNT_STRENGTH, GreedySolver, GreedySolverConfig, median_start,
};

use crate::io::{emit_json, load_json, require_existing};
use crate::{
    ARG_ROUTE_CANDIDATES, ARG_ROUTE_CITY, ARG_ROUTE_DISCOUNT_STRENGTH, ARG_ROUTE_POINTS,
    ARG_ROUTE_START_LAT, ARG_ROUTE_START_LON, CliError, ENV_ROUTE_CANDIDATES, ENV_ROUTE_POINTS,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order a curated table into a walking itinerary. Each step \
                 moves to the nearest remaining POI, with distances \
                 discounted for high-scoring places. Without a start \
                 coordinate the tour begins at the median of the candidates.",
    about = "Order curated POIs into an itinerary"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct RouteArgs {
    /// Path to the output of `wayfare curate`, or a bare JSON array of
    /// scored POIs.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) candidates_path: Option<Utf8PathBuf>,
    /// Number of stops to visit.
    #[arg(long = ARG_ROUTE_POINTS, value_name = "n")]
    #[serde(default)]
    pub(crate) points: Option<usize>,
    /// Latitude of the starting point.
    #[arg(long = ARG_ROUTE_START_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the starting point.
    #[arg(long = ARG_ROUTE_START_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start_lon: Option<f64>,
    /// Only visit POIs collected for this city.
    #[arg(long = ARG_ROUTE_CITY, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// How strongly scores shorten distances, in `[0, 1)`.
    #[arg(long = ARG_ROUTE_DISCOUNT_STRENGTH, value_name = "alpha")]
    #[serde(default)]
    pub(crate) discount_strength: Option<f64>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    /// Path to the curated table.
    pub(crate) candidates_path: Utf8PathBuf,
    /// Number of stops.
    pub(crate) points: usize,
    /// Explicit start; the candidates' median when absent.
    pub(crate) start: Option<Coord<f64>>,
    /// City restriction.
    pub(crate) city: Option<String>,
    /// Validated solver settings.
    pub(crate) solver: GreedySolverConfig,
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let candidates_path = args.candidates_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_CANDIDATES,
            env: ENV_ROUTE_CANDIDATES,
        })?;
        let points = args.points.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_POINTS,
            env: ENV_ROUTE_POINTS,
        })?;
        let start = match (args.start_lat, args.start_lon) {
            (Some(lat), Some(lon)) => Some(Coord { x: lon, y: lat }),
            (None, None) => None,
            _ => return Err(CliError::IncompleteStart),
        };
        let solver = GreedySolverConfig {
            discount_strength: args
                .discount_strength
                .unwrap_or(DEFAULT_DISCOUNT_STRENGTH),
        }
        .validate()?;

        Ok(Self {
            candidates_path,
            points,
            start,
            city: args.city,
            solver,
        })
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &mut stdout)
}

pub(crate) fn run_route_with(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.candidates_path, ARG_ROUTE_CANDIDATES)?;
    let candidates = load_candidates(&config.candidates_path)?;
    let response = execute_route(&config, candidates)?;
    emit_json(&response, None, writer)
}

fn execute_route(
    config: &RouteConfig,
    candidates: Vec<ScoredPoi>,
) -> Result<SolveResponse, CliError> {
    let start = config
        .start
        .unwrap_or_else(|| default_start(&candidates, config.city.as_deref()));
    let mut request = SolveRequest::new(start, config.points);
    request.city.clone_from(&config.city);

    let solver = GreedySolver::with_config(candidates, config.solver)?;
    Ok(solver.solve(&request)?)
}

/// Median of the candidates the route may visit.
///
/// With nothing to visit the start is irrelevant, so the origin is used.
fn default_start(candidates: &[ScoredPoi], city: Option<&str>) -> Coord<f64> {
    let eligible: Vec<ScoredPoi> = candidates
        .iter()
        .filter(|candidate| city.is_none_or(|name| candidate.poi.city == name))
        .cloned()
        .collect();
    let start = median_start(&eligible).unwrap_or_else(Coord::zero);
    info!(
        "No start given; starting at the median ({}, {}) of {} candidates",
        start.y,
        start.x,
        eligible.len()
    );
    start
}

/// Curated candidates as stored on disk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandidateTable {
    /// Output of `wayfare curate`; the report is ignored.
    Curated { pois: Vec<ScoredPoi> },
    /// A bare array of scored POIs.
    Bare(Vec<ScoredPoi>),
}

/// Loads curated candidates from disk, either as written by `wayfare curate`
/// or as a bare array of scored POIs.
pub(crate) fn load_candidates(path: &Utf8Path) -> Result<Vec<ScoredPoi>, CliError> {
    let table = load_json(path)?;
    Ok(match table {
        CandidateTable::Curated { pois } | CandidateTable::Bare(pois) => pois,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
