//! Command-line interface for Wayfare curation and routing.
//!
//! `wayfare curate` turns a JSON array of collected records into a curated
//! table with its drop counts, and `wayfare route` orders a curated table into an itinerary.
//! Every option can also come from `WAYFARE_*` environment variables or a
//! configuration file, merged through `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod curate;
mod error;
mod io;
mod route;

pub use error::CliError;

use curate::{CurateArgs, run_curate};
use route::{RouteArgs, run_route};

const ARG_CURATE_RECORDS: &str = "records";
const ARG_CURATE_ENRICHMENT: &str = "enrichment";
const ARG_CURATE_OUTPUT: &str = "output";
const ARG_CURATE_TOTAL_SLOTS: &str = "total-slots";
const ARG_CURATE_MIN_REVIEWS: &str = "min-reviews";
const ARG_CURATE_MIN_SCORE: &str = "min-score";
const ARG_CURATE_MIN_TYPE_COUNT: &str = "min-type-count";
const ARG_CURATE_RELEVANCE_TYPE: &str = "relevance-type";
const ARG_CURATE_PER_CITY: &str = "per-city";
const ARG_CURATE_RATING_WEIGHT: &str = "rating-weight";
const ARG_CURATE_REVIEW_WEIGHT: &str = "review-weight";
const ARG_CURATE_EDITORIAL_WEIGHT: &str = "editorial-weight";
const ARG_CURATE_REVIEW_SATURATION: &str = "review-saturation";
const ENV_CURATE_RECORDS: &str = "WAYFARE_CMDS_CURATE_RECORDS_PATH";

const ARG_ROUTE_CANDIDATES: &str = "candidates";
const ARG_ROUTE_POINTS: &str = "points";
const ARG_ROUTE_START_LAT: &str = "start-lat";
const ARG_ROUTE_START_LON: &str = "start-lon";
const ARG_ROUTE_CITY: &str = "city";
const ARG_ROUTE_DISCOUNT_STRENGTH: &str = "discount-strength";
const ENV_ROUTE_CANDIDATES: &str = "WAYFARE_CMDS_ROUTE_CANDIDATES_PATH";
const ENV_ROUTE_POINTS: &str = "WAYFARE_CMDS_ROUTE_POINTS";

/// Run the Wayfare CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Curate(args) => run_curate(args),
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Curate points of interest and order them into walking itineraries",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reduce collected records to a balanced, high-quality shortlist.
    Curate(CurateArgs),
    /// Order curated POIs into a visiting sequence.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
