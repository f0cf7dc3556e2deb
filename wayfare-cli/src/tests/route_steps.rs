//! Behaviour-driven step definitions driving the route CLI scenarios.

use super::helpers::{Workspace, walk_candidates, write_json};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayfare_core::SolveResponse;
use wayfare_solver_greedy::GreedySolverConfigError;

#[derive(Debug)]
struct RouteWorld {
    workspace: Workspace,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RouteWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn run(&self, extra: &[String]) {
        let mut argv = vec![
            "wayfare".to_owned(),
            "route".to_owned(),
            self.workspace.path("curated.json").into_string(),
        ];
        argv.extend_from_slice(extra);
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| match cli.command {
            Command::Route(args) => {
                let mut buffer = self.stdout.borrow_mut();
                crate::route::run_route_with(args, &mut *buffer)
            }
            Command::Curate(_) => panic!("expected route command"),
        });
        self.result.replace(Some(outcome));
    }

    fn response(&self) -> SolveResponse {
        let borrowed = self.result.borrow();
        match borrowed.as_ref() {
            Some(Ok(())) => {}
            other => panic!("expected success, found {other:?}"),
        }
        serde_json::from_slice(&self.stdout.borrow()).expect("output should be a route response")
    }
}

fn points(stops: usize) -> [String; 2] {
    [format!("--{ARG_ROUTE_POINTS}"), stops.to_string()]
}

fn from_origin() -> [String; 4] {
    [
        format!("--{ARG_ROUTE_START_LAT}"),
        "0.0".to_owned(),
        format!("--{ARG_ROUTE_START_LON}"),
        "0.0".to_owned(),
    ]
}

#[fixture]
fn world() -> RouteWorld {
    RouteWorld::new()
}

#[given("a curated table of three museums in {city}")]
fn curated_table(#[from(world)] world: &RouteWorld, city: String) {
    write_json(&world.workspace.path("curated.json"), &walk_candidates(&city));
}

#[when("I route {stops} stops from the origin")]
fn route_from_origin(#[from(world)] world: &RouteWorld, stops: usize) {
    world.run(&[points(stops).as_slice(), from_origin().as_slice()].concat());
}

#[when("I route {stops} stops from the median")]
fn route_from_median(#[from(world)] world: &RouteWorld, stops: usize) {
    world.run(&points(stops));
}

#[when("I route {stops} stops from the origin in {city}")]
fn route_in_city(#[from(world)] world: &RouteWorld, stops: usize, city: String) {
    let city_args = [format!("--{ARG_ROUTE_CITY}"), city];
    world.run(
        &[
            points(stops).as_slice(),
            from_origin().as_slice(),
            city_args.as_slice(),
        ]
        .concat(),
    );
}

#[when("I route with a discount strength of {strength}")]
fn route_with_discount(#[from(world)] world: &RouteWorld, strength: String) {
    let discount = [format!("--{ARG_ROUTE_DISCOUNT_STRENGTH}"), strength];
    world.run(&[points(3).as_slice(), discount.as_slice()].concat());
}

#[then("the command prints a route visiting {ids}")]
fn route_visits(#[from(world)] world: &RouteWorld, ids: String) {
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    assert_eq!(world.response().route.ids(), expected);
}

#[then("the command prints an empty route")]
fn route_is_empty(#[from(world)] world: &RouteWorld) {
    assert!(world.response().route.is_empty());
}

#[then("the command fails because the routing settings are invalid")]
fn routing_settings_invalid(#[from(world)] world: &RouteWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref() {
        Some(Err(CliError::Routing(
            GreedySolverConfigError::DiscountStrengthOutOfRange { .. },
        ))) => {}
        other => panic!("expected Routing error, found {other:?}"),
    }
}

macro_rules! register_route_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/route_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RouteWorld) {
            let _ = world;
        }
    };
}

register_route_scenario!(route_happy_path, "routing a curated table");
register_route_scenario!(route_from_median_start, "routing from the median of the candidates");
register_route_scenario!(route_empty_city, "routing in a city without candidates");
register_route_scenario!(route_invalid_discount, "rejecting a discount strength of one");
