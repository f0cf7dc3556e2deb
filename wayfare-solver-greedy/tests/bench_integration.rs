//! Integration test validating benchmark helpers work with `GreedySolver`.

use std::collections::HashSet;

use rstest::rstest;
use wayfare_core::Solver;
use wayfare_solver_greedy::GreedySolver;

/// Include the benchmark support module from the benches directory.
#[path = "../benches/bench_support.rs"]
mod bench_support;

use bench_support::{BENCHMARK_SEED, build_benchmark_request, generate_clustered_candidates};

#[rstest]
fn generated_candidates_are_deterministic() {
    let first = generate_clustered_candidates(20, BENCHMARK_SEED);
    let second = generate_clustered_candidates(20, BENCHMARK_SEED);
    assert_eq!(first, second);
}

#[rstest]
fn generated_candidates_have_unique_ids() {
    let candidates = generate_clustered_candidates(50, BENCHMARK_SEED);
    let ids: HashSet<&str> = candidates.iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), 50);
}

#[rstest]
#[case(50)]
#[case(150)]
fn benchmark_solve_visits_every_candidate(#[case] size: usize) {
    let solver = GreedySolver::new(generate_clustered_candidates(size, BENCHMARK_SEED));
    let response = solver
        .solve(&build_benchmark_request(size))
        .expect("benchmark request should solve");
    assert_eq!(response.route.len(), size);
    assert!(response.route.total_distance_metres() > 0.0);
}
