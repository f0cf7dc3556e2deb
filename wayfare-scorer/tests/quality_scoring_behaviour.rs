//! Behavioural coverage for the composite quality scorer.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfare_core::test_support::poi;
use wayfare_core::{MAX_SCORE, PointOfInterest, Scorer};
use wayfare_scorer::{QualityScorer, ScoreConfig, ScoreConfigError, ScoreWeights};

#[derive(Debug, Default)]
struct ScoringWorld {
    landmark: RefCell<Option<PointOfInterest>>,
    chapel: RefCell<Option<PointOfInterest>>,
    landmark_score: RefCell<f64>,
    chapel_score: RefCell<f64>,
    weights: RefCell<Option<ScoreWeights>>,
    configured: RefCell<Option<Result<QualityScorer, ScoreConfigError>>>,
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::default()
}

fn place(id: &str, rating: Option<f64>, reviews: Option<u32>) -> PointOfInterest {
    let mut place = poi(id, 45.4642, 9.19, "tourist_attraction");
    place.rating = rating;
    place.review_count = reviews;
    place
}

#[given("a landmark rated {rating} with {reviews} reviews and an editorial summary")]
fn given_landmark(rating: f64, reviews: u32, world: &ScoringWorld) {
    let landmark = place("landmark", Some(rating), Some(reviews))
        .with_editorial_summary("A celebrated landmark.");
    world.landmark.replace(Some(landmark));
}

#[given("a chapel rated {rating} with {reviews} reviews")]
fn given_chapel(rating: f64, reviews: u32, world: &ScoringWorld) {
    world
        .chapel
        .replace(Some(place("chapel", Some(rating), Some(reviews))));
}

#[given("a landmark with no rating and no reviews")]
fn given_bare_landmark(world: &ScoringWorld) {
    world.landmark.replace(Some(place("landmark", None, None)));
}

#[given("score weights of {rating}, {reviews} and {editorial}")]
fn given_weights(rating: f64, reviews: f64, editorial: f64, world: &ScoringWorld) {
    world.weights.replace(Some(ScoreWeights {
        rating,
        reviews,
        editorial,
    }));
}

fn score(place: &RefCell<Option<PointOfInterest>>) -> f64 {
    let borrowed = place.borrow();
    let target = borrowed.as_ref().expect("place should be declared");
    QualityScorer::default().score(target)
}

#[when("both places are scored with the default weights")]
fn when_both_scored(world: &ScoringWorld) {
    world.landmark_score.replace(score(&world.landmark));
    world.chapel_score.replace(score(&world.chapel));
}

#[when("the landmark is scored with the default weights")]
fn when_landmark_scored(world: &ScoringWorld) {
    world.landmark_score.replace(score(&world.landmark));
}

#[when("the scorer is configured")]
fn when_configured(world: &ScoringWorld) {
    let weights = world.weights.borrow().expect("weights should be declared");
    let config = ScoreConfig {
        weights,
        ..ScoreConfig::default()
    };
    world.configured.replace(Some(QualityScorer::new(config)));
}

#[then("the landmark scores higher than the chapel")]
fn then_landmark_wins(world: &ScoringWorld) {
    assert!(*world.landmark_score.borrow() > *world.chapel_score.borrow());
}

#[then("both scores lie between 0 and 5")]
fn then_scores_bounded(world: &ScoringWorld) {
    for score in [*world.landmark_score.borrow(), *world.chapel_score.borrow()] {
        assert!((0.0..=MAX_SCORE).contains(&score), "score {score} out of range");
    }
}

#[then("the landmark's score is {expected}")]
fn then_landmark_scores(expected: f64, world: &ScoringWorld) {
    assert_eq!(*world.landmark_score.borrow(), expected);
}

#[then("configuration fails with invalid weights")]
fn then_invalid_weights(world: &ScoringWorld) {
    let outcome = world.configured.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(ScoreConfigError::InvalidWeights { .. }))
    ));
}

#[scenario(path = "tests/features/quality_scoring.feature", index = 0)]
fn landmark_outscores_chapel(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/quality_scoring.feature", index = 1)]
fn unrated_place_scores_nothing(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/quality_scoring.feature", index = 2)]
fn zero_weights_rejected(world: ScoringWorld) {
    let _ = world;
}
