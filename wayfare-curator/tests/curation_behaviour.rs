//! Behavioural coverage for the curation pipeline.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use wayfare_curator::{Curation, CurationConfig, CurationConfigError, curate};
use wayfare_data::RawRecord;

#[derive(Debug, Default)]
struct CurationWorld {
    records: RefCell<Vec<RawRecord>>,
    config: RefCell<CurationConfig>,
    outcome: RefCell<Option<Result<Curation, CurationConfigError>>>,
}

impl CurationWorld {
    fn curation(&self) -> Curation {
        match self.outcome.borrow().as_ref() {
            Some(Ok(curation)) => curation.clone(),
            other => panic!("expected a successful curation, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> CurationWorld {
    CurationWorld::default()
}

#[given("{count} collected places of type {category}")]
fn given_places(count: usize, category: String, world: &CurationWorld) {
    let mut records = world.records.borrow_mut();
    for index in 0..count {
        let record = RawRecord::from_value(json!({
            "maps_id": format!("{category}-{index:02}"),
            "location_name": format!("{category} {index}"),
            "rating": 4.6,
            "reviews": 2_000,
            "lat": 41.9,
            "long": 12.5,
            "primary_type": category,
            "types": format!("{category}/tourist_attraction"),
            "business_status": "OPERATIONAL",
            "city": "Rome",
            "country": "Italy",
        }))
        .expect("object literal");
        records.push(record);
    }
}

#[given("a budget of {slots} slots")]
fn given_budget(slots: usize, world: &CurationWorld) {
    world.config.borrow_mut().total_slots = slots;
}

#[when("the places are curated")]
fn when_curated(world: &CurationWorld) {
    let outcome = curate(&world.records.borrow(), None, world.config.borrow().clone());
    world.outcome.replace(Some(outcome));
}

#[then("{category} receives {slots} slots")]
fn then_category_receives(category: String, slots: usize, world: &CurationWorld) {
    let curation = world.curation();
    let allocation = curation
        .allocations
        .iter()
        .find(|allocation| allocation.category == category)
        .expect("category should be significant");
    assert_eq!(allocation.allocated, slots);
}

#[then("{category} is not a significant category")]
fn then_not_significant(category: String, world: &CurationWorld) {
    let curation = world.curation();
    assert!(
        curation
            .allocations
            .iter()
            .all(|allocation| allocation.category != category)
    );
}

#[then("{count} slots are filled from leftovers")]
fn then_leftover(count: usize, world: &CurationWorld) {
    assert_eq!(world.curation().report.leftover_fill, count);
}

#[then("{count} places are selected")]
fn then_selected(count: usize, world: &CurationWorld) {
    assert_eq!(world.curation().pois.len(), count);
}

#[then("curation fails because no slots were requested")]
fn then_zero_slots(world: &CurationWorld) {
    assert!(matches!(
        world.outcome.borrow().as_ref(),
        Some(Err(CurationConfigError::ZeroSlots))
    ));
}

#[scenario(path = "tests/features/curation.feature", index = 0)]
fn proportional_slots(world: CurationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/curation.feature", index = 1)]
fn leftover_fill(world: CurationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/curation.feature", index = 2)]
fn zero_slot_budget(world: CurationWorld) {
    let _ = world;
}
