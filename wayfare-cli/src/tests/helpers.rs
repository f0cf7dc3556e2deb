//! Test helpers for composing CLI datasets on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};
use tempfile::TempDir;
use wayfare_core::test_support::scored;
use wayfare_core::ScoredPoi;

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn write_json(path: &Utf8Path, value: &impl serde::Serialize) {
    let payload = serde_json::to_vec_pretty(value).expect("serialise test data");
    write_utf8(path, &payload);
}

/// Split `wayfare curate` output into the curated table and its report.
pub(super) fn read_curated(payload: &[u8]) -> (Vec<ScoredPoi>, Value) {
    let mut document: Value = serde_json::from_slice(payload).expect("curate output JSON");
    let report = document
        .get_mut("report")
        .map(Value::take)
        .expect("report section");
    let pois = document
        .get_mut("pois")
        .map(Value::take)
        .expect("pois section");
    (serde_json::from_value(pois).expect("curated table"), report)
}

/// A well-reviewed attraction that survives filtering and scores above the
/// default minimum.
pub(super) fn attraction(id: &str, primary_type: &str, city: &str) -> Value {
    json!({
        "maps_id": id,
        "location_name": format!("{primary_type} {id}"),
        "rating": "4.8",
        "reviews": "2500.0",
        "lat": 45.46,
        "long": 9.19,
        "primary_type": primary_type,
        "types": format!("tourist_attraction/{primary_type}"),
        "business_status": "OPERATIONAL",
        "city": city,
        "country": "Italy",
        "editorial_summary": "Worth the detour.",
    })
}

/// `count` attractions of `primary_type` in `city`, with ids prefixed by the
/// type.
pub(super) fn attractions(count: usize, primary_type: &str, city: &str) -> Vec<Value> {
    (0..count)
        .map(|index| attraction(&format!("{primary_type}-{city}-{index}"), primary_type, city))
        .collect()
}

/// Curated candidates from the greedy walk example, tagged with `city`.
pub(super) fn walk_candidates(city: &str) -> Vec<ScoredPoi> {
    [("A", 0.0, 4.0), ("B", 1.0, 1.0), ("C", 0.5, 5.0)]
        .into_iter()
        .map(|(id, lon, score)| {
            let mut candidate = scored(id, 0.0, lon, score);
            candidate.poi.city = city.to_owned();
            candidate
        })
        .collect()
}
