//! Default starting point for tours without an explicit origin.

use geo::Coord;
use wayfare_core::ScoredPoi;

/// Component-wise median of the candidates' coordinates.
///
/// Even-sized sets use the mean of the two middle values. Returns `None`
/// when there are no candidates.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::test_support::scored;
/// use wayfare_solver_greedy::median_start;
///
/// let candidates = vec![
///     scored("a", 45.0, 9.0, 4.0),
///     scored("b", 45.2, 9.4, 4.0),
///     scored("c", 46.0, 9.1, 4.0),
/// ];
/// assert_eq!(median_start(&candidates), Some(Coord { x: 9.1, y: 45.2 }));
/// ```
#[must_use]
pub fn median_start(candidates: &[ScoredPoi]) -> Option<Coord<f64>> {
    let x = median(candidates.iter().map(|c| c.poi.location.x).collect())?;
    let y = median(candidates.iter().map(|c| c.poi.location.y).collect())?;
    Some(Coord { x, y })
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    let upper_index = values.len().checked_div(2)?;
    let upper = values.get(upper_index).copied()?;
    if values.len().is_multiple_of(2) {
        let lower = values.get(upper_index.checked_sub(1)?).copied()?;
        Some(lower.midpoint(upper))
    } else {
        Some(upper)
    }
}
