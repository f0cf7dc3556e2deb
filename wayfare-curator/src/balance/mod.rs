//! Proportional category balancing.
//!
//! Categories whose member count exceeds the minimum are "significant" and
//! receive slots in proportion to their size. Any slots left over are filled
//! with the best remaining POIs regardless of category.

use std::collections::BTreeMap;

use log::{debug, info};
use wayfare_core::ScoredPoi;

/// Default number of POIs to select.
pub const DEFAULT_TOTAL_SLOTS: usize = 150;

/// Default member count a category must exceed to be significant.
pub const DEFAULT_MIN_TYPE_COUNT: usize = 4;

/// Slots granted to one significant category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllocation {
    /// Primary type shared by the category's members.
    pub category: String,
    /// Number of eligible POIs in the category.
    pub available: usize,
    /// Number of POIs taken from the category before leftover fill.
    pub allocated: usize,
}

/// Output of [`balance`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalancedSelection {
    /// Selected POIs: significant categories in ascending name order, each in
    /// rank order, followed by the leftover fill in rank order.
    pub selected: Vec<ScoredPoi>,
    /// Per-category allocations for significant categories, by name.
    pub allocations: Vec<CategoryAllocation>,
    /// Number of POIs added by leftover fill.
    pub leftover_fill: usize,
}

/// Select up to `total_slots` POIs, balancing significant categories.
///
/// A category is significant when its member count exceeds `min_type_count`;
/// the unclassified group never is. Each significant category *i* of size
/// `T_i` receives `min(floor(T_i * total_slots / SUM5), T_i)` slots, where
/// `SUM5` is the combined size of all significant categories. Remaining slots
/// go to the best POIs not yet selected.
///
/// Ranking uses [`ScoredPoi::rank_cmp`] throughout. The function never fails:
/// empty input or `total_slots == 0` yields an empty selection.
///
/// # Examples
/// ```
/// use wayfare_core::test_support::scored_in;
/// use wayfare_curator::balance;
///
/// let mut pois: Vec<_> = (0..6).map(|i| scored_in(&format!("m{i}"), "museum", 4.0)).collect();
/// pois.push(scored_in("p0", "park", 4.9));
///
/// let selection = balance(pois, 4, 4);
/// assert_eq!(selection.selected.len(), 4);
/// assert_eq!(selection.allocations[0].allocated, 4);
/// assert_eq!(selection.leftover_fill, 0);
/// ```
#[must_use]
pub fn balance(
    pois: Vec<ScoredPoi>,
    total_slots: usize,
    min_type_count: usize,
) -> BalancedSelection {
    let mut groups: BTreeMap<String, Vec<ScoredPoi>> = BTreeMap::new();
    for poi in pois {
        groups
            .entry(poi.poi.primary_type().to_owned())
            .or_default()
            .push(poi);
    }
    for members in groups.values_mut() {
        members.sort_by(ScoredPoi::rank_cmp);
    }

    let significant_total: usize = groups
        .iter()
        .filter(|(category, members)| is_significant(category, members.len(), min_type_count))
        .map(|(_, members)| members.len())
        .sum();

    let mut selection = BalancedSelection::default();
    let mut leftovers = Vec::new();
    for (category, mut members) in groups {
        if !is_significant(&category, members.len(), min_type_count) {
            leftovers.append(&mut members);
            continue;
        }
        let available = members.len();
        let allocated = allocation(available, total_slots, significant_total);
        debug!("Category {category}: {allocated} of {available} POIs allocated");
        leftovers.extend(members.drain(allocated..));
        selection.selected.append(&mut members);
        selection.allocations.push(CategoryAllocation {
            category,
            available,
            allocated,
        });
    }

    let open_slots = total_slots.saturating_sub(selection.selected.len());
    leftovers.sort_by(ScoredPoi::rank_cmp);
    leftovers.truncate(open_slots);
    selection.leftover_fill = leftovers.len();
    selection.selected.append(&mut leftovers);

    info!(
        "Balanced {} significant categories into {} POIs ({} leftover fill)",
        selection.allocations.len(),
        selection.selected.len(),
        selection.leftover_fill
    );
    selection
}

fn is_significant(category: &str, members: usize, min_type_count: usize) -> bool {
    category != wayfare_core::UNCLASSIFIED && members > min_type_count
}

/// `min(floor(available * total_slots / significant_total), available)` in
/// integer arithmetic.
fn allocation(available: usize, total_slots: usize, significant_total: usize) -> usize {
    if total_slots >= significant_total {
        return available;
    }
    // total_slots < significant_total, so the quotient never exceeds
    // `available`. Overflow needs more POIs than fit in memory.
    available
        .checked_mul(total_slots)
        .and_then(|product| product.checked_div(significant_total))
        .unwrap_or(available)
}
