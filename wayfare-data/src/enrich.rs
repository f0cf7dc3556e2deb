//! Merge place-detail enrichment into normalized points of interest.

use std::collections::HashMap;

use log::{info, warn};
use wayfare_core::PointOfInterest;

use crate::raw::{
    DISPLAY_NAME, EDITORIAL_SUMMARY, GOOD_FOR_CHILDREN, GOOD_FOR_GROUPS, MAPS_ID, PRIMARY_TYPE,
};
use crate::{MalformedRecord, RawRecord};

/// Place-detail attributes fetched for one POI.
///
/// A failed or empty detail lookup is still represented by a record whose
/// optional fields are all `None`, so that the POI survives the merge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnrichmentRecord {
    /// Provider identifier the enrichment belongs to.
    pub maps_id: String,
    /// Localised display name.
    pub display_name: Option<String>,
    /// Whether the place suits groups.
    pub good_for_groups: Option<bool>,
    /// Whether the place suits children.
    pub good_for_children: Option<bool>,
    /// Primary type reported by the detail lookup.
    pub primary_type: Option<String>,
    /// Editorial summary text.
    pub editorial_summary: Option<String>,
}

impl EnrichmentRecord {
    /// Create an empty enrichment for `maps_id`.
    #[must_use]
    pub fn new(maps_id: impl Into<String>) -> Self {
        Self {
            maps_id: maps_id.into(),
            ..Self::default()
        }
    }

    /// Read an enrichment record from raw collector output.
    ///
    /// # Errors
    /// Returns [`MalformedRecord::NotAnObject`] for non-object input and
    /// [`MalformedRecord::MissingField`] when `maps_id` is absent.
    pub fn from_raw(record: &RawRecord) -> Result<Self, MalformedRecord> {
        record.ensure_object()?;
        let maps_id = record
            .text(MAPS_ID)
            .ok_or(MalformedRecord::MissingField { field: MAPS_ID })?;
        Ok(Self {
            maps_id,
            display_name: record.text(DISPLAY_NAME),
            good_for_groups: record.flag(GOOD_FOR_GROUPS),
            good_for_children: record.flag(GOOD_FOR_CHILDREN),
            primary_type: record.text(PRIMARY_TYPE),
            editorial_summary: record.text(EDITORIAL_SUMMARY),
        })
    }

    fn apply(self, poi: &mut PointOfInterest) {
        if let Some(primary) = self.primary_type {
            poi.categories.set_primary(&primary);
        }
        if poi.name.trim().is_empty() {
            if let Some(name) = self.display_name {
                poi.name = name;
            }
        }
        if self.good_for_groups.is_some() {
            poi.good_for_groups = self.good_for_groups;
        }
        if self.good_for_children.is_some() {
            poi.good_for_children = self.good_for_children;
        }
        if self.editorial_summary.is_some() {
            poi.editorial_summary = self.editorial_summary;
        }
    }
}

/// Output of [`parse_enrichment`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedEnrichment {
    /// Usable enrichment records in input order.
    pub records: Vec<EnrichmentRecord>,
    /// Records skipped because they were not objects or lacked `maps_id`.
    pub skipped: usize,
}

/// Parse a batch of enrichment records, skipping and counting those without
/// an identifier.
#[must_use]
pub fn parse_enrichment<'a, I>(records: I) -> ParsedEnrichment
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut parsed = ParsedEnrichment::default();
    for (index, record) in records.into_iter().enumerate() {
        match EnrichmentRecord::from_raw(record) {
            Ok(enrichment) => parsed.records.push(enrichment),
            Err(err) => {
                warn!("Skipping enrichment record {index}: {err}");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

/// Output of [`merge_enrichment`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enriched {
    /// POIs that had an enrichment record, in input order.
    pub pois: Vec<PointOfInterest>,
    /// POIs dropped for lack of an enrichment record.
    pub unmatched: usize,
}

/// Inner-join `pois` with `enrichment` on the provider identifier.
///
/// When several enrichment records share an identifier the first one wins.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::{Categories, PointOfInterest};
/// use wayfare_data::{EnrichmentRecord, merge_enrichment};
///
/// let poi = PointOfInterest::new("a", Coord { x: 9.19, y: 45.46 }, Categories::from_types(["point_of_interest"]));
/// let mut detail = EnrichmentRecord::new("a");
/// detail.primary_type = Some("museum".into());
///
/// let enriched = merge_enrichment(vec![poi], vec![detail]);
/// assert_eq!(enriched.pois[0].primary_type(), "museum");
/// assert_eq!(enriched.unmatched, 0);
/// ```
#[must_use]
pub fn merge_enrichment(
    pois: Vec<PointOfInterest>,
    enrichment: Vec<EnrichmentRecord>,
) -> Enriched {
    let mut by_id: HashMap<String, EnrichmentRecord> = HashMap::with_capacity(enrichment.len());
    for record in enrichment {
        by_id.entry(record.maps_id.clone()).or_insert(record);
    }

    let mut enriched = Enriched::default();
    for mut poi in pois {
        match by_id.remove(&poi.id) {
            Some(detail) => {
                detail.apply(&mut poi);
                enriched.pois.push(poi);
            }
            None => {
                warn!("Dropping {}: no enrichment record", poi.id);
                enriched.unmatched += 1;
            }
        }
    }
    info!(
        "Merged enrichment into {} POIs ({} unmatched)",
        enriched.pois.len(),
        enriched.unmatched
    );
    enriched
}
