//! Points of interest collected from a map-search provider.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use geo::Coord;

/// Category assigned when a record carries neither a primary type nor any
/// type tags.
///
/// The balancer never treats this group as a significant category.
pub const UNCLASSIFIED: &str = "unclassified";

/// Operating state reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BusinessStatus {
    /// Open for business.
    Operational,
    /// Closed for a limited period.
    ClosedTemporarily,
    /// Closed for good.
    ClosedPermanently,
    /// The provider did not report a state.
    #[default]
    Unspecified,
}

impl BusinessStatus {
    /// Return the provider's wire name for the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "OPERATIONAL",
            Self::ClosedTemporarily => "CLOSED_TEMPORARILY",
            Self::ClosedPermanently => "CLOSED_PERMANENTLY",
            Self::Unspecified => "BUSINESS_STATUS_UNSPECIFIED",
        }
    }

    /// Report whether the place is closed, temporarily or permanently.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::ClosedTemporarily | Self::ClosedPermanently)
    }

    /// Parse a provider status, mapping anything unrecognised to
    /// [`BusinessStatus::Unspecified`].
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::BusinessStatus;
    ///
    /// assert_eq!(BusinessStatus::parse_lenient("operational"), BusinessStatus::Operational);
    /// assert_eq!(BusinessStatus::parse_lenient("bogus"), BusinessStatus::Unspecified);
    /// ```
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for BusinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPERATIONAL" => Ok(Self::Operational),
            "CLOSED_TEMPORARILY" => Ok(Self::ClosedTemporarily),
            "CLOSED_PERMANENTLY" | "CLOSED" => Ok(Self::ClosedPermanently),
            "BUSINESS_STATUS_UNSPECIFIED" | "UNSPECIFIED" | "" => Ok(Self::Unspecified),
            _ => Err(format!("unknown business status '{s}'")),
        }
    }
}

/// Category membership of a point of interest.
///
/// Every POI has exactly one primary type, used for category balancing, and
/// an auxiliary set of type tags. The primary type is always a member of the
/// tag set.
///
/// # Examples
/// ```
/// use wayfare_core::Categories;
///
/// let categories = Categories::new("museum", ["tourist_attraction"]);
/// assert_eq!(categories.primary(), "museum");
/// assert!(categories.contains("museum"));
/// assert!(categories.contains("tourist_attraction"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    primary: String,
    types: BTreeSet<String>,
}

impl Categories {
    /// Build categories from a primary type and additional tags.
    ///
    /// Blank tags are ignored. A blank primary type falls back to the first
    /// tag in lexical order, then to [`UNCLASSIFIED`].
    pub fn new<I, S>(primary: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tags: BTreeSet<String> = types
            .into_iter()
            .map(|tag| tag.into().trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect();
        let primary = primary.into().trim().to_owned();
        let primary = if primary.is_empty() {
            tags.first()
                .cloned()
                .unwrap_or_else(|| UNCLASSIFIED.to_owned())
        } else {
            primary
        };
        tags.insert(primary.clone());
        Self {
            primary,
            types: tags,
        }
    }

    /// Build categories from tags alone, using the first tag as primary.
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = types.into_iter().map(Into::into).collect();
        let primary = tags
            .iter()
            .map(|tag| tag.trim())
            .find(|tag| !tag.is_empty())
            .unwrap_or_default()
            .to_owned();
        Self::new(primary, tags)
    }

    /// The canonical category.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// All type tags, including the primary type.
    pub const fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    /// Report whether `tag` is one of the POI's types.
    pub fn contains(&self, tag: &str) -> bool {
        self.types.contains(tag)
    }

    /// Report whether the POI fell back to [`UNCLASSIFIED`].
    pub fn is_unclassified(&self) -> bool {
        self.primary == UNCLASSIFIED
    }

    /// Replace the primary type, keeping the previous tags.
    ///
    /// Blank replacements leave the categories untouched.
    pub fn set_primary(&mut self, primary: &str) {
        let primary = primary.trim();
        if primary.is_empty() {
            return;
        }
        if self.is_unclassified() {
            self.types.remove(UNCLASSIFIED);
        }
        self.primary = primary.to_owned();
        self.types.insert(self.primary.clone());
    }
}

/// A place worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::{Categories, PointOfInterest};
///
/// let poi = PointOfInterest::new(
///     "ChIJ1",
///     Coord { x: 12.4924, y: 41.8902 },
///     Categories::new("historical_landmark", ["tourist_attraction"]),
/// )
/// .with_name("Colosseum")
/// .with_rating(4.7)
/// .with_review_count(350_000);
///
/// assert_eq!(poi.id, "ChIJ1");
/// assert_eq!(poi.latitude(), 41.8902);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "crate::record::PoiRecord", try_from = "crate::record::PoiRecord")
)]
pub struct PointOfInterest {
    /// Stable provider identifier.
    pub id: String,
    /// Display name; may be empty.
    pub name: String,
    /// Average rating in `1.0..=5.0`.
    pub rating: Option<f64>,
    /// Number of user reviews.
    pub review_count: Option<u32>,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Primary type and auxiliary type tags.
    pub categories: Categories,
    /// Operating state.
    pub business_status: BusinessStatus,
    /// Whether the place suits groups, when known.
    pub good_for_groups: Option<bool>,
    /// Whether the place suits children, when known.
    pub good_for_children: Option<bool>,
    /// Short provider-written description.
    pub editorial_summary: Option<String>,
    /// City the record was collected for.
    pub city: String,
    /// Country the record was collected for.
    pub country: String,
}

impl PointOfInterest {
    /// Construct a `PointOfInterest` with the required fields.
    ///
    /// Optional attributes start empty and the status is
    /// [`BusinessStatus::Unspecified`].
    pub fn new(id: impl Into<String>, location: Coord<f64>, categories: Categories) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            rating: None,
            review_count: None,
            location,
            categories,
            business_status: BusinessStatus::Unspecified,
            good_for_groups: None,
            good_for_children: None,
            editorial_summary: None,
            city: String::new(),
            country: String::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the review count.
    #[must_use]
    pub const fn with_review_count(mut self, reviews: u32) -> Self {
        self.review_count = Some(reviews);
        self
    }

    /// Set the business status.
    #[must_use]
    pub const fn with_status(mut self, status: BusinessStatus) -> Self {
        self.business_status = status;
        self
    }

    /// Set the editorial summary.
    #[must_use]
    pub fn with_editorial_summary(mut self, summary: impl Into<String>) -> Self {
        self.editorial_summary = Some(summary.into());
        self
    }

    /// Set the city and country context tags.
    #[must_use]
    pub fn with_place(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = city.into();
        self.country = country.into();
        self
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// The canonical category.
    pub fn primary_type(&self) -> &str {
        self.categories.primary()
    }

    /// Report whether the editorial summary has visible content.
    pub fn has_editorial_summary(&self) -> bool {
        self.editorial_summary
            .as_deref()
            .is_some_and(|summary| !summary.trim().is_empty())
    }
}
