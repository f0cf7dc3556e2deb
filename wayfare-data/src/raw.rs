//! Loosely typed records as produced by the collector.
//!
//! Collector output passes through CSV and dataframe tooling, so numbers
//! frequently arrive as strings (`"4.5"`), integers as floats (`"120.0"`), and
//! missing values as empty strings or `null`. [`RawRecord`] hides those
//! differences behind typed accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::MalformedRecord;

/// Provider identifier column.
pub const MAPS_ID: &str = "maps_id";
/// Display name column.
pub const LOCATION_NAME: &str = "location_name";
/// Rating column.
pub const RATING: &str = "rating";
/// Review count column.
pub const REVIEWS: &str = "reviews";
/// Latitude column.
pub const LAT: &str = "lat";
/// Longitude column.
pub const LONG: &str = "long";
/// Primary type column.
pub const PRIMARY_TYPE: &str = "primary_type";
/// Slash-joined type tag column.
pub const TYPES: &str = "types";
/// Business status column.
pub const BUSINESS_STATUS: &str = "business_status";
/// City context column.
pub const CITY: &str = "city";
/// Country context column.
pub const COUNTRY: &str = "country";
/// Enrichment display name column.
pub const DISPLAY_NAME: &str = "display_name";
/// Enrichment group suitability column.
pub const GOOD_FOR_GROUPS: &str = "good_for_groups";
/// Enrichment child suitability column.
pub const GOOD_FOR_CHILDREN: &str = "good_for_children";
/// Enrichment summary column.
pub const EDITORIAL_SUMMARY: &str = "editorial_summary";

/// A field-name to value mapping for one collected place.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use wayfare_data::RawRecord;
///
/// let record = RawRecord::from_value(json!({"maps_id": "abc", "reviews": "120.0"}))
///     .expect("object");
/// assert_eq!(record.text("maps_id").as_deref(), Some("abc"));
/// assert_eq!(record.count("reviews"), Ok(Some(120)));
/// ```
///
/// Deserialization accepts any JSON value so that one stray element cannot
/// abort a whole batch. A non-object is kept as-is and reported by
/// [`RawRecord::ensure_object`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct RawRecord {
    fields: Map<String, Value>,
    non_object: Option<Value>,
}

impl RawRecord {
    /// Wrap an existing JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            non_object: None,
        }
    }

    /// Check that the record came from a JSON object.
    ///
    /// # Errors
    /// Returns [`MalformedRecord::NotAnObject`] naming the JSON kind found
    /// instead.
    pub fn ensure_object(&self) -> Result<(), MalformedRecord> {
        match &self.non_object {
            None => Ok(()),
            Some(value) => Err(MalformedRecord::NotAnObject {
                found: json_kind(value),
            }),
        }
    }

    /// Wrap a JSON value, returning `None` when it is not an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(fields)),
            _ => None,
        }
    }

    /// Insert or replace a field, enabling chaining.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_owned(), value.into());
        self
    }

    /// Return a field as trimmed text, treating `null` and blank strings as
    /// absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_owned(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Parse a field as a float.
    ///
    /// # Errors
    /// Returns [`MalformedRecord::InvalidField`] when the field is present but
    /// not numeric.
    pub fn float(&self, key: &'static str) -> Result<Option<f64>, MalformedRecord> {
        let parsed = match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| invalid(key, s.as_str()))?,
            ),
            Some(other) => return Err(invalid(key, &other.to_string())),
        };
        match parsed {
            Some(value) if !value.is_finite() => Err(invalid(key, &value.to_string())),
            other => Ok(other),
        }
    }

    /// Parse a field as a required float.
    ///
    /// # Errors
    /// Returns [`MalformedRecord::MissingField`] when absent and
    /// [`MalformedRecord::InvalidField`] when not numeric.
    pub fn required_float(&self, key: &'static str) -> Result<f64, MalformedRecord> {
        self.float(key)?
            .ok_or(MalformedRecord::MissingField { field: key })
    }

    /// Parse a field as a non-negative whole count.
    ///
    /// Integral floats such as `120.0` are accepted; negative values are
    /// treated as absent. Counts beyond `u32::MAX` saturate.
    ///
    /// # Errors
    /// Returns [`MalformedRecord::InvalidField`] for non-numeric or
    /// fractional values.
    pub fn count(&self, key: &'static str) -> Result<Option<u32>, MalformedRecord> {
        let Some(value) = self.float(key)? else {
            return Ok(None);
        };
        if value < 0.0 {
            return Ok(None);
        }
        if value.fract() != 0.0 {
            return Err(invalid(key, &value.to_string()));
        }
        if value >= f64::from(u32::MAX) {
            return Ok(Some(u32::MAX));
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "value is a non-negative integer below u32::MAX"
        )]
        let count = value as u32;
        Ok(Some(count))
    }

    /// Parse a field as a boolean, treating unrecognised text as absent.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.fields.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Return a list field, accepting either a JSON array or a slash-joined
    /// string.
    #[must_use]
    pub fn tags(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
            Some(Value::String(joined)) => joined
                .split('/')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::new(fields),
            other => Self {
                fields: Map::new(),
                non_object: Some(other),
            },
        }
    }
}

impl From<RawRecord> for Value {
    fn from(record: RawRecord) -> Self {
        record
            .non_object
            .unwrap_or(Self::Object(record.fields))
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid(field: &'static str, value: &str) -> MalformedRecord {
    MalformedRecord::InvalidField {
        field,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).expect("object literal")
    }

    #[rstest]
    #[case(json!(4.5), Some(4.5))]
    #[case(json!("4.5"), Some(4.5))]
    #[case(json!(" 3 "), Some(3.0))]
    #[case(json!(""), None)]
    #[case(json!(null), None)]
    fn floats_accept_numbers_and_numeric_text(#[case] raw: Value, #[case] expected: Option<f64>) {
        let record = record(json!({ "rating": raw }));
        assert_eq!(record.float(RATING), Ok(expected));
    }

    #[rstest]
    #[case(json!(null), "null")]
    #[case(json!(7), "number")]
    #[case(json!(["maps_id", "a"]), "array")]
    fn non_objects_deserialize_but_are_flagged(#[case] raw: Value, #[case] kind: &'static str) {
        let record: RawRecord = serde_json::from_value(raw.clone()).expect("any JSON value");
        assert_eq!(
            record.ensure_object(),
            Err(MalformedRecord::NotAnObject { found: kind })
        );
        assert_eq!(Value::from(record), raw);
    }

    #[rstest]
    fn objects_deserialize_as_fields() {
        let record: RawRecord =
            serde_json::from_value(json!({ "maps_id": "a" })).expect("object");
        assert_eq!(record.ensure_object(), Ok(()));
        assert_eq!(record.text(MAPS_ID).as_deref(), Some("a"));
    }

    #[rstest]
    fn non_numeric_float_is_invalid() {
        let record = record(json!({ "rating": "great" }));
        assert!(matches!(
            record.float(RATING),
            Err(MalformedRecord::InvalidField { field: RATING, .. })
        ));
    }

    #[rstest]
    fn missing_required_float_is_reported() {
        let record = record(json!({}));
        assert_eq!(
            record.required_float(LAT),
            Err(MalformedRecord::MissingField { field: LAT })
        );
    }

    #[rstest]
    #[case(json!(120), Some(120))]
    #[case(json!("120.0"), Some(120))]
    #[case(json!(-5), None)]
    #[case(json!(1e12), Some(u32::MAX))]
    fn counts_are_coerced(#[case] raw: Value, #[case] expected: Option<u32>) {
        let record = record(json!({ "reviews": raw }));
        assert_eq!(record.count(REVIEWS), Ok(expected));
    }

    #[rstest]
    fn fractional_count_is_invalid() {
        let record = record(json!({ "reviews": 12.5 }));
        assert!(record.count(REVIEWS).is_err());
    }

    #[rstest]
    #[case(json!(true), Some(true))]
    #[case(json!("False"), Some(false))]
    #[case(json!(""), None)]
    #[case(json!("maybe"), None)]
    fn flags_are_lenient(#[case] raw: Value, #[case] expected: Option<bool>) {
        let record = record(json!({ "good_for_groups": raw }));
        assert_eq!(record.flag(GOOD_FOR_GROUPS), expected);
    }

    #[rstest]
    #[case(json!("museum/ tourist_attraction /"), vec!["museum", "tourist_attraction"])]
    #[case(json!(["park", " ", "zoo"]), vec!["park", "zoo"])]
    #[case(json!(null), Vec::<&str>::new())]
    fn tags_split_slashes_and_arrays(#[case] raw: Value, #[case] expected: Vec<&str>) {
        let record = record(json!({ "types": raw }));
        assert_eq!(record.tags(TYPES), expected);
    }

    #[rstest]
    fn text_treats_blank_as_absent() {
        let record = record(json!({ "city": "  ", "country": "Italy" }));
        assert_eq!(record.text(CITY), None);
        assert_eq!(record.text(COUNTRY).as_deref(), Some("Italy"));
    }
}
