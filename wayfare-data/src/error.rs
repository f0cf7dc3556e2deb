//! Errors raised while normalizing collector records.

use thiserror::Error;

/// A raw record that cannot become a point of interest.
///
/// These are recovered locally: the record is dropped, logged, and counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedRecord {
    /// The batch element was not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind of the element.
        found: &'static str,
    },
    /// A required field was absent or blank.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Name of the missing column.
        field: &'static str,
    },
    /// A field was present but could not be parsed as its declared type.
    #[error("field `{field}` has unparsable value {value:?}")]
    InvalidField {
        /// Name of the offending column.
        field: &'static str,
        /// Raw value as found in the record.
        value: String,
    },
    /// The coordinate parsed but lies outside WGS84 bounds.
    #[error("coordinate ({lat}, {long}) is outside WGS84 bounds")]
    LocationOutOfRange {
        /// Parsed latitude.
        lat: f64,
        /// Parsed longitude.
        long: f64,
    },
}
