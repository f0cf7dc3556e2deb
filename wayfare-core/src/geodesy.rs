//! Great-circle helpers for WGS84 coordinates.
//!
//! Coordinates follow the `geo` convention of `x = longitude` and
//! `y = latitude`.

use geo::{Coord, Distance, Haversine, Point};

/// Haversine distance between two coordinates, in metres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::haversine_metres;
///
/// let rome = Coord { x: 12.4964, y: 41.9028 };
/// let milan = Coord { x: 9.1900, y: 45.4642 };
/// let metres = haversine_metres(rome, milan);
/// assert!((470_000.0..485_000.0).contains(&metres));
/// ```
pub fn haversine_metres(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Report whether `location` is a finite coordinate within WGS84 bounds.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::is_valid_location;
///
/// assert!(is_valid_location(Coord { x: 180.0, y: -90.0 }));
/// assert!(!is_valid_location(Coord { x: 181.0, y: 0.0 }));
/// assert!(!is_valid_location(Coord { x: f64::NAN, y: 0.0 }));
/// ```
pub fn is_valid_location(location: Coord<f64>) -> bool {
    location.x.is_finite()
        && location.y.is_finite()
        && (-180.0..=180.0).contains(&location.x)
        && (-90.0..=90.0).contains(&location.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identical_points_are_zero_apart() {
        let point = Coord { x: 9.19, y: 45.46 };
        assert!(haversine_metres(point, point).abs() < 1e-9);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = Coord { x: 28.97, y: 41.02 };
        let b = Coord { x: 27.13, y: 38.42 };
        let delta = (haversine_metres(a, b) - haversine_metres(b, a)).abs();
        assert!(delta < 1e-6);
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_111_km() {
        let metres = haversine_metres(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
        assert!((110_000.0..112_500.0).contains(&metres), "got {metres}");
    }
}
