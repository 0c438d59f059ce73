//! Great-circle distance, distance backfill, and the radius filter.
//!
//! Distances use the haversine formula on the mean Earth radius, which is
//! well inside consumer GPS error at neighbourhood scale.

use geo::{Distance, Haversine, Point};

use crate::types::{Candidate, Coordinate};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Smallest radius produced by [`radius_meters_from_miles`].
pub const MIN_RADIUS_METERS: u32 = 10;

/// Great-circle distance between two coordinates, in meters.
///
/// Symmetric, and zero exactly when both coordinates are equal.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    Haversine.distance(to_point(a), to_point(b))
}

fn to_point(c: Coordinate) -> Point<f64> {
    Point::new(c.longitude, c.latitude)
}

/// Fill in a missing distance from the candidate's coordinate.
///
/// A present distance is kept as is; a candidate without a coordinate is
/// returned unchanged.
pub fn backfill_distance(candidate: Candidate, origin: Coordinate) -> Candidate {
    match (candidate.distance_meters, candidate.coordinate) {
        (None, Some(at)) => candidate.with_distance(distance_meters(origin, at)),
        _ => candidate,
    }
}

/// Whether a candidate has a known distance no greater than `radius_meters`.
pub fn within_radius(candidate: &Candidate, radius_meters: u32) -> bool {
    candidate
        .distance_meters
        .is_some_and(|d| d <= f64::from(radius_meters))
}

/// Convert a user-facing radius in miles to whole meters, floored at
/// [`MIN_RADIUS_METERS`].
///
/// Negative or non-finite input yields the floor.
pub fn radius_meters_from_miles(miles: f64) -> u32 {
    // `as` saturates: NaN and negatives become 0, huge values u32::MAX.
    let meters = (miles * METERS_PER_MILE) as u32;
    meters.max(MIN_RADIUS_METERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMES_SQUARE: Coordinate = Coordinate::new(40.7580, -73.9855);
    const EMPIRE_STATE: Coordinate = Coordinate::new(40.7484, -73.9857);
    const BRYANT_PARK: Coordinate = Coordinate::new(40.7536, -73.9832);

    #[test]
    fn zero_for_identical_points() {
        assert!(distance_meters(TIMES_SQUARE, TIMES_SQUARE).abs() < f64::EPSILON);
    }

    #[test]
    fn positive_for_distinct_points() {
        assert!(distance_meters(TIMES_SQUARE, BRYANT_PARK) > 0.0);
    }

    #[test]
    fn symmetric() {
        let ab = distance_meters(TIMES_SQUARE, EMPIRE_STATE);
        let ba = distance_meters(EMPIRE_STATE, TIMES_SQUARE);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn matches_known_distance() {
        // Times Square to the Empire State Building is about 1.07 km.
        let d = distance_meters(TIMES_SQUARE, EMPIRE_STATE);
        assert!((1_000.0..1_150.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_meters(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn triangle_inequality() {
        let direct = distance_meters(TIMES_SQUARE, EMPIRE_STATE);
        let via = distance_meters(TIMES_SQUARE, BRYANT_PARK)
            + distance_meters(BRYANT_PARK, EMPIRE_STATE);
        assert!(direct <= via + 1e-6);
    }

    #[test]
    fn monotonic_along_a_meridian() {
        let origin = Coordinate::new(40.0, -74.0);
        let distances: Vec<f64> = (1..10)
            .map(|i| distance_meters(origin, Coordinate::new(40.0 + f64::from(i) * 0.01, -74.0)))
            .collect();
        for pair in distances.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn backfill_fills_missing_distance() {
        let c = Candidate::geo_search("1", "Empire State Building", EMPIRE_STATE, None);
        let filled = backfill_distance(c, TIMES_SQUARE);
        let d = filled.distance_meters.expect("backfilled");
        assert!((d - distance_meters(TIMES_SQUARE, EMPIRE_STATE)).abs() < 1e-9);
    }

    #[test]
    fn backfill_never_replaces_present_distance() {
        let c = Candidate::geo_search("1", "x", EMPIRE_STATE, Some(5.0));
        assert_eq!(backfill_distance(c, TIMES_SQUARE).distance_meters, Some(5.0));
    }

    #[test]
    fn backfill_without_coordinate_is_noop() {
        let c = Candidate::near_coord("1", "x");
        assert!(backfill_distance(c, TIMES_SQUARE).distance_meters.is_none());
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let at = Candidate::geo_search("1", "x", TIMES_SQUARE, Some(500.0));
        let beyond = Candidate::geo_search("2", "y", TIMES_SQUARE, Some(500.5));
        assert!(within_radius(&at, 500));
        assert!(!within_radius(&beyond, 500));
    }

    #[test]
    fn radius_filter_drops_unknown_distance() {
        assert!(!within_radius(&Candidate::near_coord("1", "x"), 10_000));
    }

    #[test]
    fn outside_radius_excluded() {
        let c = Candidate::geo_search("1", "x", TIMES_SQUARE, Some(150.0));
        assert!(!within_radius(&c, 100));
    }

    #[test]
    fn miles_convert_to_meters() {
        assert_eq!(radius_meters_from_miles(0.5), 804);
        assert_eq!(radius_meters_from_miles(1.0), 1609);
    }

    #[test]
    fn tiny_radius_floored() {
        assert_eq!(radius_meters_from_miles(0.001), MIN_RADIUS_METERS);
        assert_eq!(radius_meters_from_miles(0.0), MIN_RADIUS_METERS);
        assert_eq!(radius_meters_from_miles(-3.0), MIN_RADIUS_METERS);
        assert_eq!(radius_meters_from_miles(f64::NAN), MIN_RADIUS_METERS);
    }
}
