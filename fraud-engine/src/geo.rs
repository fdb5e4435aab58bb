//! Distance and travel-speed helpers

use crate::types::GeoPoint;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Coordinate delta under which two points count as the same place
/// (~10 km; a coarse box, not geodesic)
pub const SIMILARITY_DEGREES: f64 = 0.1;

/// Great-circle distance between two points in kilometers
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Travel speed implied by covering `distance_km` in `elapsed_hours`.
/// A non-positive elapsed time with non-zero distance implies teleportation
/// and reports as infinite.
pub fn implied_speed_kmh(distance_km: f64, elapsed_hours: f64) -> f64 {
    if elapsed_hours <= 0.0 {
        if distance_km > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        distance_km / elapsed_hours
    }
}

/// Whether moving between two points in `elapsed_hours` would require
/// exceeding `max_speed_kmh`
pub fn is_impossible_travel(
    from: &GeoPoint,
    to: &GeoPoint,
    elapsed_hours: f64,
    max_speed_kmh: f64,
) -> bool {
    implied_speed_kmh(haversine_km(from, to), elapsed_hours) > max_speed_kmh
}

/// Whether two points fall inside the coarse similarity box: both
/// coordinate deltas strictly under [`SIMILARITY_DEGREES`]
pub fn is_similar_location(a: &GeoPoint, b: &GeoPoint) -> bool {
    (a.lat - b.lat).abs() < SIMILARITY_DEGREES && (a.lon - b.lon).abs() < SIMILARITY_DEGREES
}
