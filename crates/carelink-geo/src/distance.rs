use carelink_core::models::Coordinates;
use geo::{Distance, Haversine, Point};

/// Great-circle distance between two points in kilometers, haversine over
/// the mean Earth radius.
///
/// Inputs are plain degree floats; no bounds validation is performed, and
/// NaN inputs propagate. Callers must supply valid coordinates.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let a = Point::new(lon1, lat1);
    let b = Point::new(lon2, lat2);
    Haversine.distance(a, b) / 1000.0
}

/// `distance_km` over coordinate pairs
pub fn distance_between_km(a: Coordinates, b: Coordinates) -> f64 {
    distance_km(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Inclusive radius predicate: true when `target` is at most `radius_km`
/// kilometers from `center`
pub fn is_within_radius(center: Coordinates, target: Coordinates, radius_km: f64) -> bool {
    distance_between_km(center, target) <= radius_km
}
