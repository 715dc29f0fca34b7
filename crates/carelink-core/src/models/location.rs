use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bare latitude/longitude pair in degrees (WGS 84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A fully resolved position fix with a human-readable address.
///
/// Immutable once built: every update replaces the whole record, so
/// consumers never observe a partially resolved state. When reverse
/// geocoding fails, `address` holds the coordinate-formatted placeholder
/// instead of an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,

    /// Opaque per-point tag. Deterministic but NOT spatially meaningful;
    /// nothing may range-query on it.
    pub tag: String,

    pub address: String,

    /// Reported fix accuracy in meters, when the source provides one
    pub accuracy_m: Option<f64>,

    pub fixed_at: DateTime<Utc>,
}

impl Location {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_round_trip() {
        let location = Location {
            latitude: 39.9042,
            longitude: 116.4074,
            tag: "2a3k8w5ekgqo".to_string(),
            address: "Chaoyang Park South Gate".to_string(),
            accuracy_m: Some(12.5),
            fixed_at: Utc::now(),
        };

        let json = serde_json::to_string(&location).unwrap();
        let parsed: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(location, parsed);
    }

    #[test]
    fn test_coordinates_accessor() {
        let location = Location {
            latitude: -8.5069,
            longitude: 115.2625,
            tag: String::new(),
            address: String::new(),
            accuracy_m: None,
            fixed_at: Utc::now(),
        };

        let coords = location.coordinates();
        assert_eq!(coords.latitude, -8.5069);
        assert_eq!(coords.longitude, 115.2625);
    }
}
