//! Opaque point tags.
//!
//! The encoding shifts each axis into a non-negative range, scales by one
//! million, truncates, and renders each axis in base-36, latitude first.
//! This is NOT a geohash: there is no bit interleaving and no
//! prefix-proximity property. Two points a meter apart can get entirely
//! different tags near a truncation boundary. Treat the result as an
//! opaque per-point identifier; never build spatial indexing on it.

/// Encode a point as its per-point tag
pub fn encode_tag(latitude: f64, longitude: f64) -> String {
    let lat_scaled = ((latitude + 90.0) * 1_000_000.0) as u64;
    let lon_scaled = ((longitude + 180.0) * 1_000_000.0) as u64;
    format!("{}{}", to_base36(lat_scaled), to_base36(lon_scaled))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36), "100");
    }

    #[test]
    fn test_tag_is_deterministic() {
        let a = encode_tag(39.9042, 116.4074);
        let b = encode_tag(39.9042, 116.4074);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_axis_order_matters() {
        // Latitude is rendered first; swapping axes must change the tag
        assert_ne!(encode_tag(10.0, 20.0), encode_tag(20.0, 10.0));
    }

    #[test]
    fn test_distinct_points_distinct_tags() {
        assert_ne!(encode_tag(39.9042, 116.4074), encode_tag(39.9043, 116.4074));
        assert_ne!(encode_tag(39.9042, 116.4074), encode_tag(39.9042, 116.4075));
    }

    #[test]
    fn test_origin_shift() {
        // (0, 0) shifts to (90e6, 180e6) before rendering
        let tag = encode_tag(0.0, 0.0);
        let expected = format!("{}{}", to_base36(90_000_000), to_base36(180_000_000));
        assert_eq!(tag, expected);
    }
}
