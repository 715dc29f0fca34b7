//! Carelink Geo - distance math and point tagging
//!
//! Pure functions only: great-circle distance, the inclusive radius
//! predicate used by nearby-volunteer queries, and the opaque per-point
//! tag carried on `Location` records.

pub mod distance;
pub mod tag;

pub use distance::{distance_between_km, distance_km, is_within_radius};
pub use tag::encode_tag;
