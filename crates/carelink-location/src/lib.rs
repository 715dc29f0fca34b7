//! Carelink Location - device positioning mediation
//!
//! Wraps an injected device positioning capability and a best-effort
//! reverse geocoder behind the `LocationProvider`, which maintains the
//! single current-location value for the rest of the system. A simulated
//! position source is provided for development and tests.

pub mod ports;
pub mod provider;
pub mod sim;

pub use ports::{Position, PositionRequest, PositionSource, ReverseGeocoder, WatchRequest};
pub use provider::{LocationProvider, WatchEvent};
pub use sim::{FixedGeocoder, OfflineGeocoder, SimulatedPositionSource};
