//! Simulated positioning and geocoding for development and tests.

use crate::ports::{Position, PositionRequest, PositionSource, PositionStream, ReverseGeocoder,
    WatchRequest};
use async_trait::async_trait;
use carelink_core::{CareError, Result};
use carelink_geo::distance_km;
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Position source that replays a scripted route.
///
/// The one-shot call serves the first fix on the route; the watch replays
/// the route on the requested interval, honouring the distance filter by
/// skipping fixes that moved less than the filter since the last emitted
/// one. Arm `set_failing` to exercise `LocationUnavailable` paths.
pub struct SimulatedPositionSource {
    route: Vec<Position>,
    failing: AtomicBool,
}

impl SimulatedPositionSource {
    pub fn new(route: Vec<Position>) -> Self {
        Self { route, failing: AtomicBool::new(false) }
    }

    pub fn single(position: Position) -> Self {
        Self::new(vec![position])
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CareError::location_unavailable("simulated positioning failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl PositionSource for SimulatedPositionSource {
    async fn current_position(&self, _request: &PositionRequest) -> Result<Position> {
        self.check_available()?;
        self.route
            .first()
            .copied()
            .ok_or_else(|| CareError::location_unavailable("no scripted fixes"))
    }

    async fn watch_position(&self, request: &WatchRequest) -> Result<PositionStream> {
        self.check_available()?;

        // Distance filter applied against the last *emitted* fix
        let mut filtered: Vec<Position> = Vec::new();
        for fix in &self.route {
            let keep = match filtered.last() {
                Some(prev) => {
                    let moved_m =
                        distance_km(prev.latitude, prev.longitude, fix.latitude, fix.longitude)
                            * 1000.0;
                    moved_m >= request.distance_filter_m
                }
                None => true,
            };
            if keep {
                filtered.push(*fix);
            }
        }

        let interval = request.interval;
        let stream = futures::stream::iter(filtered)
            .then(move |fix| async move {
                tokio::time::sleep(interval).await;
                Ok(fix)
            })
            .boxed();

        Ok(stream)
    }
}

/// Geocoder resolving from a fixed coordinate table.
///
/// An entry matches when it lies within the tolerance of the queried
/// point; otherwise the lookup fails like an unreachable backend would.
pub struct FixedGeocoder {
    entries: Vec<(f64, f64, String)>,
    tolerance_km: f64,
}

impl FixedGeocoder {
    pub fn new(tolerance_km: f64) -> Self {
        Self { entries: Vec::new(), tolerance_km }
    }

    pub fn with_entry(mut self, latitude: f64, longitude: f64, address: impl Into<String>) -> Self {
        self.entries.push((latitude, longitude, address.into()));
        self
    }
}

#[async_trait]
impl ReverseGeocoder for FixedGeocoder {
    async fn address_for(&self, latitude: f64, longitude: f64) -> Result<String> {
        self.entries
            .iter()
            .find(|(lat, lon, _)| distance_km(*lat, *lon, latitude, longitude) <= self.tolerance_km)
            .map(|(_, _, address)| address.clone())
            .ok_or_else(|| {
                CareError::service_unavailable(
                    "geocoder",
                    format!("no address known near {:.5}, {:.5}", latitude, longitude),
                )
            })
    }
}

/// Geocoder that always fails; exercises the placeholder-address path
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn address_for(&self, _latitude: f64, _longitude: f64) -> Result<String> {
        Err(CareError::service_unavailable("geocoder", "offline"))
    }
}
