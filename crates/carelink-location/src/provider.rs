//! The location provider.
//!
//! `RwLock`/`Mutex` guards here use `unwrap()` intentionally. Lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state.

use crate::ports::{Position, PositionRequest, PositionSource, ReverseGeocoder, WatchRequest};
use carelink_core::config::LocationSettings;
use carelink_core::models::Location;
use carelink_core::{CareError, Result};
use carelink_geo::encode_tag;
use futures::StreamExt;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Events delivered to a watch subscriber
#[derive(Debug)]
pub enum WatchEvent {
    Update(Location),
    Error(CareError),
}

/// Mediates access to the device positioning capability and maintains the
/// single current-location value.
///
/// At most one watch is active per provider; starting a new one displaces
/// the previous (last-writer-wins). One-shot fetches are not coalesced:
/// concurrent callers each trigger an independent device request.
pub struct LocationProvider<P, G> {
    source: Arc<P>,
    geocoder: Arc<G>,
    settings: LocationSettings,
    cached: Arc<RwLock<Option<Location>>>,
    watch: Mutex<Option<JoinHandle<()>>>,
}

impl<P, G> LocationProvider<P, G>
where
    P: PositionSource + 'static,
    G: ReverseGeocoder + 'static,
{
    pub fn new(source: P, geocoder: G, settings: LocationSettings) -> Self {
        Self {
            source: Arc::new(source),
            geocoder: Arc::new(geocoder),
            settings,
            cached: Arc::new(RwLock::new(None)),
            watch: Mutex::new(None),
        }
    }

    /// One-shot high-accuracy fetch.
    ///
    /// The timeout is handed to the source and also enforced here, so a
    /// source that ignores its options cannot hang the caller. Positioning
    /// failure surfaces as `LocationUnavailable` with no retry; geocoding
    /// failure is masked with the placeholder address.
    pub async fn current_location(&self) -> Result<Location> {
        let request = PositionRequest {
            high_accuracy: true,
            timeout: self.settings.timeout(),
            max_age: self.settings.max_age(),
        };

        let position =
            tokio::time::timeout(self.settings.timeout(), self.source.current_position(&request))
                .await
                .map_err(|_| {
                    CareError::location_unavailable(format!(
                        "no fix within {} ms",
                        self.settings.timeout_ms
                    ))
                })??;

        let location = resolve(self.geocoder.as_ref(), position).await;
        *self.cached.write().unwrap() = Some(location.clone());
        Ok(location)
    }

    /// Begin continuous updates, displacing any active watch first.
    ///
    /// Each device fix runs through the same build-then-geocode path as the
    /// one-shot call before being forwarded, so subscribers only ever see
    /// fully resolved records.
    pub async fn start_watching(&self) -> Result<mpsc::Receiver<WatchEvent>> {
        self.stop_watching();

        let request = WatchRequest {
            high_accuracy: true,
            distance_filter_m: self.settings.distance_filter_m,
            interval: self.settings.watch_interval(),
        };
        let mut stream = self.source.watch_position(&request).await?;

        let (tx, rx) = mpsc::channel(16);
        let geocoder = Arc::clone(&self.geocoder);
        let cached = Arc::clone(&self.cached);

        let handle = tokio::spawn(async move {
            while let Some(next) = stream.next().await {
                let event = match next {
                    Ok(position) => {
                        let location = resolve(geocoder.as_ref(), position).await;
                        *cached.write().unwrap() = Some(location.clone());
                        WatchEvent::Update(location)
                    }
                    Err(e) => WatchEvent::Error(e),
                };
                if tx.send(event).await.is_err() {
                    // Receiver dropped; nobody is listening anymore
                    break;
                }
            }
        });

        *self.watch.lock().unwrap() = Some(handle);
        Ok(rx)
    }

    /// Release the device subscription if one is active; no-op otherwise
    pub fn stop_watching(&self) {
        if let Some(handle) = self.watch.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Last resolved value, without triggering a device request
    pub fn cached_location(&self) -> Option<Location> {
        self.cached.read().unwrap().clone()
    }
}

impl<P, G> Drop for LocationProvider<P, G> {
    fn drop(&mut self) {
        if let Some(handle) = self.watch.lock().unwrap().take() {
            handle.abort();
        }
    }
}

/// Build a complete `Location` from a device fix, masking geocoder failure
/// with the coordinate-formatted placeholder address
async fn resolve<G: ReverseGeocoder + ?Sized>(geocoder: &G, position: Position) -> Location {
    let address = match geocoder.address_for(position.latitude, position.longitude).await {
        Ok(address) => address,
        Err(e) => {
            warn!(error = %e, "reverse geocoding failed, keeping placeholder address");
            placeholder_address(position.latitude, position.longitude)
        }
    };

    Location {
        latitude: position.latitude,
        longitude: position.longitude,
        tag: encode_tag(position.latitude, position.longitude),
        address,
        accuracy_m: position.accuracy_m,
        fixed_at: position.fixed_at,
    }
}

/// The address shown until (or instead of) a geocoder result
pub fn placeholder_address(latitude: f64, longitude: f64) -> String {
    format!("{:.5}, {:.5}", latitude, longitude)
}
