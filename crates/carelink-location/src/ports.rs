use async_trait::async_trait;
use carelink_core::Result;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use std::time::Duration;

/// A raw device fix, before address resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub fixed_at: DateTime<Utc>,
}

/// Options for a one-shot fix
#[derive(Debug, Clone, Copy)]
pub struct PositionRequest {
    pub high_accuracy: bool,
    /// How long the device may take to produce a fix
    pub timeout: Duration,
    /// Maximum acceptable age of a device-cached fix
    pub max_age: Duration,
}

/// Options for a continuous watch
#[derive(Debug, Clone, Copy)]
pub struct WatchRequest {
    pub high_accuracy: bool,
    /// Minimum movement in meters before a new fix is reported
    pub distance_filter_m: f64,
    /// Reporting interval
    pub interval: Duration,
}

pub type PositionStream = BoxStream<'static, Result<Position>>;

/// Port over the device positioning capability
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Request a single fix honouring the request options
    async fn current_position(&self, request: &PositionRequest) -> Result<Position>;

    /// Begin continuous updates. The stream ends when the device stops
    /// reporting; dropping it releases the device subscription.
    async fn watch_position(&self, request: &WatchRequest) -> Result<PositionStream>;
}

/// Port over a reverse-geocoding capability.
///
/// Best effort: callers mask failures with a placeholder address rather
/// than failing their own operation.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn address_for(&self, latitude: f64, longitude: f64) -> Result<String>;
}
