use crate::error::{CareError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Positioning options handed through to the device port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSettings {
    /// One-shot fix timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum acceptable age of a device-cached fix in milliseconds
    pub max_age_ms: u64,
    /// Minimum movement in meters before the watch reports a new fix
    pub distance_filter_m: f64,
    /// Watch polling interval in milliseconds
    pub watch_interval_ms: u64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            max_age_ms: 60_000,
            distance_filter_m: 10.0,
            watch_interval_ms: 5_000,
        }
    }
}

impl LocationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}

/// Behaviour of the in-memory mock data services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockSettings {
    /// Simulated transport latency in milliseconds
    pub latency_ms: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self { latency_ms: 300 }
    }
}

impl MockSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Top-level configuration for the carelink core.
///
/// There is no environment-variable or CLI layer: values come from defaults
/// or a TOML file, with absent keys falling back per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    pub location: LocationSettings,
    pub mock: MockSettings,
}

impl CareConfig {
    /// Load configuration from a TOML file, validating the result
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| CareError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let config: CareConfig = toml::from_str(&content).map_err(|e| CareError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the positioning layer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.location.timeout_ms == 0 {
            return Err(CareError::ConfigInvalid {
                key: "location.timeout_ms".to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }

        if self.location.distance_filter_m < 0.0 || !self.location.distance_filter_m.is_finite() {
            return Err(CareError::ConfigInvalid {
                key: "location.distance_filter_m".to_string(),
                reason: format!(
                    "distance filter must be a non-negative number, got {}",
                    self.location.distance_filter_m
                ),
            });
        }

        if self.location.watch_interval_ms == 0 {
            return Err(CareError::ConfigInvalid {
                key: "location.watch_interval_ms".to_string(),
                reason: "watch interval must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CareConfig::default();
        assert_eq!(config.location.timeout_ms, 15_000);
        assert_eq!(config.location.max_age_ms, 60_000);
        assert_eq!(config.location.distance_filter_m, 10.0);
        assert_eq!(config.location.watch_interval_ms, 5_000);
        assert_eq!(config.mock.latency_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[location]
timeout_ms = 8000
distance_filter_m = 25.0

[mock]
latency_ms = 50
"#
        )
        .unwrap();

        let config = CareConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.location.timeout_ms, 8000);
        assert_eq!(config.location.distance_filter_m, 25.0);
        // Absent keys fall back to defaults
        assert_eq!(config.location.max_age_ms, 60_000);
        assert_eq!(config.location.watch_interval_ms, 5_000);
        assert_eq!(config.mock.latency_ms, 50);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "location = 12").unwrap();

        let err = CareConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, CareError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = CareConfig::default();
        config.location.timeout_ms = 0;

        let err = config.validate().unwrap_err();
        match err {
            CareError::ConfigInvalid { key, .. } => assert_eq!(key, "location.timeout_ms"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_distance_filter() {
        let mut config = CareConfig::default();
        config.location.distance_filter_m = -1.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_accessors() {
        let settings = LocationSettings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(15));
        assert_eq!(settings.watch_interval(), Duration::from_secs(5));
    }
}
