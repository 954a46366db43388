//! Telemetry reading types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discrete health status of a device at a point in time.
///
/// `Offline` is never produced by the per-reading classifier; it is set by
/// the liveness check when a device has gone silent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    #[default]
    Normal,
    Warning,
    Critical,
    Offline,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceStatus::Normal => write!(f, "normal"),
            DeviceStatus::Warning => write!(f, "warning"),
            DeviceStatus::Critical => write!(f, "critical"),
            DeviceStatus::Offline => write!(f, "offline"),
        }
    }
}

/// One telemetry sample as received from a device, before evaluation.
///
/// Every electrical field is optional: sensors drop out individually, and an
/// absent value must propagate as unknown rather than being coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    /// Device identifier (non-empty)
    pub device_id: String,
    /// Sample instant
    pub timestamp: DateTime<Utc>,
    /// Panel voltage (V), expected range 0-50
    pub voltage: Option<f64>,
    /// Panel current (A), expected range 0-30
    pub current: Option<f64>,
    /// Panel temperature (°C), expected range -20-100
    pub temperature: Option<f64>,
    /// Output power (W); derived from voltage × current when absent
    pub power: Option<f64>,
    /// Battery charge level (%), 0-100
    pub battery_level: Option<f64>,
}

impl RawReading {
    /// Convenience constructor with all sensor fields absent.
    pub fn new(device_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            device_id: device_id.into(),
            timestamp,
            voltage: None,
            current: None,
            temperature: None,
            power: None,
            battery_level: None,
        }
    }
}

/// One evaluated telemetry sample.
///
/// Created once at ingestion by [`crate::evaluation::ReadingProcessor`],
/// which derives `power`, `status`, and `is_anomaly`; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub device_id: String,
    pub timestamp: DateTime<Utc>,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub temperature: Option<f64>,
    /// Output power (W); equals voltage × current unless independently supplied
    pub power: Option<f64>,
    pub battery_level: Option<f64>,
    /// Health status classified at ingestion
    pub status: DeviceStatus,
    /// Whether any anomaly fired against the previous reading
    pub is_anomaly: bool,
}
