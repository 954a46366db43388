//! Status Classifier
//!
//! Maps a single reading to a discrete health status. Rules are fixed (not
//! operator-tunable) and evaluated in a strict precedence order; the first
//! match wins. Side-effect-free.

use crate::types::DeviceStatus;

/// Fixed classification thresholds.
pub mod status_thresholds {
    /// Voltage below this is critical (V)
    pub const VOLTAGE_CRITICAL_V: f64 = 10.0;
    /// Current below this is a warning (A)
    pub const CURRENT_WARNING_A: f64 = 0.1;
    /// Temperature above this is a warning (°C)
    pub const TEMPERATURE_WARNING_C: f64 = 60.0;
}

/// Classify a reading's health from its electrical fields.
///
/// Precedence (first match wins):
/// 1. voltage absent or < 10 V → critical
/// 2. current absent or < 0.1 A → warning
/// 3. temperature present and > 60 °C → warning
/// 4. otherwise → normal
///
/// Absent voltage is treated as a critical signal: a device that reports
/// telemetry without a voltage channel cannot be assumed healthy. Never
/// returns [`DeviceStatus::Offline`]; liveness is a separate check.
pub fn classify(
    voltage: Option<f64>,
    current: Option<f64>,
    temperature: Option<f64>,
) -> DeviceStatus {
    use status_thresholds::*;

    match voltage {
        None => return DeviceStatus::Critical,
        Some(v) if v < VOLTAGE_CRITICAL_V => return DeviceStatus::Critical,
        Some(_) => {}
    }
    match current {
        None => return DeviceStatus::Warning,
        Some(c) if c < CURRENT_WARNING_A => return DeviceStatus::Warning,
        Some(_) => {}
    }
    if let Some(t) = temperature {
        if t > TEMPERATURE_WARNING_C {
            return DeviceStatus::Warning;
        }
    }
    DeviceStatus::Normal
}
