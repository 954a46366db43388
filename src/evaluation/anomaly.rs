//! Anomaly Detector
//!
//! Compares a reading to the device's previous reading and flags sudden
//! changes. The three rules are independent: all are evaluated and each may
//! emit one record. Output order is fixed: voltage drop, zero current, high
//! temperature (stable, not sorted by severity).

use tracing::debug;

use crate::types::{Anomaly, AnomalyKind, AnomalySeverity, RawReading, Reading};

/// Fixed anomaly-detection thresholds.
pub mod anomaly_thresholds {
    /// Voltage drop from the previous reading that flags an anomaly (V)
    pub const VOLTAGE_DROP_MIN_V: f64 = 2.0;
    /// Voltage drop that escalates to critical (V)
    pub const VOLTAGE_DROP_CRITICAL_V: f64 = 5.0;
    /// Voltage above which a dead current channel is suspicious (V)
    pub const ZERO_CURRENT_VOLTAGE_V: f64 = 12.0;
    /// Current below this counts as "no current" (A)
    pub const ZERO_CURRENT_MAX_A: f64 = 0.1;
    /// Temperature above which an anomaly is flagged (°C)
    pub const HIGH_TEMPERATURE_MIN_C: f64 = 50.0;
    /// Temperature that escalates to critical (°C)
    pub const HIGH_TEMPERATURE_CRITICAL_C: f64 = 60.0;
}

/// Detect anomalies in `raw` against the device's previous reading.
///
/// Returns zero or more records; the reading's `is_anomaly` flag is simply
/// "this list is non-empty".
pub fn detect(raw: &RawReading, previous: Option<&Reading>) -> Vec<Anomaly> {
    use anomaly_thresholds::*;

    let mut anomalies = Vec::new();

    // Sudden voltage drop vs. previous reading
    if let (Some(v), Some(prev_v)) = (raw.voltage, previous.and_then(|p| p.voltage)) {
        let drop = prev_v - v;
        if drop > VOLTAGE_DROP_MIN_V {
            let severity = if drop > VOLTAGE_DROP_CRITICAL_V {
                AnomalySeverity::Critical
            } else {
                AnomalySeverity::Warning
            };
            anomalies.push(Anomaly {
                kind: AnomalyKind::VoltageDrop,
                severity,
                message: format!(
                    "Voltage dropped {:.2} V since previous reading ({:.2} V → {:.2} V)",
                    drop, prev_v, v
                ),
                value: v,
                previous_value: Some(prev_v),
            });
        }
    }

    // Voltage present but no current, a panel/wiring fault in daylight
    if let (Some(v), Some(c)) = (raw.voltage, raw.current) {
        if v > ZERO_CURRENT_VOLTAGE_V && c < ZERO_CURRENT_MAX_A {
            anomalies.push(Anomaly {
                kind: AnomalyKind::ZeroCurrent,
                severity: AnomalySeverity::Warning,
                message: format!(
                    "Panel at {:.2} V producing no current ({:.3} A)",
                    v, c
                ),
                value: c,
                previous_value: None,
            });
        }
    }

    // Overheating panel
    if let Some(t) = raw.temperature {
        if t > HIGH_TEMPERATURE_MIN_C {
            let severity = if t > HIGH_TEMPERATURE_CRITICAL_C {
                AnomalySeverity::Critical
            } else {
                AnomalySeverity::Warning
            };
            anomalies.push(Anomaly {
                kind: AnomalyKind::HighTemperature,
                severity,
                message: format!("Panel temperature {:.1} °C above normal band", t),
                value: t,
                previous_value: previous.and_then(|p| p.temperature),
            });
        }
    }

    if !anomalies.is_empty() {
        debug!(
            device_id = %raw.device_id,
            count = anomalies.len(),
            "Anomalies detected"
        );
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceStatus;
    use chrono::Utc;

    fn raw(voltage: Option<f64>, current: Option<f64>, temperature: Option<f64>) -> RawReading {
        RawReading {
            device_id: "panel-01".into(),
            timestamp: Utc::now(),
            voltage,
            current,
            temperature,
            power: None,
            battery_level: None,
        }
    }

    fn prior(voltage: Option<f64>, temperature: Option<f64>) -> Reading {
        Reading {
            device_id: "panel-01".into(),
            timestamp: Utc::now(),
            voltage,
            current: Some(4.0),
            temperature,
            power: None,
            battery_level: None,
            status: DeviceStatus::Normal,
            is_anomaly: false,
        }
    }

    #[test]
    fn moderate_drop_is_warning() {
        // 14.2 → 11.0 is a 3.2 V drop: flagged, but not past the 5 V critical line
        let previous = prior(Some(14.2), None);
        let anomalies = detect(&raw(Some(11.0), Some(4.0), None), Some(&previous));
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::VoltageDrop);
        assert_eq!(anomalies[0].severity, AnomalySeverity::Warning);
        assert_eq!(anomalies[0].previous_value, Some(14.2));
    }

    #[test]
    fn deep_drop_is_critical() {
        let previous = prior(Some(17.0), None);
        let anomalies = detect(&raw(Some(11.0), Some(4.0), None), Some(&previous));
        assert_eq!(anomalies[0].severity, AnomalySeverity::Critical);
    }

    #[test]
    fn small_drop_is_ignored() {
        let previous = prior(Some(12.9), None);
        let anomalies = detect(&raw(Some(11.0), Some(4.0), None), Some(&previous));
        assert!(anomalies.is_empty());
    }

    #[test]
    fn no_previous_reading_skips_drop_check() {
        let anomalies = detect(&raw(Some(11.0), Some(4.0), None), None);
        assert!(anomalies.is_empty());
    }

    #[test]
    fn zero_current_with_live_voltage() {
        let anomalies = detect(&raw(Some(13.0), Some(0.0), None), None);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::ZeroCurrent);
        assert_eq!(anomalies[0].severity, AnomalySeverity::Warning);
    }

    #[test]
    fn zero_current_needs_voltage_above_twelve() {
        let anomalies = detect(&raw(Some(11.5), Some(0.0), None), None);
        assert!(anomalies.is_empty());
    }

    #[test]
    fn temperature_escalation() {
        let warm = detect(&raw(Some(12.5), Some(4.0), Some(55.0)), None);
        assert_eq!(warm[0].severity, AnomalySeverity::Warning);

        let hot = detect(&raw(Some(12.5), Some(4.0), Some(65.0)), None);
        assert_eq!(hot[0].severity, AnomalySeverity::Critical);
    }

    #[test]
    fn rules_are_independent_and_ordered() {
        // All three fire at once, in voltage → current → temperature order
        let previous = prior(Some(20.0), Some(40.0));
        let anomalies = detect(&raw(Some(13.0), Some(0.0), Some(66.0)), Some(&previous));
        assert_eq!(anomalies.len(), 3);
        assert_eq!(anomalies[0].kind, AnomalyKind::VoltageDrop);
        assert_eq!(anomalies[1].kind, AnomalyKind::ZeroCurrent);
        assert_eq!(anomalies[2].kind, AnomalyKind::HighTemperature);
    }
}
