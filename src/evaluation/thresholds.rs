//! Threshold Alert Evaluator
//!
//! Evaluates a reading against the configured thresholds and produces zero
//! or more candidate alerts. Sensor categories are independent: all matching
//! rules for one evaluation call are collected into a single ordered list
//! (voltage, current, temperature, battery, then cross-reading checks) with
//! no early exit between categories.
//!
//! Thresholds arrive as an explicit [`ThresholdConfig`] value on every call.
//! The evaluator reads no ambient state and no wall clock; the liveness
//! check takes its `now` from the caller.

use chrono::{DateTime, Timelike, Utc};
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::types::{AlertSeverity, AlertType, CandidateAlert, Reading};

/// Fixed evaluator constants (not operator-tunable).
pub mod evaluator_thresholds {
    /// Soft floor: voltage below this fraction of nominal is a medium alert
    pub const VOLTAGE_SOFT_FLOOR_RATIO: f64 = 0.8;
    /// Temperature above which a temperature alert escalates to critical (°C)
    pub const TEMPERATURE_CRITICAL_C: f64 = 70.0;
    /// Reading-to-reading voltage drop that raises a critical alert (V)
    pub const SUDDEN_VOLTAGE_DROP_V: f64 = 3.0;
    /// Reading-to-reading temperature rise that raises a high alert (°C)
    pub const SUDDEN_TEMPERATURE_RISE_C: f64 = 10.0;
}

/// Evaluate one reading against the thresholds.
///
/// `previous` enables the cross-reading checks; pass `None` for a device's
/// first reading. The reading's timestamp hour drives the daylight window,
/// so timestamps are expected in site-local time (or the window shifted to
/// match the site's offset).
pub fn evaluate(
    reading: &Reading,
    previous: Option<&Reading>,
    config: &ThresholdConfig,
) -> Vec<CandidateAlert> {
    use evaluator_thresholds::*;

    let mut alerts = Vec::new();

    // --- Voltage: percentage-of-nominal ladder, at most one alert ---
    if let Some(v) = reading.voltage {
        let critical_limit = config.voltage_critical_limit();
        let low_limit = config.voltage_low_limit();
        let soft_floor = config.nominal_voltage * VOLTAGE_SOFT_FLOOR_RATIO;

        if v < critical_limit {
            alerts.push(CandidateAlert {
                alert_type: AlertType::VoltageDrop,
                severity: AlertSeverity::Critical,
                message: format!(
                    "Voltage {:.2} V below {:.0}% of nominal ({:.2} V)",
                    v, config.voltage_critical_pct, critical_limit
                ),
                value: v,
                previous_value: None,
                threshold: Some(format!("{:.2} V", critical_limit)),
                action_required: true,
            });
        } else if v < low_limit {
            alerts.push(CandidateAlert {
                alert_type: AlertType::VoltageDrop,
                severity: AlertSeverity::High,
                message: format!(
                    "Voltage {:.2} V below {:.0}% of nominal ({:.2} V)",
                    v, config.voltage_low_pct, low_limit
                ),
                value: v,
                previous_value: None,
                threshold: Some(format!("{:.2} V", low_limit)),
                action_required: true,
            });
        } else if v < soft_floor {
            alerts.push(CandidateAlert {
                alert_type: AlertType::VoltageDrop,
                severity: AlertSeverity::Medium,
                message: format!(
                    "Voltage {:.2} V below 80% of nominal ({:.2} V)",
                    v, soft_floor
                ),
                value: v,
                previous_value: None,
                threshold: Some(format!("{:.2} V", soft_floor)),
                action_required: false,
            });
        }
    }

    // --- Current: low-current rule and daylight rule fire independently ---
    if let Some(c) = reading.current {
        let low_limit = config.current_low_limit();
        if c < low_limit {
            alerts.push(CandidateAlert {
                alert_type: AlertType::CurrentAnomaly,
                severity: AlertSeverity::High,
                message: format!(
                    "Current {:.3} A below {:.0}% of nominal ({:.3} A)",
                    c, config.current_low_pct, low_limit
                ),
                value: c,
                previous_value: None,
                threshold: Some(format!("{:.3} A", low_limit)),
                action_required: true,
            });
        }
        if c == 0.0 && config.is_daylight_hour(reading.timestamp.hour()) {
            alerts.push(CandidateAlert {
                alert_type: AlertType::PanelFault,
                severity: AlertSeverity::Medium,
                message: "No current during daylight hours".to_string(),
                value: c,
                previous_value: None,
                threshold: None,
                action_required: false,
            });
        }
    }

    // --- Temperature ---
    if let Some(t) = reading.temperature {
        if t > config.temperature_high_c {
            let severity = if t > TEMPERATURE_CRITICAL_C {
                AlertSeverity::Critical
            } else {
                AlertSeverity::High
            };
            alerts.push(CandidateAlert {
                alert_type: AlertType::TemperatureHigh,
                severity,
                message: format!(
                    "Temperature {:.1} °C above limit ({:.1} °C)",
                    t, config.temperature_high_c
                ),
                value: t,
                previous_value: None,
                threshold: Some(format!("{:.1} °C", config.temperature_high_c)),
                action_required: severity.is_notifiable(),
            });
        }
    }

    // --- Battery ---
    if let Some(b) = reading.battery_level {
        if b < config.battery_low_pct {
            let severity = if b < config.battery_critical_pct {
                AlertSeverity::High
            } else {
                AlertSeverity::Medium
            };
            alerts.push(CandidateAlert {
                alert_type: AlertType::BatteryLow,
                severity,
                message: format!(
                    "Battery at {:.0}%, below {:.0}% floor",
                    b, config.battery_low_pct
                ),
                value: b,
                previous_value: None,
                threshold: Some(format!("{:.0}%", config.battery_low_pct)),
                action_required: severity.is_notifiable(),
            });
        }
    }

    // --- Cross-reading checks ---
    if let Some(prev) = previous {
        if let (Some(v), Some(prev_v)) = (reading.voltage, prev.voltage) {
            let drop = prev_v - v;
            if drop > SUDDEN_VOLTAGE_DROP_V {
                alerts.push(CandidateAlert {
                    alert_type: AlertType::VoltageDrop,
                    severity: AlertSeverity::Critical,
                    message: format!(
                        "Sudden voltage drop of {:.2} V ({:.2} V → {:.2} V)",
                        drop, prev_v, v
                    ),
                    value: v,
                    previous_value: Some(prev_v),
                    threshold: Some(format!("{:.2} V drop", SUDDEN_VOLTAGE_DROP_V)),
                    action_required: true,
                });
            }
        }
        if let (Some(t), Some(prev_t)) = (reading.temperature, prev.temperature) {
            let rise = t - prev_t;
            if rise > SUDDEN_TEMPERATURE_RISE_C {
                alerts.push(CandidateAlert {
                    alert_type: AlertType::TemperatureHigh,
                    severity: AlertSeverity::High,
                    message: format!(
                        "Temperature rose {:.1} °C since previous reading ({:.1} °C → {:.1} °C)",
                        rise, prev_t, t
                    ),
                    value: t,
                    previous_value: Some(prev_t),
                    threshold: Some(format!("{:.1} °C rise", SUDDEN_TEMPERATURE_RISE_C)),
                    action_required: true,
                });
            }
        }
    }

    if !alerts.is_empty() {
        debug!(
            device_id = %reading.device_id,
            count = alerts.len(),
            "Threshold alerts raised"
        );
    }

    alerts
}

/// Liveness check: raise a critical alert when a device has gone silent.
///
/// Pure in the clock: the caller supplies `now`. Returns `None` while the
/// gap is inside the configured window.
pub fn check_offline(
    last_seen: DateTime<Utc>,
    now: DateTime<Utc>,
    config: &ThresholdConfig,
) -> Option<CandidateAlert> {
    let silent_minutes = (now - last_seen).num_minutes();
    if silent_minutes <= config.offline_after_minutes {
        return None;
    }
    Some(CandidateAlert {
        alert_type: AlertType::SystemOffline,
        severity: AlertSeverity::Critical,
        message: format!(
            "No readings for {} min (limit {} min)",
            silent_minutes, config.offline_after_minutes
        ),
        value: silent_minutes as f64,
        previous_value: None,
        threshold: Some(format!("{} min", config.offline_after_minutes)),
        action_required: true,
    })
}
