//! Alert and anomaly types: AlertType, AlertSeverity, CandidateAlert, Anomaly

use serde::{Deserialize, Serialize};

// ============================================================================
// Alerts
// ============================================================================

/// Category of a threshold alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Voltage below threshold, or a sudden drop between readings
    VoltageDrop,
    /// Current below threshold
    CurrentAnomaly,
    /// Temperature above threshold
    TemperatureHigh,
    /// Device silent past the liveness window
    SystemOffline,
    /// Battery level below threshold
    BatteryLow,
    /// Panel producing no current under daylight conditions
    PanelFault,
}

impl AlertType {
    /// Display unit for the alert's measured value.
    ///
    /// A fixed, exhaustive mapping: adding an alert type without a unit is
    /// a compile error.
    pub fn unit(&self) -> &'static str {
        match self {
            AlertType::VoltageDrop => "V",
            AlertType::CurrentAnomaly => "A",
            AlertType::TemperatureHigh => "°C",
            AlertType::SystemOffline => "min",
            AlertType::BatteryLow => "%",
            AlertType::PanelFault => "A",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertType::VoltageDrop => write!(f, "voltage_drop"),
            AlertType::CurrentAnomaly => write!(f, "current_anomaly"),
            AlertType::TemperatureHigh => write!(f, "temperature_high"),
            AlertType::SystemOffline => write!(f, "system_offline"),
            AlertType::BatteryLow => write!(f, "battery_low"),
            AlertType::PanelFault => write!(f, "panel_fault"),
        }
    }
}

/// Severity of a threshold alert, ordered `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    #[default]
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl AlertSeverity {
    /// Whether alerts of this severity are forwarded to the notification sink.
    pub fn is_notifiable(&self) -> bool {
        *self >= AlertSeverity::High
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Low => write!(f, "LOW"),
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// An unpersisted alert produced by threshold evaluation.
///
/// Ephemeral: consumed by the deduplicator, then handed to the persistence
/// and notification collaborators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    /// Measured value that triggered the alert, in `alert_type.unit()`
    pub value: f64,
    /// Value from the previous reading, for cross-reading alerts
    pub previous_value: Option<f64>,
    /// Human-readable description of the violated threshold
    pub threshold: Option<String>,
    pub action_required: bool,
}

// ============================================================================
// Anomalies
// ============================================================================

/// Kind of reading-to-reading anomaly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Voltage fell sharply from the previous reading
    VoltageDrop,
    /// Voltage present but no current, a panel/wiring fault in daylight
    ZeroCurrent,
    /// Temperature above the anomaly band
    HighTemperature,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyKind::VoltageDrop => write!(f, "voltage_drop"),
            AnomalyKind::ZeroCurrent => write!(f, "zero_current"),
            AnomalyKind::HighTemperature => write!(f, "high_temperature"),
        }
    }
}

/// Severity of an anomaly record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Warning = 1,
    Critical = 2,
}

/// One anomaly flagged by comparing a reading to its predecessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
    pub message: String,
    pub value: f64,
    pub previous_value: Option<f64>,
}
