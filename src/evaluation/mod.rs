//! Per-reading evaluation pipeline
//!
//! The [`ReadingProcessor`] composes the single-reading stages in their data
//! flow order:
//!
//! 1. Power derivation (voltage × current when not supplied)
//! 2. Status classification
//! 3. Anomaly detection against the previous reading
//! 4. Threshold alert evaluation
//! 5. Same-batch alert deduplication
//!
//! The processor is stateless apart from its configuration: the previous
//! reading is an explicit argument, so concurrent invocations for different
//! devices are trivially safe. Persisting the reading, forwarding notifiable
//! alerts, and storing the rest are the caller's I/O.

pub mod anomaly;
pub mod dedup;
pub mod status;
pub mod thresholds;

pub use anomaly::detect as detect_anomalies;
pub use dedup::{dedup_alerts, split_notifiable};
pub use status::classify as classify_status;
pub use thresholds::{check_offline, evaluate as evaluate_thresholds};

use crate::config::ThresholdConfig;
use crate::power;
use crate::types::{Anomaly, CandidateAlert, RawReading, Reading};

/// Outcome of evaluating one raw sample.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The finalized, immutable reading (status and anomaly flag set)
    pub reading: Reading,
    /// Anomaly records, in rule order
    pub anomalies: Vec<Anomaly>,
    /// Deduplicated candidate alerts, in rule order
    pub alerts: Vec<CandidateAlert>,
}

impl Evaluation {
    /// Alerts that qualify for the notification sink (`High`/`Critical`).
    pub fn notifiable(&self) -> impl Iterator<Item = &CandidateAlert> {
        self.alerts.iter().filter(|a| a.severity.is_notifiable())
    }
}

/// Stateless evaluation pipeline over single readings.
#[derive(Debug, Clone, Default)]
pub struct ReadingProcessor {
    config: ThresholdConfig,
}

impl ReadingProcessor {
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Evaluate one raw sample against the device's previous reading.
    ///
    /// Derives power, classifies status, flags anomalies, evaluates
    /// thresholds, and deduplicates the resulting alerts. The returned
    /// [`Reading`] is final; nothing mutates it afterwards.
    pub fn process(&self, raw: RawReading, previous: Option<&Reading>) -> Evaluation {
        let power = power::resolve_power(raw.power, raw.voltage, raw.current);
        let status = status::classify(raw.voltage, raw.current, raw.temperature);
        let anomalies = anomaly::detect(&raw, previous);

        let reading = Reading {
            device_id: raw.device_id,
            timestamp: raw.timestamp,
            voltage: raw.voltage,
            current: raw.current,
            temperature: raw.temperature,
            power,
            battery_level: raw.battery_level,
            status,
            is_anomaly: !anomalies.is_empty(),
        };

        let alerts = dedup::dedup_alerts(thresholds::evaluate(&reading, previous, &self.config));

        Evaluation {
            reading,
            anomalies,
            alerts,
        }
    }
}
