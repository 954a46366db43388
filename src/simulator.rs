//! Synthetic Telemetry Simulator
//!
//! Generates realistic solar telemetry for exercising the pipeline without
//! hardware. Produces a daylight power bell curve with Gaussian sensor noise
//! and optional injected fault scenarios:
//! - Voltage sag (battery/charge-controller failure)
//! - Panel outage (live voltage, zero current in daylight)
//! - Overheating (temperature climb past alert thresholds)
//!
//! Seeded and fully reproducible: the same configuration and seed always
//! yield the same sequence. Test tooling only, not part of the evaluation
//! contract.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::types::RawReading;

// ============================================================================
// Baseline Constants
// ============================================================================

/// Battery float voltage at night (V)
const BASE_NIGHT_VOLTAGE: f64 = 11.9;
/// Additional voltage under full sun (V)
const DAYTIME_VOLTAGE_BOOST: f64 = 2.2;
/// Peak panel current under full sun (A)
const PEAK_CURRENT: f64 = 5.0;
/// Ambient night temperature (°C)
const BASE_TEMPERATURE: f64 = 18.0;
/// Additional panel temperature under full sun (°C)
const DAYTIME_TEMPERATURE_RISE: f64 = 24.0;
/// First daylight hour in the solar model
const SUNRISE_HOUR: f64 = 6.0;
/// Daylight span in the solar model (hours)
const DAYLIGHT_SPAN_HOURS: f64 = 12.0;

/// Fault scenario injected into the middle third of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scenario {
    /// Clean diurnal cycle, noise only
    #[default]
    Healthy,
    /// Voltage collapses toward the critical band
    VoltageSag,
    /// Panel stops producing current while voltage stays up
    PanelOutage,
    /// Temperature climbs past the alert thresholds
    Overheat,
}

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub device_id: String,
    /// Timestamp of the first sample
    pub start: DateTime<Utc>,
    /// Spacing between samples
    pub interval: Duration,
    /// Number of samples to generate
    pub samples: usize,
    pub scenario: Scenario,
}

impl SimulatorConfig {
    /// A day of five-minute samples starting at midnight.
    pub fn one_day(device_id: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            device_id: device_id.into(),
            start,
            interval: Duration::minutes(5),
            samples: 288,
            scenario: Scenario::Healthy,
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }
}

/// Seeded telemetry generator.
#[derive(Debug)]
pub struct TelemetrySimulator {
    config: SimulatorConfig,
    rng: StdRng,
}

impl TelemetrySimulator {
    pub fn new(config: SimulatorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the configured sample sequence.
    pub fn generate(&mut self) -> Vec<RawReading> {
        let noise = Normal::new(0.0, 1.0).expect("unit normal is valid");
        let fault_window = self.fault_window();

        (0..self.config.samples)
            .map(|i| {
                let timestamp = self.config.start + self.config.interval * i as i32;
                let faulted = fault_window.contains(&i);
                self.sample(timestamp, faulted, &noise)
            })
            .collect()
    }

    /// Middle third of the run, where the scenario fault is active.
    fn fault_window(&self) -> std::ops::Range<usize> {
        if self.config.scenario == Scenario::Healthy {
            return 0..0;
        }
        let third = self.config.samples / 3;
        third..(2 * third)
    }

    fn sample(
        &mut self,
        timestamp: DateTime<Utc>,
        faulted: bool,
        noise: &Normal<f64>,
    ) -> RawReading {
        let sun = solar_fraction(timestamp);
        let jitter = |rng: &mut StdRng, scale: f64| noise.sample(rng) * scale;

        let mut voltage = BASE_NIGHT_VOLTAGE
            + DAYTIME_VOLTAGE_BOOST * sun
            + jitter(&mut self.rng, 0.05);
        let mut current = (PEAK_CURRENT * sun + jitter(&mut self.rng, 0.05)).max(0.0);
        let mut temperature =
            BASE_TEMPERATURE + DAYTIME_TEMPERATURE_RISE * sun + jitter(&mut self.rng, 0.4);

        if faulted {
            match self.config.scenario {
                Scenario::Healthy => {}
                Scenario::VoltageSag => {
                    voltage = 8.5 + jitter(&mut self.rng, 0.2);
                }
                Scenario::PanelOutage => {
                    current = 0.0;
                }
                Scenario::Overheat => {
                    temperature = 66.0 + jitter(&mut self.rng, 1.5);
                }
            }
        }

        let battery_level = (55.0 + 40.0 * sun + jitter(&mut self.rng, 1.0)).clamp(0.0, 100.0);

        RawReading {
            device_id: self.config.device_id.clone(),
            timestamp,
            voltage: Some(voltage),
            current: Some(current),
            temperature: Some(temperature),
            power: None, // derived at ingestion
            battery_level: Some(battery_level),
        }
    }
}

/// Solar output fraction for a timestamp: a half-sine between sunrise and
/// sunset, zero at night.
fn solar_fraction(timestamp: DateTime<Utc>) -> f64 {
    let hour = timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0;
    let phase = (hour - SUNRISE_HOUR) / DAYLIGHT_SPAN_HOURS;
    if !(0.0..=1.0).contains(&phase) {
        return 0.0;
    }
    (phase * std::f64::consts::PI).sin()
}
