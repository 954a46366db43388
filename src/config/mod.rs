//! Monitoring configuration: thresholds and system rating as tunable TOML values.
//!
//! Every threshold the evaluators consult is a field here, with defaults
//! matching the documented constants in [`defaults`]. Configuration is a
//! plain value passed explicitly into each evaluator call; there is no
//! global state.
//!
//! ## Loading Order
//!
//! 1. `SOLSENSE_CONFIG` environment variable (path to TOML file)
//! 2. `solsense.toml` in the current working directory
//! 3. Built-in defaults
//!
//! A missing or malformed file never blocks evaluation: `MonitorConfig::load`
//! falls back to defaults and logs a warning.

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

// ============================================================================
// Threshold Configuration
// ============================================================================

/// Alerting thresholds consulted by the threshold evaluator.
///
/// Voltage and current thresholds are percentages of the nominal values;
/// temperature and battery thresholds are absolute. Constructed per call
/// site and handed into the evaluator; the evaluator itself never reads
/// ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Nominal panel voltage (V)
    pub nominal_voltage: f64,
    /// Nominal panel current (A)
    pub nominal_current: f64,
    /// High-severity voltage threshold (% of nominal)
    pub voltage_low_pct: f64,
    /// Critical voltage threshold (% of nominal)
    pub voltage_critical_pct: f64,
    /// High-severity current threshold (% of nominal)
    pub current_low_pct: f64,
    /// Absolute temperature alert threshold (°C)
    pub temperature_high_c: f64,
    /// Battery level for a medium-severity alert (%)
    pub battery_low_pct: f64,
    /// Battery level for a high-severity alert (%)
    pub battery_critical_pct: f64,
    /// Minutes of silence before a device counts as offline
    pub offline_after_minutes: i64,
    /// First hour of the daylight window, inclusive (site-local time)
    pub daylight_start_hour: u32,
    /// Last hour of the daylight window, inclusive (site-local time)
    pub daylight_end_hour: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            nominal_voltage: defaults::NOMINAL_VOLTAGE_V,
            nominal_current: defaults::NOMINAL_CURRENT_A,
            voltage_low_pct: defaults::VOLTAGE_LOW_PCT,
            voltage_critical_pct: defaults::VOLTAGE_CRITICAL_PCT,
            current_low_pct: defaults::CURRENT_LOW_PCT,
            temperature_high_c: defaults::TEMPERATURE_HIGH_C,
            battery_low_pct: defaults::BATTERY_LOW_PCT,
            battery_critical_pct: defaults::BATTERY_CRITICAL_PCT,
            offline_after_minutes: defaults::OFFLINE_AFTER_MINUTES,
            daylight_start_hour: defaults::DAYLIGHT_START_HOUR,
            daylight_end_hour: defaults::DAYLIGHT_END_HOUR,
        }
    }
}

impl ThresholdConfig {
    /// Absolute voltage (V) below which a high-severity alert fires.
    pub fn voltage_low_limit(&self) -> f64 {
        self.nominal_voltage * self.voltage_low_pct / 100.0
    }

    /// Absolute voltage (V) below which a critical alert fires.
    pub fn voltage_critical_limit(&self) -> f64 {
        self.nominal_voltage * self.voltage_critical_pct / 100.0
    }

    /// Absolute current (A) below which a high-severity alert fires.
    pub fn current_low_limit(&self) -> f64 {
        self.nominal_current * self.current_low_pct / 100.0
    }

    /// Whether an hour-of-day falls inside the daylight window.
    pub fn is_daylight_hour(&self, hour: u32) -> bool {
        hour >= self.daylight_start_hour && hour <= self.daylight_end_hour
    }
}

// ============================================================================
// System Rating
// ============================================================================

/// Rated capacity assumption used for expected-energy and efficiency figures.
///
/// `expected_energy_kwh = rated_power_w × peak_sun_hours / 1000`. The rating
/// is a fixed configuration value, not derived from data, so efficiency can
/// legitimately exceed 100% when output beats the assumption.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemRating {
    /// Rated array capacity (W)
    pub rated_power_w: f64,
    /// Assumed peak-sun hours per day
    pub peak_sun_hours: f64,
}

impl Default for SystemRating {
    fn default() -> Self {
        Self {
            rated_power_w: defaults::RATED_POWER_W,
            peak_sun_hours: defaults::PEAK_SUN_HOURS,
        }
    }
}

impl SystemRating {
    /// Expected daily energy yield (kWh) under the rating assumption.
    pub fn expected_energy_kwh(&self) -> f64 {
        self.rated_power_w * self.peak_sun_hours / 1000.0
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a monitoring deployment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Alerting thresholds
    pub thresholds: ThresholdConfig,
    /// System rating assumptions for efficiency reporting
    pub rating: SystemRating,
}

impl MonitorConfig {
    /// Load configuration with fallback, never failing.
    ///
    /// Searches `$SOLSENSE_CONFIG`, then `./solsense.toml`, then defaults.
    /// Parse or validation failures log a warning and fall back; a broken
    /// config file must not block evaluation.
    pub fn load() -> Self {
        let candidate = std::env::var(defaults::CONFIG_ENV_VAR)
            .ok()
            .map(std::path::PathBuf::from)
            .or_else(|| {
                let local = std::path::PathBuf::from(defaults::CONFIG_FILE_NAME);
                local.exists().then_some(local)
            });

        match candidate {
            Some(path) => match Self::from_path(&path) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded monitoring config");
                    config
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to load config, using built-in defaults"
                    );
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load and validate configuration from an explicit TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make evaluation nonsensical.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if t.nominal_voltage <= 0.0 || t.nominal_current <= 0.0 {
            return Err(ConfigError::Invalid(
                "nominal voltage and current must be positive".into(),
            ));
        }
        if t.voltage_critical_pct > t.voltage_low_pct {
            return Err(ConfigError::Invalid(format!(
                "voltage_critical_pct ({}) must not exceed voltage_low_pct ({})",
                t.voltage_critical_pct, t.voltage_low_pct
            )));
        }
        if t.daylight_start_hour > 23 || t.daylight_end_hour > 23 {
            return Err(ConfigError::Invalid(
                "daylight window hours must be 0-23".into(),
            ));
        }
        if self.rating.rated_power_w <= 0.0 || self.rating.peak_sun_hours <= 0.0 {
            return Err(ConfigError::Invalid(
                "system rating values must be positive".into(),
            ));
        }
        Ok(())
    }
}
