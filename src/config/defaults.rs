//! System-wide default constants.
//!
//! Centralises the documented fallback values used when no configuration
//! file is present. Grouped by subsystem for easy discovery.

// ============================================================================
// Threshold Evaluation
// ============================================================================

/// Nominal panel voltage (V) against which percentage thresholds are computed.
pub const NOMINAL_VOLTAGE_V: f64 = 12.0;

/// Nominal panel current (A) against which percentage thresholds are computed.
pub const NOMINAL_CURRENT_A: f64 = 5.0;

/// Voltage below this percentage of nominal raises a high-severity alert (%).
pub const VOLTAGE_LOW_PCT: f64 = 20.0;

/// Voltage below this percentage of nominal raises a critical alert (%).
pub const VOLTAGE_CRITICAL_PCT: f64 = 10.0;

/// Current below this percentage of nominal raises a high-severity alert (%).
pub const CURRENT_LOW_PCT: f64 = 15.0;

/// Absolute temperature alert threshold (°C).
pub const TEMPERATURE_HIGH_C: f64 = 60.0;

/// Battery level below this raises a medium-severity alert (%).
pub const BATTERY_LOW_PCT: f64 = 20.0;

/// Battery level below this escalates the battery alert to high severity (%).
pub const BATTERY_CRITICAL_PCT: f64 = 10.0;

/// Minutes without a reading before a device is considered offline.
pub const OFFLINE_AFTER_MINUTES: i64 = 10;

/// First hour of the daylight window for the zero-current check (inclusive).
pub const DAYLIGHT_START_HOUR: u32 = 8;

/// Last hour of the daylight window for the zero-current check (inclusive).
pub const DAYLIGHT_END_HOUR: u32 = 16;

// ============================================================================
// System Rating
// ============================================================================

/// Rated array capacity (W) used for the expected-energy baseline.
///
/// A fixed assumption sized to the 12 V / 5 A nominal system, not a measured
/// capacity: efficiency figures derived from it are relative, not absolute.
pub const RATED_POWER_W: f64 = 100.0;

/// Assumed peak-sun hours per day for the expected-energy baseline.
pub const PEAK_SUN_HOURS: f64 = 5.0;

// ============================================================================
// Ingestion
// ============================================================================

/// Maximum readings a caller should hand the core in one batch.
///
/// Bounds peak memory during bulk operations (e.g. 30-day statistics).
/// Core functions accept any slice length; this cap is the documented
/// caller-side discipline.
pub const MAX_BATCH_SIZE: usize = 1000;

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable naming an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "SOLSENSE_CONFIG";

/// Config file searched in the working directory when the env var is unset.
pub const CONFIG_FILE_NAME: &str = "solsense.toml";
