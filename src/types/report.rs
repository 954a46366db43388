//! Aggregation and reporting types: DailyStatistics, TimeBucket, TrendResult,
//! TrendInsight, Recommendation, PeriodSummaryReport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Statistics
// ============================================================================

/// Aggregate statistics over a bounded reading set.
///
/// Recomputed fully from the reading set on every call; never incrementally
/// mutated. Field precision follows the reporting contract: voltage 2 dp,
/// current 3 dp, temperature 1 dp, energy 3 dp, power and efficiency 2 dp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistics {
    /// Integrated energy over the set (kWh, ≥ 0)
    pub total_energy: f64,
    /// Mean voltage over readings carrying a voltage sample (V)
    pub avg_voltage: f64,
    /// Mean current over readings carrying a current sample (A)
    pub avg_current: f64,
    /// Highest observed temperature (°C)
    pub max_temperature: f64,
    /// Lowest observed voltage (V)
    pub min_voltage: f64,
    /// Highest observed power (W)
    pub peak_power: f64,
    /// Energy yield as a percentage of the rated expectation; may exceed 100
    pub efficiency: f64,
    /// Number of readings in the set
    pub data_points: usize,
}

/// One aggregation interval: averages over the readings falling in a bucket.
///
/// A field average is `None` when no reading in the bucket carried that
/// field. `readings` counts voltage samples, serving as a completeness proxy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    /// Bucket key: `YYYY-MM-DD HH:00`, `YYYY-MM-DD`, or `GGGG-WVV`.
    /// Lexical ordering of keys is chronological.
    pub timestamp: String,
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub temperature: Option<f64>,
    pub power: Option<f64>,
    pub readings: usize,
}

// ============================================================================
// Trend Analysis
// ============================================================================

/// Least-squares linear fit over an index-ordered numeric sequence.
///
/// The independent variable is the array index, not wall-clock time; see
/// [`crate::analytics::linear_trend`] for why that assumption is preserved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
}

/// Qualitative direction of a fitted trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Rising => write!(f, "rising"),
            TrendDirection::Falling => write!(f, "falling"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// A fitted trend for one report metric, with its qualitative direction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendInsight {
    /// Metric the trend was fitted over (e.g. `power`, `voltage`)
    pub metric: String,
    pub trend: TrendResult,
    pub direction: TrendDirection,
}

// ============================================================================
// Recommendations
// ============================================================================

/// Priority of an operator recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl std::fmt::Display for RecommendationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationPriority::Low => write!(f, "LOW"),
            RecommendationPriority::Medium => write!(f, "MEDIUM"),
            RecommendationPriority::High => write!(f, "HIGH"),
            RecommendationPriority::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// One operator recommendation derived from period statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub message: String,
}

// ============================================================================
// Period Summary
// ============================================================================

/// Calendar day with the highest integrated energy in a period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeakDay {
    /// Day key, `YYYY-MM-DD`
    pub date: String,
    /// Integrated energy for that day (kWh, 3 dp)
    pub energy_kwh: f64,
}

/// The composed report for one period, handed to report rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummaryReport {
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    /// Full-period statistics (not bucketed)
    pub summary: DailyStatistics,
    /// Hourly time series for dashboards
    pub time_series: Vec<TimeBucket>,
    /// Hour bucket with the highest averaged power
    pub peak_hour: Option<TimeBucket>,
    /// Calendar day with the highest integrated energy
    pub peak_day: Option<PeakDay>,
    /// Fitted trends over the hourly series
    pub insights: Vec<TrendInsight>,
    /// Operator recommendations derived from the summary statistics
    pub recommendations: Vec<Recommendation>,
}
