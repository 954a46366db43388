//! Period Summary Builder
//!
//! Single entry point composing a [`PeriodSummaryReport`] from a reading set
//! and its period bounds: full-period statistics, an hourly time series,
//! peak-hour and peak-day records, fitted trend insights, and operator
//! recommendations. Everything is recomputed from the reading set on each
//! call; there are no shared accumulators.

use chrono::{DateTime, Utc};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::analytics::buckets::{aggregate_buckets, bucket_key, BucketInterval};
use crate::analytics::energy::integrate_energy_kwh;
use crate::analytics::trend::{linear_trend, trend_direction};
use crate::config::SystemRating;
use crate::numfmt::{
    round_current, round_efficiency, round_energy, round_power, round_temperature, round_voltage,
};
use crate::types::{
    DailyStatistics, PeakDay, PeriodSummaryReport, Reading, Recommendation,
    RecommendationPriority, TimeBucket,
};

/// Fixed recommendation rule thresholds.
pub mod summary_thresholds {
    /// Efficiency below this suggests soiling or wiring loss (%)
    pub const EFFICIENCY_LOW_PCT: f64 = 70.0;
    /// Minimum voltage below this points at the battery/charge controller (V)
    pub const MIN_VOLTAGE_FLOOR_V: f64 = 11.5;
    /// Peak temperature above this suggests a ventilation problem (°C)
    pub const VENTILATION_TEMP_C: f64 = 55.0;
    /// Reading counts below this are too sparse for reliable statistics
    pub const LOW_SAMPLE_COUNT: usize = 100;
}

/// Compute full-period statistics over a reading set.
///
/// An empty set returns the all-zero [`DailyStatistics`]. Each field is
/// averaged over the readings that carry it; the efficiency denominator is
/// the rating assumption, so values above 100% mean output beat the
/// assumption, not a measurement error.
pub fn daily_statistics(readings: &[Reading], rating: &SystemRating) -> DailyStatistics {
    if readings.is_empty() {
        debug!("Empty reading set, returning zeroed statistics");
        return DailyStatistics::default();
    }

    let voltages: Vec<f64> = readings.iter().filter_map(|r| r.voltage).collect();
    let currents: Vec<f64> = readings.iter().filter_map(|r| r.current).collect();
    let temperatures: Vec<f64> = readings.iter().filter_map(|r| r.temperature).collect();
    let powers: Vec<f64> = readings.iter().filter_map(|r| r.power).collect();

    let total_energy = integrate_energy_kwh(readings);
    let efficiency = total_energy / rating.expected_energy_kwh() * 100.0;

    DailyStatistics {
        total_energy: round_energy(total_energy),
        avg_voltage: round_voltage(mean_or_zero(&voltages)),
        avg_current: round_current(mean_or_zero(&currents)),
        max_temperature: round_temperature(max_or_zero(&temperatures)),
        min_voltage: round_voltage(min_or_zero(&voltages)),
        peak_power: round_power(max_or_zero(&powers)),
        efficiency: round_efficiency(efficiency),
        data_points: readings.len(),
    }
}

/// Build the full summary report for a period.
///
/// The reading set is taken as the period's content; fetching exactly the
/// [start, end] range is the repository's job. Inverted bounds are a caller
/// bug and fail fast in debug builds.
pub fn build_period_summary(
    readings: &[Reading],
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
    rating: &SystemRating,
) -> PeriodSummaryReport {
    debug_assert!(
        period_start <= period_end,
        "period bounds inverted: {period_start} > {period_end}"
    );

    let summary = daily_statistics(readings, rating);
    let time_series = aggregate_buckets(readings, BucketInterval::Hour);
    let peak_hour = peak_hour(&time_series);
    let peak_day = peak_day(readings);
    let insights = trend_insights(&time_series);
    let recommendations = recommendations(&summary);

    debug!(
        data_points = summary.data_points,
        buckets = time_series.len(),
        recommendations = recommendations.len(),
        "Built period summary"
    );

    PeriodSummaryReport {
        period_start,
        period_end,
        summary,
        time_series,
        peak_hour,
        peak_day,
        insights,
        recommendations,
    }
}

/// Hour bucket with the highest averaged power; earliest wins ties.
fn peak_hour(time_series: &[TimeBucket]) -> Option<TimeBucket> {
    time_series
        .iter()
        .filter(|bucket| bucket.power.is_some())
        .fold(None::<&TimeBucket>, |best, bucket| match best {
            Some(b) if b.power >= bucket.power => Some(b),
            _ => Some(bucket),
        })
        .cloned()
}

/// Calendar day with the highest integrated energy; earliest wins ties.
fn peak_day(readings: &[Reading]) -> Option<PeakDay> {
    let mut days: std::collections::BTreeMap<String, Vec<Reading>> =
        std::collections::BTreeMap::new();
    for reading in readings {
        days.entry(bucket_key(reading.timestamp, BucketInterval::Day))
            .or_default()
            .push(reading.clone());
    }

    days.into_iter()
        .map(|(date, members)| PeakDay {
            date,
            energy_kwh: round_energy(integrate_energy_kwh(&members)),
        })
        .fold(None::<PeakDay>, |best, day| match best {
            Some(b) if b.energy_kwh >= day.energy_kwh => Some(b),
            _ => Some(day),
        })
}

/// Fit index-based trends over the hourly series for power and voltage.
fn trend_insights(time_series: &[TimeBucket]) -> Vec<crate::types::TrendInsight> {
    let metrics: [(&str, fn(&TimeBucket) -> Option<f64>); 2] =
        [("power", |b| b.power), ("voltage", |b| b.voltage)];

    metrics
        .iter()
        .map(|(metric, extract)| {
            let series: Vec<f64> = time_series.iter().filter_map(extract).collect();
            let trend = linear_trend(&series);
            crate::types::TrendInsight {
                metric: (*metric).to_string(),
                trend,
                direction: trend_direction(&trend),
            }
        })
        .collect()
}

/// Derive operator recommendations from the period statistics.
///
/// An empty period produces no recommendations: there is nothing to advise
/// on, and the zero-valued statistics would trip every rule.
fn recommendations(summary: &DailyStatistics) -> Vec<Recommendation> {
    use summary_thresholds::*;

    if summary.data_points == 0 {
        return Vec::new();
    }

    let mut recommendations = Vec::new();

    if summary.efficiency < EFFICIENCY_LOW_PCT {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::High,
            message: format!(
                "Efficiency at {:.2}%: inspect panels for soiling and check wiring connections",
                summary.efficiency
            ),
        });
    }
    if summary.min_voltage < MIN_VOLTAGE_FLOOR_V {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Critical,
            message: format!(
                "Voltage dipped to {:.2} V: check battery health and charge controller",
                summary.min_voltage
            ),
        });
    }
    if summary.max_temperature > VENTILATION_TEMP_C {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Medium,
            message: format!(
                "Peak temperature {:.1} °C: improve ventilation around the array",
                summary.max_temperature
            ),
        });
    }
    if summary.data_points < LOW_SAMPLE_COUNT {
        recommendations.push(Recommendation {
            priority: RecommendationPriority::Low,
            message: format!(
                "Only {} readings in period: increase sampling frequency for reliable statistics",
                summary.data_points
            ),
        });
    }

    recommendations
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        Statistics::mean(values)
    }
}

fn max_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        Statistics::max(values)
    }
}

fn min_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        Statistics::min(values)
    }
}
