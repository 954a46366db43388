//! Time-Bucket Aggregator
//!
//! Groups raw readings into fixed intervals and computes per-bucket field
//! averages. Bucket keys are derived from timestamp components and chosen so
//! lexical string order is chronological order; a `BTreeMap` keyed on them
//! therefore yields buckets already sorted ascending.
//!
//! A reading missing a field is excluded from that field's mean only, not
//! from the bucket. The bucket's `readings` count is the number of voltage
//! samples, used downstream as a completeness proxy.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::numfmt::{round_current, round_power, round_temperature, round_voltage};
use crate::types::{Reading, TimeBucket};

/// Aggregation interval selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BucketInterval {
    #[default]
    Hour,
    Day,
    Week,
}

/// Deterministic bucket key for a timestamp.
///
/// - hour: `YYYY-MM-DD HH:00`
/// - day: `YYYY-MM-DD`
/// - week: `GGGG-WVV` (ISO week-numbering year and week)
pub fn bucket_key(timestamp: DateTime<Utc>, interval: BucketInterval) -> String {
    match interval {
        BucketInterval::Hour => timestamp.format("%Y-%m-%d %H:00").to_string(),
        BucketInterval::Day => timestamp.format("%Y-%m-%d").to_string(),
        BucketInterval::Week => {
            let week = timestamp.iso_week();
            format!("{:04}-W{:02}", week.year(), week.week())
        }
    }
}

/// Group readings into interval buckets with per-field averages.
///
/// Output is sorted ascending by bucket key. Pure: a fresh vector of
/// immutable buckets per call.
pub fn aggregate_buckets(readings: &[Reading], interval: BucketInterval) -> Vec<TimeBucket> {
    let mut groups: BTreeMap<String, Vec<&Reading>> = BTreeMap::new();
    for reading in readings {
        groups
            .entry(bucket_key(reading.timestamp, interval))
            .or_default()
            .push(reading);
    }

    groups
        .into_iter()
        .map(|(key, members)| build_bucket(key, &members))
        .collect()
}

fn build_bucket(timestamp: String, members: &[&Reading]) -> TimeBucket {
    let voltages: Vec<f64> = members.iter().filter_map(|r| r.voltage).collect();
    let currents: Vec<f64> = members.iter().filter_map(|r| r.current).collect();
    let temperatures: Vec<f64> = members.iter().filter_map(|r| r.temperature).collect();
    let powers: Vec<f64> = members.iter().filter_map(|r| r.power).collect();

    TimeBucket {
        timestamp,
        voltage: mean_of(&voltages).map(round_voltage),
        current: mean_of(&currents).map(round_current),
        temperature: mean_of(&temperatures).map(round_temperature),
        power: mean_of(&powers).map(round_power),
        readings: voltages.len(),
    }
}

fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(Statistics::mean(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceStatus;
    use chrono::TimeZone;

    fn reading(hour: u32, minute: u32, voltage: Option<f64>, power: Option<f64>) -> Reading {
        Reading {
            device_id: "panel-01".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap(),
            voltage,
            current: Some(4.0),
            temperature: Some(35.0),
            power,
            battery_level: None,
            status: DeviceStatus::Normal,
            is_anomaly: false,
        }
    }

    #[test]
    fn same_hour_readings_average_into_one_bucket() {
        let readings = vec![
            reading(9, 10, Some(12.0), Some(400.0)),
            reading(9, 40, Some(13.0), Some(600.0)),
        ];
        let buckets = aggregate_buckets(&readings, BucketInterval::Hour);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].timestamp, "2026-06-01 09:00");
        assert_eq!(buckets[0].voltage, Some(12.5));
        assert_eq!(buckets[0].power, Some(500.0));
        assert_eq!(buckets[0].readings, 2);
    }

    #[test]
    fn buckets_sort_ascending_by_key() {
        let readings = vec![
            reading(14, 0, Some(12.0), None),
            reading(9, 0, Some(12.0), None),
            reading(11, 0, Some(12.0), None),
        ];
        let buckets = aggregate_buckets(&readings, BucketInterval::Hour);
        let keys: Vec<&str> = buckets.iter().map(|b| b.timestamp.as_str()).collect();
        assert_eq!(
            keys,
            vec!["2026-06-01 09:00", "2026-06-01 11:00", "2026-06-01 14:00"]
        );
    }

    #[test]
    fn missing_field_excluded_from_its_mean_only() {
        let readings = vec![
            reading(9, 0, Some(12.0), Some(300.0)),
            reading(9, 30, None, Some(500.0)),
        ];
        let buckets = aggregate_buckets(&readings, BucketInterval::Hour);
        // Voltage mean over the single present sample; power over both
        assert_eq!(buckets[0].voltage, Some(12.0));
        assert_eq!(buckets[0].power, Some(400.0));
        // readings counts voltage samples, not bucket members
        assert_eq!(buckets[0].readings, 1);
    }

    #[test]
    fn field_absent_everywhere_yields_none() {
        let readings = vec![reading(9, 0, None, None)];
        let buckets = aggregate_buckets(&readings, BucketInterval::Hour);
        assert_eq!(buckets[0].voltage, None);
        assert_eq!(buckets[0].power, None);
        assert_eq!(buckets[0].readings, 0);
    }

    #[test]
    fn day_and_week_keys() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(bucket_key(ts, BucketInterval::Day), "2026-01-01");
        // 2026-01-01 falls in ISO week 2026-W01
        assert_eq!(bucket_key(ts, BucketInterval::Week), "2026-W01");

        // ISO week-numbering year differs from the calendar year at the edges:
        // 2027-01-01 is a Friday belonging to 2026-W53
        let edge = Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(bucket_key(edge, BucketInterval::Week), "2026-W53");
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(aggregate_buckets(&[], BucketInterval::Hour).is_empty());
    }
}
