//! Energy Integrator
//!
//! Trapezoidal integration of power over time. Readings are sorted by
//! timestamp (stable), each adjacent pair contributes
//! `avg(power₀, power₁) × Δt_hours`, and the W·h total is divided by 1000
//! into kWh. A reading without power contributes 0 W at its endpoint;
//! missing power flattens the trapezoid rather than poisoning the sum.

use chrono::{DateTime, Utc};

use crate::types::Reading;

/// Integrate energy (kWh) over a reading set.
///
/// Fewer than two readings integrate to 0. With power ≥ 0 the result is
/// non-negative, and densifying a span with more readings never shrinks the
/// integral below what a subset computes.
pub fn integrate_energy_kwh(readings: &[Reading]) -> f64 {
    if readings.len() < 2 {
        return 0.0;
    }

    let mut points: Vec<(DateTime<Utc>, f64)> = readings
        .iter()
        .map(|r| (r.timestamp, r.power.unwrap_or(0.0)))
        .collect();
    points.sort_by_key(|(timestamp, _)| *timestamp);

    let mut watt_hours = 0.0;
    for pair in points.windows(2) {
        let (t0, p0) = pair[0];
        let (t1, p1) = pair[1];
        let dt_hours = (t1 - t0).num_milliseconds() as f64 / 3_600_000.0;
        watt_hours += (p0 + p1) / 2.0 * dt_hours;
    }

    watt_hours / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeviceStatus;
    use chrono::{Duration, TimeZone};

    fn reading_at(minutes: i64, power: Option<f64>) -> Reading {
        let base = Utc.with_ymd_and_hms(2026, 6, 1, 6, 0, 0).unwrap();
        Reading {
            device_id: "panel-01".into(),
            timestamp: base + Duration::minutes(minutes),
            voltage: Some(12.5),
            current: None,
            temperature: None,
            power,
            battery_level: None,
            status: DeviceStatus::Normal,
            is_anomaly: false,
        }
    }

    #[test]
    fn short_inputs_integrate_to_zero() {
        assert_eq!(integrate_energy_kwh(&[]), 0.0);
        assert_eq!(integrate_energy_kwh(&[reading_at(0, Some(500.0))]), 0.0);
    }

    #[test]
    fn constant_power_over_one_hour() {
        // 1000 W held for 1 h = 1 kWh
        let readings = vec![reading_at(0, Some(1000.0)), reading_at(60, Some(1000.0))];
        let energy = integrate_energy_kwh(&readings);
        assert!((energy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_integrates_to_trapezoid_area() {
        // 0 W → 1000 W over 2 h: average 500 W × 2 h = 1 kWh
        let readings = vec![reading_at(0, Some(0.0)), reading_at(120, Some(1000.0))];
        let energy = integrate_energy_kwh(&readings);
        assert!((energy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unsorted_input_is_sorted_before_integrating() {
        let readings = vec![
            reading_at(60, Some(1000.0)),
            reading_at(0, Some(1000.0)),
            reading_at(30, Some(1000.0)),
        ];
        let energy = integrate_energy_kwh(&readings);
        assert!((energy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_power_counts_as_zero_endpoint() {
        // 1000 W → unknown over 1 h: trapezoid (1000+0)/2 × 1 h = 0.5 kWh
        let readings = vec![reading_at(0, Some(1000.0)), reading_at(60, None)];
        let energy = integrate_energy_kwh(&readings);
        assert!((energy - 0.5).abs() < 1e-9);
    }

    #[test]
    fn densifying_a_span_never_reduces_energy() {
        let sparse = vec![reading_at(0, Some(400.0)), reading_at(120, Some(400.0))];
        let dense = vec![
            reading_at(0, Some(400.0)),
            reading_at(60, Some(600.0)),
            reading_at(120, Some(400.0)),
        ];
        assert!(integrate_energy_kwh(&dense) >= integrate_energy_kwh(&sparse));
    }

    #[test]
    fn result_is_non_negative_for_non_negative_power() {
        let readings: Vec<Reading> = (0..10)
            .map(|i| reading_at(i * 15, Some((i as f64) * 37.0)))
            .collect();
        assert!(integrate_energy_kwh(&readings) >= 0.0);
    }
}
