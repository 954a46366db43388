//! Reporting-contract rounding
//!
//! Downstream layers depend on the exact precision of serialized figures:
//! voltage 2 dp, current 3 dp, temperature 1 dp, energy 3 dp, power and
//! efficiency 2 dp, trend coefficients 4 dp. Every rounded value in the
//! crate goes through these helpers; no other module rounds.

/// Round half away from zero to `dp` decimal places.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Voltage (V), 2 decimal places.
pub fn round_voltage(v: f64) -> f64 {
    round_dp(v, 2)
}

/// Current (A), 3 decimal places.
pub fn round_current(a: f64) -> f64 {
    round_dp(a, 3)
}

/// Temperature (°C), 1 decimal place.
pub fn round_temperature(c: f64) -> f64 {
    round_dp(c, 1)
}

/// Power (W), 2 decimal places.
pub fn round_power(w: f64) -> f64 {
    round_dp(w, 2)
}

/// Energy (kWh), 3 decimal places.
pub fn round_energy(kwh: f64) -> f64 {
    round_dp(kwh, 3)
}

/// Efficiency (%), 2 decimal places.
pub fn round_efficiency(pct: f64) -> f64 {
    round_dp(pct, 2)
}

/// Trend coefficients (slope/intercept/R²), 4 decimal places.
pub fn round_trend(x: f64) -> f64 {
    round_dp(x, 4)
}
