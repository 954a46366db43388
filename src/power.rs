//! Unit Converter / Power Model
//!
//! Derives electrical power from voltage and current. The invariant the rest
//! of the pipeline relies on: `power == voltage × current` whenever power is
//! not independently supplied by the device.

/// Derive power (W) from voltage (V) and current (A).
///
/// Returns `None` if either input is absent; power is never assumed zero.
/// Out-of-range physical values are not rejected here; range validation is a
/// boundary concern.
pub fn derive_power(voltage: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (voltage, current) {
        (Some(v), Some(c)) => Some(v * c),
        _ => None,
    }
}

/// Resolve a reading's power: keep a supplied value, derive otherwise.
pub fn resolve_power(
    supplied: Option<f64>,
    voltage: Option<f64>,
    current: Option<f64>,
) -> Option<f64> {
    supplied.or_else(|| derive_power(voltage, current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_product_when_both_present() {
        let power = derive_power(Some(12.5), Some(4.0)).unwrap();
        assert!((power - 50.0).abs() < 1e-9);
    }

    #[test]
    fn absent_input_yields_none_not_zero() {
        assert_eq!(derive_power(None, Some(4.0)), None);
        assert_eq!(derive_power(Some(12.5), None), None);
        assert_eq!(derive_power(None, None), None);
    }

    #[test]
    fn supplied_power_wins_over_derivation() {
        let power = resolve_power(Some(55.0), Some(12.0), Some(4.0)).unwrap();
        assert!((power - 55.0).abs() < 1e-9);
    }

    #[test]
    fn missing_supplied_power_falls_back_to_product() {
        let power = resolve_power(None, Some(12.0), Some(4.0)).unwrap();
        assert!((power - 48.0).abs() < 1e-9);
    }
}
