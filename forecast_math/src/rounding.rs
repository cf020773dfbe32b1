//! Decimal rounding for reported averages

/// Round `value` to `decimals` places, halves away from zero.
///
/// ```
/// use forecast_math::round_to;
///
/// assert_eq!(round_to(2.345, 1), 2.3);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// assert_eq!(round_to(3.0, 2), 3.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
