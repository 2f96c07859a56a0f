//! Fixed decimal precision for emitted coordinates.

use std::fmt;

/// Number of fractional digits kept in path and transform strings.
pub const DOM_PRECISION: i32 = 4;

/// Round a value to [`DOM_PRECISION`] fractional digits.
///
/// Rounds from the exact decimal expansion of `value`, so `-498.36935`
/// (stored just short of the halfway point) becomes `-498.3693`. Exact
/// halves round away from zero. Negative zero is normalised to zero so it
/// never prints as `-0`.
pub fn to_dom_precision(value: f64) -> f64 {
    let magnitude = value.abs();
    let rounded = if is_exact_half(magnitude) {
        let factor = 10f64.powi(DOM_PRECISION);
        (magnitude * factor).round() / factor
    } else {
        format!("{:.*}", DOM_PRECISION as usize, magnitude)
            .parse()
            .unwrap_or(magnitude)
    };
    rounded.copysign(value) + 0.0
}

/// Whether `magnitude` sits exactly halfway between two 4-digit decimals.
///
/// Only odd multiples of 1/32 do: the fifth digit is then a `5` with
/// nothing after it. Scaling by a power of two is exact.
fn is_exact_half(magnitude: f64) -> bool {
    let scaled = magnitude * 32.0;
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// Display adapter printing a value at [`DOM_PRECISION`], trailing zeros dropped.
#[derive(Debug, Clone, Copy)]
pub struct Precise(pub f64);

impl fmt::Display for Precise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", to_dom_precision(self.0))
    }
}
