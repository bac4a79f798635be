//! Number formatting for the CSV outputs.
//!
//! Floats are written the way a C++ `std::ostream` writes them by default:
//! `%g` with six significant digits. Rust's `Display` prints the shortest
//! round-trip form instead, which would make our files differ from those
//! produced by the C++ tool for the same keypoints.

use std::fmt;

/// Significant digits of the default stream precision
pub const DEFAULT_PRECISION: usize = 6;

/// Format `value` like printf's `%.{precision}g`
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);

    // The exponent that decides between fixed and scientific notation is the
    // one after rounding to `precision` digits, so take it from the e-form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// `Display` adapter writing an `f32` in general format
#[derive(Debug, Clone, Copy)]
pub struct GeneralFloat(pub f32);

impl fmt::Display for GeneralFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_general(self.0 as f64, DEFAULT_PRECISION))
    }
}
