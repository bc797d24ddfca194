//! Display rounding.
//!
//! Report values arrive as binary floats, so rounding happens once, here,
//! and every view formats the already-rounded number.

/// Round half away from zero to `dp` decimal places.
#[inline]
pub fn round_dp(x: f64, dp: u32) -> f64 {
    let m = 10f64.powi(dp as i32);
    (x * m).round() / m
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
#[inline]
pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
