// crates/dash_metrics/src/balance.rs
//
// Class shares for the binary target.

use dash_core::rounding::{percent_of, round_dp};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassBalance {
    /// Share of class 0 in percent, one decimal.
    pub pct0: f64,
    /// Share of class 1 in percent, one decimal.
    pub pct1: f64,
    /// Majority / minority. `None` when it cannot be computed.
    pub imbalance_ratio: Option<f64>,
}

/// Shares of each class and the imbalance ratio.
///
/// `given_ratio` (the value the report carries) is passed through; otherwise
/// the ratio is recomputed as `max / min`. Both counts zero → `{0, 0, None}`.
pub fn class_balance(class_0: u64, class_1: u64, given_ratio: Option<f64>) -> ClassBalance {
    let total = class_0.saturating_add(class_1);
    if total == 0 {
        return ClassBalance { pct0: 0.0, pct1: 0.0, imbalance_ratio: None };
    }
    let pct0 = round_dp(percent_of(class_0, total), 1);
    let pct1 = round_dp(percent_of(class_1, total), 1);

    let imbalance_ratio = given_ratio.or_else(|| {
        let (hi, lo) = if class_0 >= class_1 { (class_0, class_1) } else { (class_1, class_0) };
        (lo > 0).then(|| hi as f64 / lo as f64)
    });

    ClassBalance { pct0, pct1, imbalance_ratio }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_disease_split() {
        let b = class_balance(188, 106, None);
        assert_eq!(b.pct0, 63.9);
        assert_eq!(b.pct1, 36.1);
        assert!((b.pct0 + b.pct1 - 100.0).abs() <= 0.1);
        let r = b.imbalance_ratio.unwrap();
        assert!((r - 188.0 / 106.0).abs() < 1e-12);
    }

    #[test]
    fn both_zero_is_neutral() {
        assert_eq!(
            class_balance(0, 0, None),
            ClassBalance { pct0: 0.0, pct1: 0.0, imbalance_ratio: None }
        );
        assert_eq!(class_balance(0, 0, Some(2.0)).imbalance_ratio, None);
    }

    #[test]
    fn given_ratio_passes_through() {
        assert_eq!(class_balance(188, 106, Some(1.77)).imbalance_ratio, Some(1.77));
    }

    #[test]
    fn single_class_has_no_ratio() {
        let b = class_balance(0, 7, None);
        assert_eq!((b.pct0, b.pct1), (0.0, 100.0));
        assert_eq!(b.imbalance_ratio, None);
    }
}
