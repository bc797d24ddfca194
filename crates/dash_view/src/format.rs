//! crates/dash_view/src/format.rs
//! String formatting shared by the tab builders.
//!
//! Numbers are rounded once with `round_dp` (half away from zero) and then
//! printed with a fixed number of decimals. Missing values print as `N/A`.

use chrono::DateTime;
use dash_core::rounding::round_dp;

pub const NA: &str = "N/A";

/// `x` with exactly `dp` decimals.
pub fn fixed(x: f64, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_dp(x, dp))
}

pub fn opt_fixed(x: Option<f64>, dp: u32) -> String {
    x.map_or_else(|| NA.to_string(), |v| fixed(v, dp))
}

/// Probability as a percentage: `0.8571` → `"85.71%"`.
pub fn pct_2dp(p: f64) -> String {
    format!("{}%", fixed(p * 100.0, 2))
}

/// Probability as a percentage with one decimal: `0.8983` → `"89.8%"`.
pub fn pct_1dp(p: f64) -> String {
    format!("{}%", fixed(p * 100.0, 1))
}

pub fn opt_pct_2dp(p: Option<f64>) -> String {
    p.map_or_else(|| NA.to_string(), pct_2dp)
}

/// A value that is already a percentage: `63.9` → `"63.9%"`.
pub fn percent_1dp(pct: f64) -> String {
    format!("{}%", fixed(pct, 1))
}

/// Chart-axis name: the first `Regression` becomes `Reg`.
pub fn short_name(model: &str) -> String {
    model.replacen("Regression", "Reg", 1)
}

/// Text before the first `sep`, trimmed. Whole string when `sep` is absent.
pub fn head_before(s: &str, sep: char) -> String {
    s.split(sep).next().unwrap_or(s).trim().to_string()
}

/// First `-`-separated token of the pipeline type, or `"End-to-End"`.
pub fn pipeline_type(raw: Option<&str>) -> String {
    raw.map(|s| head_before(s, '-'))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "End-to-End".to_string())
}

/// Calendar date of an RFC 3339 timestamp (`YYYY-MM-DD`); `N/A` otherwise.
pub fn footer_date(created: Option<&str>) -> String {
    created
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(|| NA.to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// `[rows, cols]` → `"rows × cols"`.
pub fn shape(s: Option<[u64; 2]>) -> String {
    s.map_or_else(|| NA.to_string(), |[r, c]| format!("{r} × {c}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages() {
        assert_eq!(pct_2dp(0.8571), "85.71%");
        assert_eq!(pct_2dp(0.9424), "94.24%");
        assert_eq!(pct_1dp(0.8983), "89.8%");
        assert_eq!(percent_1dp(63.9), "63.9%");
        assert_eq!(opt_pct_2dp(None), "N/A");
        assert_eq!(pct_2dp(0.0), "0.00%");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(fixed(1.7736, 2), "1.77");
        assert_eq!(fixed(-0.31, 2), "-0.31");
        assert_eq!(opt_fixed(None, 2), "N/A");
    }

    #[test]
    fn names_and_tokens() {
        assert_eq!(short_name("LogisticRegression"), "LogisticReg");
        assert_eq!(short_name("RandomForest"), "RandomForest");
        assert_eq!(pipeline_type(Some("Supervised-Classification")), "Supervised");
        assert_eq!(pipeline_type(Some("End-to-End-ML")), "End");
        assert_eq!(pipeline_type(None), "End-to-End");
        assert_eq!(pipeline_type(Some("")), "End-to-End");
        assert_eq!(head_before("Low (no pairs above 0.8)", '('), "Low");
        assert_eq!(head_before("Keep all", '-'), "Keep all");
    }

    #[test]
    fn dates_and_shapes() {
        assert_eq!(footer_date(Some("2025-03-14T09:26:53Z")), "2025-03-14");
        assert_eq!(footer_date(Some("yesterday")), "N/A");
        assert_eq!(footer_date(None), "N/A");
        assert_eq!(shape(Some([303, 14])), "303 × 14");
        assert_eq!(shape(None), "N/A");
    }
}
