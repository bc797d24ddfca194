// crates/dash_metrics/src/eda.rs
//
// Exploratory-analysis summaries: skew severity, top correlations, outlier
// severity. Thresholds are named constants so the display colours can be
// tested without reading view code.

use dash_core::determinism::{is_sorted_by_magnitude_desc, sort_by_magnitude_desc};
use dash_core::document::{FeatureCorrelation, OutlierFeature, SkewedFeature};
use serde::Serialize;
use tracing::debug;

// ---- Skewness ----

/// `|skewness|` strictly above this is "high".
pub const SKEW_HIGH_ABOVE: f64 = 1.0;
/// `|skewness|` from this value up to `SKEW_HIGH_ABOVE` is "moderate".
pub const SKEW_MODERATE_FROM: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkewSeverity {
    Low,
    Moderate,
    High,
}

impl SkewSeverity {
    pub fn of(skewness: f64) -> Self {
        let a = skewness.abs();
        if a > SKEW_HIGH_ABOVE {
            SkewSeverity::High
        } else if a >= SKEW_MODERATE_FROM {
            SkewSeverity::Moderate
        } else {
            SkewSeverity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SkewSeverity::Low => "low",
            SkewSeverity::Moderate => "moderate",
            SkewSeverity::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkewSummary {
    pub feature: String,
    pub skewness: f64,
    pub direction: String,
    pub severity: SkewSeverity,
}

/// Input order kept; each feature gains a severity tag.
pub fn skewness_summary(highly_skewed: &[SkewedFeature]) -> Vec<SkewSummary> {
    highly_skewed
        .iter()
        .map(|s| SkewSummary {
            feature: s.feature.clone(),
            skewness: s.skewness,
            direction: s.direction.clone(),
            severity: SkewSeverity::of(s.skewness),
        })
        .collect()
}

// ---- Correlations ----

/// Bars shown in the correlation chart.
pub const TOP_CORRELATIONS: usize = 10;

/// First `n` pairs by descending `|correlation|`.
///
/// Already-ordered input is only truncated. Otherwise it is stably sorted,
/// so pairs of equal magnitude keep their original relative order.
pub fn correlation_top(list: &[FeatureCorrelation], n: usize) -> Vec<FeatureCorrelation> {
    let mut out = list.to_vec();
    if !is_sorted_by_magnitude_desc(&out, |c| c.correlation) {
        debug!(pairs = out.len(), "correlation list not ordered by magnitude; sorting");
        sort_by_magnitude_desc(&mut out, |c| c.correlation);
    }
    out.truncate(n);
    out
}

// ---- Outliers ----

/// More than this many outliers is "high".
pub const OUTLIER_HIGH_ABOVE: u64 = 15;
/// More than this many (up to `OUTLIER_HIGH_ABOVE`) is "medium".
pub const OUTLIER_MEDIUM_ABOVE: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierSeverity {
    Low,
    Medium,
    High,
}

impl OutlierSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            OutlierSeverity::Low => "low",
            OutlierSeverity::Medium => "medium",
            OutlierSeverity::High => "high",
        }
    }
}

pub fn outlier_severity(count: u64) -> OutlierSeverity {
    if count > OUTLIER_HIGH_ABOVE {
        OutlierSeverity::High
    } else if count > OUTLIER_MEDIUM_ABOVE {
        OutlierSeverity::Medium
    } else {
        OutlierSeverity::Low
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutlierSummary {
    pub feature: String,
    pub count: u64,
    pub percentage: f64,
    pub severity: OutlierSeverity,
}

pub fn outlier_summary(features: &[OutlierFeature]) -> Vec<OutlierSummary> {
    features
        .iter()
        .map(|o| OutlierSummary {
            feature: o.feature.clone(),
            count: o.outlier_count,
            percentage: o.outlier_percentage,
            severity: outlier_severity(o.outlier_count),
        })
        .collect()
}
