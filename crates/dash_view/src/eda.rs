//! crates/dash_view/src/eda.rs
//! EDA Insights tab: target balance, skewness, correlations, outliers and the
//! data-cleaning summary.

use dash_core::document::{Interpretation, ReportDocument};
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{fixed, head_before, opt_fixed, percent_1dp, shape};

pub const DEFAULT_OUTLIER_METHOD: &str = "IQR";
pub const CLASS_0_LABEL: &str = "No Disease (0)";
pub const CLASS_1_LABEL: &str = "Disease (1)";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdaView {
    pub target: TargetCard,
    pub skewness: SkewnessCard,
    pub correlations: CorrelationCard,
    pub outliers: OutlierCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning: Option<CleaningCard>,
}

// ---- target ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetCard {
    /// Empty when the report has no per-class breakdown.
    pub classes: Vec<ClassSlice>,
    pub imbalance_ratio: String,
    pub interpretation: InterpretationText,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassSlice {
    pub label: &'static str,
    pub count: u64,
    pub percentage: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct InterpretationText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl From<&Interpretation> for InterpretationText {
    fn from(i: &Interpretation) -> Self {
        Self {
            severity: i.severity.clone(),
            issue: i.issue.clone(),
            impact: i.impact.clone(),
            solution: i.solution.clone(),
        }
    }
}

// ---- skewness ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkewnessCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_features: Option<u64>,
    pub chart: Vec<SkewBar>,
    pub rows: Vec<SkewRow>,
    pub interpretation: InterpretationText,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkewBar {
    pub feature: String,
    pub skewness: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkewRow {
    pub feature: String,
    /// e.g. `"right skew: 1.42"`
    pub text: String,
    pub severity: &'static str,
}

// ---- correlations ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationCard {
    pub chart: Vec<CorrelationBar>,
    pub strong_count: u64,
    pub weak_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multicollinearity: Option<String>,
    pub very_weak_features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strong_predictors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    /// Interpretation line, e.g. "No action needed".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multicollinearity_status: Option<String>,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CorrelationBar {
    pub pair: String,
    pub correlation: f64,
}

// ---- outliers ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutlierCard {
    pub rows: Vec<OutlierRow>,
    pub total_features_with_outliers: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    pub reasoning: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutlierRow {
    pub feature: String,
    /// e.g. `"16 (5.3%)"`
    pub text: String,
    pub severity: &'static str,
}

// ---- cleaning ----

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CleaningCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub features_removed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub shape_before: String,
    pub shape_after: String,
}

pub fn build(doc: &ReportDocument, derived: &DerivedMetrics) -> EdaView {
    let eda = &doc.exploratory_data_analysis;
    let ta = &eda.target_analysis;

    let classes = ta
        .class_distribution
        .as_ref()
        .map(|c| {
            vec![
                ClassSlice { label: CLASS_0_LABEL, count: c.class_0.count, percentage: percent_1dp(c.class_0.percentage) },
                ClassSlice { label: CLASS_1_LABEL, count: c.class_1.count, percentage: percent_1dp(c.class_1.percentage) },
            ]
        })
        .unwrap_or_default();
    let target = TargetCard {
        classes,
        imbalance_ratio: opt_fixed(ta.imbalance_ratio, 2),
        interpretation: (&ta.interpretation).into(),
        recommendations: ta.recommendations.clone(),
    };

    let fd = &eda.feature_distribution_analysis;
    let skewness = SkewnessCard {
        total_features: fd.total_features,
        chart: derived
            .skewness
            .iter()
            .map(|s| SkewBar { feature: s.feature.clone(), skewness: s.skewness })
            .collect(),
        rows: derived
            .skewness
            .iter()
            .map(|s| SkewRow {
                feature: s.feature.clone(),
                text: format!("{} skew: {}", s.direction, fixed(s.skewness, 2)),
                severity: s.severity.as_str(),
            })
            .collect(),
        interpretation: (&fd.interpretation).into(),
        recommendations: fd.recommendations.clone(),
    };

    let ca = &eda.correlation_analysis;
    let correlations = CorrelationCard {
        chart: derived
            .top_correlations
            .iter()
            .map(|c| CorrelationBar { pair: format!("{} - {}", c.feature1, c.feature2), correlation: c.correlation })
            .collect(),
        strong_count: ca.correlation_with_target.strong_count,
        weak_count: ca.correlation_with_target.weak_count,
        multicollinearity: ca.multicollinearity.status.as_deref().map(|s| head_before(s, '(')),
        very_weak_features: ca.very_weak_features.clone(),
        strong_predictors: ca.interpretation.strong_predictors.clone(),
        action_taken: ca.interpretation.action_taken.clone(),
        multicollinearity_status: ca.interpretation.multicollinearity_status.clone(),
        recommendations: ca.recommendations.clone(),
    };

    let oa = &eda.outlier_analysis;
    let outliers = OutlierCard {
        rows: derived
            .outliers
            .iter()
            .map(|o| OutlierRow {
                feature: o.feature.clone(),
                text: format!("{} ({})", o.count, percent_1dp(o.percentage)),
                severity: o.severity.as_str(),
            })
            .collect(),
        total_features_with_outliers: oa.interpretation.total_features_with_outliers,
        method: oa.method.clone().unwrap_or_else(|| DEFAULT_OUTLIER_METHOD.to_string()),
        decision: oa.interpretation.decision.as_deref().map(|s| head_before(s, '-')),
        reasoning: oa.interpretation.reasoning.clone(),
        recommendations: oa.recommendations.clone(),
    };

    let dc = &eda.data_cleaning_actions;
    let cleaning = (!dc.is_empty()).then(|| CleaningCard {
        summary: dc.summary.clone(),
        features_removed: dc.features_removed.clone(),
        reason: dc.reason.clone(),
        shape_before: shape(dc.shape_before_cleaning),
        shape_after: shape(dc.shape_after_cleaning),
    });

    EdaView { target, skewness, correlations, outliers, cleaning }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::document::{FeatureCorrelation, OutlierFeature};

    #[test]
    fn empty_eda_renders_neutral_cards() {
        let doc = ReportDocument::default();
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build(&doc, &derived);
        assert!(v.target.classes.is_empty());
        assert_eq!(v.target.imbalance_ratio, "N/A");
        assert!(v.skewness.rows.is_empty());
        assert!(v.correlations.chart.is_empty());
        assert_eq!(v.outliers.method, DEFAULT_OUTLIER_METHOD);
        assert!(v.cleaning.is_none());
    }

    #[test]
    fn outlier_rows_carry_severity() {
        let mut doc = ReportDocument::default();
        doc.exploratory_data_analysis.outlier_analysis.features_with_outliers = vec![
            OutlierFeature { feature: "chol".into(), outlier_count: 16, outlier_percentage: 5.44 },
            OutlierFeature { feature: "trestbps".into(), outlier_count: 11, outlier_percentage: 3.74 },
        ];
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build(&doc, &derived);
        assert_eq!(v.outliers.rows[0].text, "16 (5.4%)");
        assert_eq!(v.outliers.rows[0].severity, "high");
        assert_eq!(v.outliers.rows[1].severity, "medium");
    }

    #[test]
    fn correlation_pairs_and_status_head() {
        let mut doc = ReportDocument::default();
        let ca = &mut doc.exploratory_data_analysis.correlation_analysis;
        ca.top_correlations = vec![FeatureCorrelation { feature1: "oldpeak".into(), feature2: "target".into(), correlation: 0.42 }];
        ca.multicollinearity.status = Some("Low (no pairs above 0.8)".into());
        ca.interpretation.multicollinearity_status = Some("No action needed".into());
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build(&doc, &derived);
        assert_eq!(v.correlations.chart[0].pair, "oldpeak - target");
        assert_eq!(v.correlations.multicollinearity.as_deref(), Some("Low"));
        assert_eq!(v.correlations.multicollinearity_status.as_deref(), Some("No action needed"));
    }
}
