// crates/dash_metrics/src/lib.rs
#![forbid(unsafe_code)]

//! Derived dashboard numbers.
//!
//! Every function here is pure over a validated `ReportDocument`. Empty input
//! yields an empty or neutral result; the only error is a misaligned
//! silhouette series, which cannot be charted.

use dash_core::document::ReportDocument;
use dash_core::errors::ValidationError;
use dash_core::Metric;
use serde::Serialize;

pub mod balance;
pub mod clusters;
pub mod eda;
pub mod ranking;

pub use balance::{class_balance, ClassBalance};
pub use clusters::{
    cluster_distribution, silhouette_series, ClusterDistribution, ClusterRow, SilhouettePoint,
    PERCENT_SUM_TOLERANCE,
};
pub use eda::{
    correlation_top, outlier_severity, outlier_summary, skewness_summary, OutlierSeverity,
    OutlierSummary, SkewSeverity, SkewSummary, TOP_CORRELATIONS,
};
pub use ranking::{
    best_by_metric, metric_leaders, models_meeting_target, rank_models, MetricLeader, RankedModel,
};

/// Precision target assumed when the report states none.
pub const DEFAULT_PRECISION_TARGET: f64 = 0.9;

// ----------------------------- Aggregate -----------------------------

/// Everything the view builders need beyond the document itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub ranked: Vec<RankedModel>,
    pub leaders: Vec<MetricLeader>,
    pub precision_target: f64,
    pub models_meeting_target: usize,
    pub class_balance: Option<ClassBalance>,
    pub skewness: Vec<SkewSummary>,
    pub top_correlations: Vec<dash_core::document::FeatureCorrelation>,
    pub outliers: Vec<OutlierSummary>,
    pub clusters: Option<ClusterDistribution>,
    pub silhouette: Vec<SilhouettePoint>,
}

impl DerivedMetrics {
    pub fn leader(&self, metric: Metric) -> Option<&MetricLeader> {
        self.leaders.iter().find(|l| l.metric == metric)
    }
}

/// Target from the comparison block, then the insights summary, then the
/// legacy results summary.
pub fn precision_target(doc: &ReportDocument) -> f64 {
    doc.model_comparison
        .precision_target
        .or_else(|| {
            doc.analysis_insights_summary
                .as_ref()
                .and_then(|s| s.model_performance.as_ref())
                .and_then(|p| p.precision_target)
        })
        .or_else(|| doc.results_summary.as_ref().and_then(|r| r.precision_target))
        .unwrap_or(DEFAULT_PRECISION_TARGET)
}

/// Class balance from the dataset counts, else from the EDA target analysis.
fn balance_of(doc: &ReportDocument) -> Option<ClassBalance> {
    if let Some(c) = &doc.project.dataset.class_distribution {
        return Some(class_balance(c.class_0, c.class_1, doc.project.dataset.imbalance_ratio));
    }
    let t = &doc.exploratory_data_analysis.target_analysis;
    t.class_distribution.as_ref().map(|c| {
        let given = t.imbalance_ratio.or(doc.project.dataset.imbalance_ratio);
        class_balance(c.class_0.count, c.class_1.count, given)
    })
}

/// Compute the full `DerivedMetrics` for one document.
pub fn derive(doc: &ReportDocument) -> Result<DerivedMetrics, ValidationError> {
    let models = doc.model_comparison.ranked();
    let target = precision_target(doc);
    let eda = &doc.exploratory_data_analysis;

    let (clusters, silhouette) = match &doc.unsupervised_analysis.clustering {
        Some(c) => (
            Some(cluster_distribution(&c.cluster_distribution)),
            silhouette_series(&c.optimization.k_range_tested, &c.optimization.silhouette_scores)?,
        ),
        None => (None, Vec::new()),
    };

    Ok(DerivedMetrics {
        ranked: rank_models(models),
        leaders: metric_leaders(models),
        precision_target: target,
        models_meeting_target: models_meeting_target(models, target),
        class_balance: balance_of(doc),
        skewness: skewness_summary(&eda.feature_distribution_analysis.skewness_analysis.highly_skewed),
        top_correlations: correlation_top(&eda.correlation_analysis.top_correlations, TOP_CORRELATIONS),
        outliers: outlier_summary(&eda.outlier_analysis.features_with_outliers),
        clusters,
        silhouette,
    })
}
