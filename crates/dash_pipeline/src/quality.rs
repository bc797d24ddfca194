//! crates/dash_pipeline/src/quality.rs
//! Soft-invariant checks on a validated report.
//!
//! Nothing here is fatal: findings are logged and listed on the dashboard so
//! a reader can tell where the numbers disagree with each other. Issue order
//! is stable (severity, code, pointer, message).

use dash_core::document::ReportDocument;
use dash_metrics::{DerivedMetrics, PERCENT_SUM_TOLERANCE};
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
}

/// One data-quality finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub pointer: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn warnings(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }
}

/// Run every check. `derived` must come from the same document.
pub fn check(doc: &ReportDocument, derived: &DerivedMetrics) -> QualityReport {
    let mut issues = Vec::new();
    issues.extend(check_class_counts(doc));
    issues.extend(check_cluster_percentages(derived));
    issues.extend(check_target_flag(doc, derived));
    issues.extend(check_best_model_name(doc));
    issues.extend(check_production_model_name(doc));
    sort_issues_stably(&mut issues);
    QualityReport { issues }
}

// ------------------------------------------------------------------------------------------------
// Checks
// ------------------------------------------------------------------------------------------------

fn check_class_counts(doc: &ReportDocument) -> Option<QualityIssue> {
    let ds = &doc.project.dataset;
    let c = ds.class_distribution.as_ref()?;
    let total = c.total();
    if ds.original_samples == 0 || total == ds.original_samples {
        return None;
    }
    warn!(
        class_total = total,
        original_samples = ds.original_samples,
        "class counts do not add up to the sample count"
    );
    Some(QualityIssue {
        severity: Severity::Warning,
        code: "Q001",
        pointer: "/project/dataset/class_distribution".into(),
        message: format!("class_0 + class_1 = {total}, original_samples = {}", ds.original_samples),
    })
}

/// Already logged by the deriver; only recorded here.
fn check_cluster_percentages(derived: &DerivedMetrics) -> Option<QualityIssue> {
    let d = derived.clusters.as_ref()?;
    if d.within_tolerance {
        return None;
    }
    Some(QualityIssue {
        severity: Severity::Warning,
        code: "Q002",
        pointer: "/unsupervised_analysis/clustering/cluster_distribution".into(),
        message: format!(
            "cluster percentages sum to {:.2}, expected 100 ± {PERCENT_SUM_TOLERANCE}",
            d.percentage_sum
        ),
    })
}

/// A stated `target_met` must agree with the stored best model's precision.
fn check_target_flag(doc: &ReportDocument, derived: &DerivedMetrics) -> Option<QualityIssue> {
    let stated = doc.model_comparison.target_met?;
    let first = derived.ranked.first()?;
    let actual = first.result.precision >= derived.precision_target;
    if stated == actual {
        return None;
    }
    warn!(
        stated,
        precision = first.result.precision,
        target = derived.precision_target,
        "target_met disagrees with the best model's precision"
    );
    Some(QualityIssue {
        severity: Severity::Warning,
        code: "Q003",
        pointer: "/model_comparison/target_met".into(),
        message: format!(
            "target_met is {stated} but {} has precision {} against target {}",
            first.result.model, first.result.precision, derived.precision_target
        ),
    })
}

fn check_best_model_name(doc: &ReportDocument) -> Option<QualityIssue> {
    let name = doc.model_comparison.best_model.as_deref()?;
    if doc.model_comparison.ranked().iter().any(|m| m.model == name) {
        return None;
    }
    Some(QualityIssue {
        severity: Severity::Info,
        code: "Q004",
        pointer: "/model_comparison/best_model".into(),
        message: format!("best_model {name:?} is not among the compared models"),
    })
}

/// The recommendations card has no scores to show for an unknown model.
fn check_production_model_name(doc: &ReportDocument) -> Option<QualityIssue> {
    let name = doc.recommendations.production_model.as_deref()?;
    if doc.model_comparison.ranked().iter().any(|m| m.model == name) {
        return None;
    }
    warn!(production_model = name, "production model has no scores in the comparison");
    Some(QualityIssue {
        severity: Severity::Warning,
        code: "Q005",
        pointer: "/recommendations/production_model".into(),
        message: format!("production_model {name:?} is not among the compared models"),
    })
}

fn sort_issues_stably(issues: &mut [QualityIssue]) {
    issues.sort_by(|a, b| {
        (a.severity, a.code, &a.pointer, &a.message).cmp(&(b.severity, b.code, &b.pointer, &b.message))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::document::{ClassCounts, ClusterShare, Clustering, ModelResult};

    fn derived(doc: &ReportDocument) -> DerivedMetrics {
        dash_metrics::derive(doc).unwrap()
    }

    #[test]
    fn consistent_document_is_clean() {
        let mut doc = ReportDocument::default();
        doc.project.dataset.original_samples = 294;
        doc.project.dataset.class_distribution = Some(ClassCounts { class_0: 188, class_1: 106 });
        let r = check(&doc, &derived(&doc));
        assert!(r.is_clean());
    }

    #[test]
    fn class_sum_mismatch_is_a_warning() {
        let mut doc = ReportDocument::default();
        doc.project.dataset.original_samples = 300;
        doc.project.dataset.class_distribution = Some(ClassCounts { class_0: 188, class_1: 106 });
        let r = check(&doc, &derived(&doc));
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].code, "Q001");
        assert_eq!(r.warnings(), 1);
    }

    #[test]
    fn contradicting_target_flag_and_stable_order() {
        let mut doc = ReportDocument::default();
        doc.model_comparison.detailed_results =
            vec![ModelResult { model: "A".into(), precision: 0.85, ..ModelResult::default() }];
        doc.model_comparison.target_met = Some(true);
        doc.model_comparison.best_model = Some("Z".into());
        let mut c = Clustering::default();
        c.cluster_distribution.insert("0".into(), ClusterShare { count: 1, percentage: 90.0 });
        doc.unsupervised_analysis.clustering = Some(c);

        let r = check(&doc, &derived(&doc));
        let codes: Vec<&str> = r.issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec!["Q002", "Q003", "Q004"]);
        assert_eq!(r.warnings(), 2);
    }

    #[test]
    fn unknown_production_model_is_a_warning() {
        let mut doc = ReportDocument::default();
        doc.model_comparison.detailed_results =
            vec![ModelResult { model: "LogisticRegression".into(), precision: 0.8571, ..ModelResult::default() }];
        doc.recommendations.production_model = Some("XGBoost".into());
        let r = check(&doc, &derived(&doc));
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].code, "Q005");
        assert_eq!(r.issues[0].pointer, "/recommendations/production_model");

        doc.recommendations.production_model = Some("LogisticRegression".into());
        assert!(check(&doc, &derived(&doc)).is_clean());
    }
}
