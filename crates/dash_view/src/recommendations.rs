//! crates/dash_view/src/recommendations.rs
//! Recommendations tab: production model, next steps, alternatives, findings
//! and model artifacts.

use dash_core::document::{ModelResult, ReportDocument};
use dash_core::Metric;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{fixed, pct_1dp, pct_2dp, NA};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendationsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<ProductionCard>,
    pub next_steps: Vec<String>,
    pub alternatives: Vec<AlternativeRow>,
    pub key_findings: Vec<String>,
    pub model_files: Vec<ModelFileRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductionCard {
    pub model: String,
    pub reason: String,
    pub precision: String,
    pub recall: String,
    pub accuracy: String,
    pub roc_auc: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlternativeRow {
    pub model: String,
    pub summary: String,
    /// Set on the model that leads ROC-AUC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelFileRow {
    pub model: String,
    pub file: String,
    pub recommended: bool,
}

fn production_card(doc: &ReportDocument, ranked: &[ModelResult]) -> Option<ProductionCard> {
    let stated_reason = doc.recommendations.reason.clone();
    let chosen = match doc.recommendations.production_model.as_deref() {
        Some(name) => match ranked.iter().find(|m| m.model == name) {
            Some(m) => m,
            // Named model has no scores in this report: show the name, not someone else's numbers.
            None => {
                return Some(ProductionCard {
                    model: name.to_string(),
                    reason: stated_reason.unwrap_or_else(|| NA.to_string()),
                    precision: NA.to_string(),
                    recall: NA.to_string(),
                    accuracy: NA.to_string(),
                    roc_auc: NA.to_string(),
                })
            }
        },
        None => ranked.first()?,
    };
    let reason = stated_reason.unwrap_or_else(|| {
        format!(
            "Best performer with the highest precision ({}) and balanced metrics.",
            pct_2dp(chosen.precision)
        )
    });
    Some(ProductionCard {
        model: chosen.model.clone(),
        reason,
        precision: pct_1dp(chosen.precision),
        recall: pct_1dp(chosen.recall),
        accuracy: pct_1dp(chosen.accuracy),
        roc_auc: pct_1dp(chosen.roc_auc),
    })
}

pub fn build(doc: &ReportDocument, derived: &DerivedMetrics) -> RecommendationsView {
    let ranked = doc.model_comparison.ranked();
    let roc_leader = derived.leader(Metric::RocAuc);

    let alternatives = ranked
        .iter()
        .skip(1)
        .map(|m| AlternativeRow {
            model: m.model.clone(),
            summary: format!(
                "Precision: {} | Recall: {} | ROC-AUC: {}",
                pct_2dp(m.precision),
                pct_2dp(m.recall),
                pct_2dp(m.roc_auc)
            ),
            note: roc_leader
                .filter(|l| l.model == m.model)
                .map(|l| format!("Highest ROC-AUC ({}) - best for discrimination", fixed(l.value, 4))),
        })
        .collect();

    let next_steps = if doc.recommendations.next_steps.is_empty() {
        doc.results_summary.as_ref().map(|r| r.next_steps.clone()).unwrap_or_default()
    } else {
        doc.recommendations.next_steps.clone()
    };

    let production_name = doc
        .recommendations
        .production_model
        .as_deref()
        .or_else(|| ranked.first().map(|m| m.model.as_str()));
    let model_files = doc
        .recommendations
        .model_files
        .iter()
        .map(|(model, file)| ModelFileRow {
            model: model.clone(),
            file: file.clone(),
            recommended: Some(model.as_str()) == production_name,
        })
        .collect();

    RecommendationsView {
        production: production_card(doc, ranked),
        next_steps,
        alternatives,
        key_findings: doc
            .analysis_insights_summary
            .as_ref()
            .map(|s| s.key_findings.clone())
            .unwrap_or_default(),
        model_files,
    }
}
