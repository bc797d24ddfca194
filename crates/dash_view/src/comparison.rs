//! crates/dash_view/src/comparison.rs
//! Model Comparison tab.
//!
//! "Best precision" is the first model in stored order; "best ROC-AUC" is the
//! explicit argmax. The two can name different models.

use dash_core::document::ReportDocument;
use dash_core::rounding::round_dp;
use dash_core::Metric;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{fixed, pct_2dp, short_name};
use crate::overview::target_met_label;

pub const EMPTY_MESSAGE: &str = "No model comparison data available";
pub const TOP_MODEL_NOTE: &str = "Best for this dataset with highest precision and balanced metrics";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonView {
    /// `false` renders `EMPTY_MESSAGE` instead of the cards.
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_precision: Option<HeadlineCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_roc_auc: Option<HeadlineCard>,
    pub precision_target: String,
    /// e.g. `"0 of 5"`
    pub meeting_target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_met: Option<String>,
    pub chart: Vec<ChartRow>,
    pub table: Vec<TableRow>,
    pub notes: Vec<NoteRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadlineCard {
    pub value: String,
    pub model: String,
}

/// Bar and radar chart input, percentages with one decimal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartRow {
    pub name: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy: f64,
    pub roc_auc: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub rank: u32,
    pub model: String,
    pub accuracy: String,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub roc_auc: String,
    pub highlight: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoteRow {
    pub rank: u32,
    pub model: String,
    pub note: String,
}

fn pct_axis(p: f64) -> f64 {
    round_dp(p * 100.0, 1)
}

pub fn build(doc: &ReportDocument, derived: &DerivedMetrics) -> ComparisonView {
    let ranked = &derived.ranked;

    let best_precision = ranked.first().map(|r| HeadlineCard {
        value: pct_2dp(r.result.precision),
        model: r.result.model.clone(),
    });
    let best_roc_auc = derived.leader(Metric::RocAuc).map(|l| HeadlineCard {
        value: pct_2dp(l.value),
        model: l.model.clone(),
    });

    let chart = ranked
        .iter()
        .map(|r| ChartRow {
            name: short_name(&r.result.model),
            precision: pct_axis(r.result.precision),
            recall: pct_axis(r.result.recall),
            f1: pct_axis(r.result.f1),
            accuracy: pct_axis(r.result.accuracy),
            roc_auc: pct_axis(r.result.roc_auc),
        })
        .collect();

    let table = ranked
        .iter()
        .map(|r| TableRow {
            rank: r.rank,
            model: r.result.model.clone(),
            accuracy: pct_2dp(r.result.accuracy),
            precision: pct_2dp(r.result.precision),
            recall: pct_2dp(r.result.recall),
            f1: pct_2dp(r.result.f1),
            roc_auc: pct_2dp(r.result.roc_auc),
            highlight: r.rank == 1,
        })
        .collect();

    let notes = ranked
        .iter()
        .map(|r| NoteRow {
            rank: r.rank,
            model: r.result.model.clone(),
            note: if r.rank == 1 {
                TOP_MODEL_NOTE.to_string()
            } else {
                format!("Precision: {} | ROC-AUC: {}", pct_2dp(r.result.precision), pct_2dp(r.result.roc_auc))
            },
        })
        .collect();

    ComparisonView {
        available: !ranked.is_empty(),
        best_precision,
        best_roc_auc,
        precision_target: format!("{}%", fixed(derived.precision_target * 100.0, 0)),
        meeting_target: format!("{} of {}", derived.models_meeting_target, ranked.len()),
        target_met: doc.model_comparison.target_met.map(target_met_label),
        chart,
        table,
        notes,
    }
}
