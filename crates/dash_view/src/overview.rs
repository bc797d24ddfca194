//! crates/dash_view/src/overview.rs
//! Overview tab: dataset split, class balance, project info, top models,
//! pipeline stages and the insights summary.

use dash_core::document::ReportDocument;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{fixed, opt_pct_2dp, pct_1dp, pct_2dp, percent_1dp, pipeline_type, NA};

pub const DEFAULT_SPLIT_RATIO: &str = "80/20 split";
pub const DEFAULT_GOAL: &str = "Achieve high precision for heart disease prediction";
pub const DEFAULT_DOMAIN: &str = "Healthcare";
pub const DEFAULT_VERSION: &str = "1.0";

/// Ranked models listed on the overview.
pub const TOP_MODELS: usize = 5;
/// Pipeline stages shown before the "see Process Flow" cut.
pub const MAX_STAGES: usize = 8;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewView {
    pub split: SplitCard,
    pub precision: PrecisionCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<PipelineSummary>,
    pub class_balance: ClassBalanceCard,
    pub project_info: ProjectInfo,
    pub top_models: Vec<TopModelRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightsCard>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitCard {
    pub train: u64,
    pub test: u64,
    pub ratio: String,
    pub features: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrecisionCard {
    pub achieved: String,
    pub model: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub description: String,
    pub stages: Vec<StageRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageRow {
    pub stage: u32,
    pub name: String,
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassBalanceCard {
    pub class_0: u64,
    pub class_1: u64,
    pub pct0: String,
    pub pct1: String,
    pub imbalance_ratio: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub goal: String,
    pub pipeline_type: String,
    pub domain: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopModelRow {
    pub rank: u32,
    pub model: String,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub accuracy: String,
    /// Only the first-ranked row is highlighted.
    pub highlight: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsightsCard {
    pub recommendations_implemented: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_model: Option<String>,
    pub precision_achieved: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_met: Option<String>,
}

pub fn target_met_label(met: bool) -> String {
    let label = if met { "✓ Yes" } else { "✗ No" };
    label.to_string()
}

pub fn build(doc: &ReportDocument, derived: &DerivedMetrics) -> OverviewView {
    let ds = &doc.project.dataset;
    let perf = doc.analysis_insights_summary.as_ref().and_then(|s| s.model_performance.as_ref());

    let split = SplitCard {
        train: ds.train_test_split.train,
        test: ds.train_test_split.test,
        ratio: ds.train_test_split.ratio.clone().unwrap_or_else(|| DEFAULT_SPLIT_RATIO.to_string()),
        features: ds.features,
    };

    let precision = PrecisionCard {
        achieved: opt_pct_2dp(perf.and_then(|p| p.precision_achieved)),
        model: perf.and_then(|p| p.best_model.clone()).unwrap_or_default(),
    };

    let pipeline = doc.pipeline_flow.as_ref().map(|p| PipelineSummary {
        description: p.description.clone().unwrap_or_default(),
        stages: p
            .stages
            .iter()
            .take(MAX_STAGES)
            .map(|s| StageRow { stage: s.stage, name: s.name.clone(), steps: s.steps.clone() })
            .collect(),
    });

    let (class_0, class_1) = ds
        .class_distribution
        .as_ref()
        .map(|c| (c.class_0, c.class_1))
        .or_else(|| {
            doc.exploratory_data_analysis
                .target_analysis
                .class_distribution
                .as_ref()
                .map(|c| (c.class_0.count, c.class_1.count))
        })
        .unwrap_or((0, 0));
    let class_balance = match &derived.class_balance {
        Some(b) => ClassBalanceCard {
            class_0,
            class_1,
            pct0: percent_1dp(b.pct0),
            pct1: percent_1dp(b.pct1),
            imbalance_ratio: b.imbalance_ratio.map_or_else(|| NA.to_string(), |r| fixed(r, 2)),
        },
        None => ClassBalanceCard {
            class_0,
            class_1,
            pct0: percent_1dp(0.0),
            pct1: percent_1dp(0.0),
            imbalance_ratio: NA.to_string(),
        },
    };

    let project_info = ProjectInfo {
        goal: ds.goal.clone().unwrap_or_else(|| DEFAULT_GOAL.to_string()),
        pipeline_type: pipeline_type(doc.metadata.pipeline_type.as_deref()),
        domain: doc.metadata.domain.clone().unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
        version: doc.metadata.version.clone().unwrap_or_else(|| DEFAULT_VERSION.to_string()),
    };

    let top_models = derived
        .ranked
        .iter()
        .take(TOP_MODELS)
        .map(|r| TopModelRow {
            rank: r.rank,
            model: r.result.model.clone(),
            precision: pct_2dp(r.result.precision),
            recall: pct_2dp(r.result.recall),
            f1: pct_2dp(r.result.f1),
            accuracy: pct_1dp(r.result.accuracy),
            highlight: r.rank == 1,
        })
        .collect();

    let insights = doc.analysis_insights_summary.as_ref().map(|s| InsightsCard {
        recommendations_implemented: s.recommendations_implemented.clone(),
        best_model: perf.and_then(|p| p.best_model.clone()),
        precision_achieved: opt_pct_2dp(perf.and_then(|p| p.precision_achieved)),
        target_met: perf.and_then(|p| p.target_met).map(target_met_label),
    });

    OverviewView { split, precision, pipeline, class_balance, project_info, top_models, insights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::document::{PipelineFlow, PipelineStage};

    #[test]
    fn stages_are_cut_at_eight() {
        let mut doc = ReportDocument::default();
        doc.pipeline_flow = Some(PipelineFlow {
            description: None,
            stages: (1..=10)
                .map(|i| PipelineStage { stage: i, name: format!("Stage {i}"), steps: vec![] })
                .collect(),
        });
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build(&doc, &derived);
        let p = v.pipeline.unwrap();
        assert_eq!(p.stages.len(), MAX_STAGES);
        assert_eq!(p.stages[7].name, "Stage 8");
    }

    #[test]
    fn empty_document_uses_display_defaults() {
        let doc = ReportDocument::default();
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build(&doc, &derived);
        assert_eq!(v.split.ratio, DEFAULT_SPLIT_RATIO);
        assert_eq!(v.precision.achieved, "N/A");
        assert_eq!(v.class_balance.imbalance_ratio, "N/A");
        assert_eq!(v.project_info.goal, DEFAULT_GOAL);
        assert_eq!(v.project_info.pipeline_type, "End-to-End");
        assert_eq!(v.project_info.domain, "Healthcare");
        assert_eq!(v.project_info.version, "1.0");
        assert!(v.top_models.is_empty());
        assert!(v.pipeline.is_none());
        assert!(v.insights.is_none());
    }

    #[test]
    fn target_met_labels() {
        assert_eq!(target_met_label(true), "✓ Yes");
        assert_eq!(target_met_label(false), "✗ No");
    }
}
