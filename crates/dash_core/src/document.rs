//! Canonical report document.
//!
//! One representation for both report lineages (the flat legacy artifact and
//! the nested v2 artifact). Field names follow the wire format so that
//! `serde_json::to_value(&doc)` is itself a valid report. Optional leaves are
//! `Option` or an empty collection after normalization; nothing downstream
//! needs to probe for absent intermediate objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ----------------------------- Schema variant -----------------------------

/// Which report lineage a document came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    Legacy,
    V2,
}

impl SchemaVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVariant::Legacy => "legacy",
            SchemaVariant::V2 => "v2",
        }
    }
}

// ----------------------------- Root -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDocument {
    pub project: Project,
    pub model_comparison: ModelComparison,
    pub exploratory_data_analysis: ExploratoryDataAnalysis,
    pub unsupervised_analysis: UnsupervisedAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_flow: Option<PipelineFlow>,
    pub data_preparation: DataPreparation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results_summary: Option<ResultsSummary>,
    pub recommendations: Recommendations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_insights_summary: Option<InsightsSummary>,
    pub metadata: Metadata,
}

impl ReportDocument {
    /// v2 documents carry `pipeline_flow` and/or `analysis_insights_summary`.
    pub fn variant(&self) -> SchemaVariant {
        if self.pipeline_flow.is_some() || self.analysis_insights_summary.is_some() {
            SchemaVariant::V2
        } else {
            SchemaVariant::Legacy
        }
    }
}

// ----------------------------- Project / dataset -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dataset: Dataset,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub original_samples: u64,
    pub features: u64,
    pub train_test_split: TrainTestSplit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_distribution: Option<ClassCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imbalance_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainTestSplit {
    pub train: u64,
    pub test: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassCounts {
    pub class_0: u64,
    pub class_1: u64,
}

impl ClassCounts {
    #[inline]
    pub fn total(&self) -> u64 {
        self.class_0.saturating_add(self.class_1)
    }
}

// ----------------------------- Model comparison -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelComparison {
    pub models: Vec<ModelResult>,
    pub detailed_results: Vec<ModelResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_met: Option<bool>,
}

impl ModelComparison {
    /// The authoritative result list: `detailed_results` when non-empty,
    /// otherwise `models`. Stored order is preserved.
    pub fn ranked(&self) -> &[ModelResult] {
        if self.detailed_results.is_empty() {
            &self.models
        } else {
            &self.detailed_results
        }
    }
}

/// One trained model's held-out scores. Every score is a probability.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1: f64,
    #[serde(default)]
    pub roc_auc: f64,
}

// ----------------------------- EDA -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploratoryDataAnalysis {
    pub target_analysis: TargetAnalysis,
    pub feature_distribution_analysis: FeatureDistributionAnalysis,
    pub correlation_analysis: CorrelationAnalysis,
    pub outlier_analysis: OutlierAnalysis,
    pub data_cleaning_actions: DataCleaningActions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_distribution: Option<ClassShares>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imbalance_ratio: Option<f64>,
    pub interpretation: Interpretation,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassShares {
    pub class_0: ClassShare,
    pub class_1: ClassShare,
}

/// A class count and its share of the dataset in percent (0..=100).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassShare {
    pub count: u64,
    pub percentage: f64,
}

/// Free-text findings attached to an EDA section.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interpretation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDistributionAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_features: Option<u64>,
    pub skewness_analysis: SkewnessAnalysis,
    pub interpretation: Interpretation,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkewnessAnalysis {
    pub highly_skewed: Vec<SkewedFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkewedFeature {
    pub feature: String,
    pub skewness: f64,
    pub direction: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationAnalysis {
    pub top_correlations: Vec<FeatureCorrelation>,
    pub correlation_with_target: TargetCorrelationCounts,
    pub multicollinearity: Multicollinearity,
    pub very_weak_features: Vec<String>,
    pub interpretation: CorrelationInterpretation,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureCorrelation {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetCorrelationCounts {
    pub strong_count: u64,
    pub weak_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multicollinearity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationInterpretation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strong_predictors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multicollinearity_status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub features_with_outliers: Vec<OutlierFeature>,
    pub interpretation: OutlierInterpretation,
    pub recommendations: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierFeature {
    pub feature: String,
    pub outlier_count: u64,
    pub outlier_percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierInterpretation {
    pub total_features_with_outliers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    pub reasoning: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCleaningActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub features_removed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_before_cleaning: Option<[u64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_after_cleaning: Option<[u64; 2]>,
}

impl DataCleaningActions {
    pub fn is_empty(&self) -> bool {
        *self == DataCleaningActions::default()
    }
}

// ----------------------------- Unsupervised -----------------------------

/// Accepts both the legacy `methods` listing and the structured v2 blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsupervisedAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub methods: Vec<UnsupervisedMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<Clustering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensionality_reduction: Option<DimensionalityReduction>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsupervisedMethod {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clustering {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_silhouette_score: Option<f64>,
    pub optimization: ClusterOptimization,
    /// Keyed by cluster id ("0", "1", ...). Key order here is lexicographic;
    /// numeric ordering is applied by the metrics layer.
    pub cluster_distribution: BTreeMap<String, ClusterShare>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptimization {
    pub k_range_tested: Vec<u32>,
    pub silhouette_scores: Vec<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterShare {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionalityReduction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub components: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explained_variance_pc1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explained_variance_pc2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "total_explained_variance")]
    pub explained_variance_total: Option<f64>,
}

// ----------------------------- Pipeline / preparation -----------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stages: Vec<PipelineStage>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStage {
    pub stage: u32,
    pub name: String,
    pub steps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPreparation {
    pub steps: Vec<PreparationStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_shape: Option<[u64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_shape: Option<[u64; 2]>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreparationStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ----------------------------- Summaries -----------------------------

/// Legacy roll-up written next to the model table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_precision_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_precision_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_recall_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_f1_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_roc_auc_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_roc_auc_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models_meeting_target: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_target: Option<f64>,
    pub next_steps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub model_files: BTreeMap<String, String>,
    pub next_steps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_performance: Option<ModelPerformance>,
    pub key_findings: Vec<String>,
    pub recommendations_implemented: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_achieved: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision_target: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_met: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// ISO-8601 timestamp as written by the producing pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}
