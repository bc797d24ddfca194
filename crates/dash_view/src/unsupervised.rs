//! Unsupervised tab: method cards, clustering and PCA summaries.

use dash_core::document::ReportDocument;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{opt_fixed, opt_pct_2dp, percent_1dp, NA};

pub const DEFAULT_DESCRIPTION: &str =
    "Exploratory unsupervised methods applied to the cleaned dataset to reveal structure and clusters.";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnsupervisedView {
    pub description: String,
    pub methods: Vec<MethodCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustering: Option<ClusteringCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pca: Option<PcaCard>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodCard {
    pub method: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<String>,
    /// Relative image path, served next to the artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusteringCard {
    pub method: String,
    pub optimal_k: String,
    pub final_silhouette: String,
    pub silhouette: Vec<SilhouetteBar>,
    pub clusters: Vec<ClusterSlice>,
    /// `false` when the percentages drift from 100 beyond tolerance.
    pub percentages_consistent: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SilhouetteBar {
    pub k: u32,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterSlice {
    pub label: String,
    pub count: u64,
    pub percentage: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PcaCard {
    pub method: String,
    pub components: u32,
    pub pc1: String,
    pub pc2: String,
    pub total: String,
}

pub fn build(doc: &ReportDocument, derived: &DerivedMetrics) -> UnsupervisedView {
    let u = &doc.unsupervised_analysis;

    let methods = u
        .methods
        .iter()
        .map(|m| MethodCard {
            method: m.method.clone(),
            purpose: m.purpose.clone().unwrap_or_default(),
            k_range: m.k_range.clone(),
            scoring: m.scoring.clone(),
            plot: m.plot.clone(),
        })
        .collect();

    let clustering = u.clustering.as_ref().map(|c| {
        let (clusters, percentages_consistent) = match &derived.clusters {
            Some(d) => (
                d.rows
                    .iter()
                    .map(|r| ClusterSlice {
                        label: format!("Cluster {}", r.id),
                        count: r.count,
                        percentage: percent_1dp(r.percentage),
                    })
                    .collect(),
                d.within_tolerance,
            ),
            None => (Vec::new(), true),
        };
        ClusteringCard {
            method: c.method.clone().unwrap_or_else(|| "KMeans".to_string()),
            optimal_k: c.optimal_k.map_or_else(|| NA.to_string(), |k| k.to_string()),
            final_silhouette: opt_fixed(c.final_silhouette_score, 4),
            silhouette: derived.silhouette.iter().map(|p| SilhouetteBar { k: p.k, score: p.score }).collect(),
            clusters,
            percentages_consistent,
        }
    });

    let pca = u.dimensionality_reduction.as_ref().map(|d| PcaCard {
        method: d.method.clone().unwrap_or_else(|| "PCA".to_string()),
        components: d.components,
        pc1: opt_pct_2dp(d.explained_variance_pc1),
        pc2: opt_pct_2dp(d.explained_variance_pc2),
        total: opt_pct_2dp(d.explained_variance_total),
    });

    UnsupervisedView {
        description: u.description.clone().unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        methods,
        clustering,
        pca,
    }
}
