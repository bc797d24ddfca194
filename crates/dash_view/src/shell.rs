//! Header, tab strip and footer: the parts shown on every tab.

use dash_core::document::ReportDocument;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

use crate::format::{footer_date, NA};
use crate::tabs::Tab;

pub const DEFAULT_TITLE: &str = "ML Model Dashboard";
pub const DEFAULT_DESCRIPTION: &str = "Heart Disease Prediction - Comprehensive Analysis";
pub const DEFAULT_FOOTER_PROJECT: &str = "Heart Disease Prediction";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Header {
    pub title: String,
    pub description: String,
    pub samples: String,
    pub features: u64,
    pub models_trained: usize,
    pub best_model: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TabEntry {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Footer {
    pub text: String,
}

pub fn header(doc: &ReportDocument, derived: &DerivedMetrics) -> Header {
    let ds = &doc.project.dataset;
    let best_model = doc
        .analysis_insights_summary
        .as_ref()
        .and_then(|s| s.model_performance.as_ref())
        .and_then(|p| p.best_model.clone())
        .or_else(|| doc.model_comparison.best_model.clone())
        .unwrap_or_else(|| NA.to_string());

    Header {
        title: doc.project.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        description: doc
            .project
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        samples: format!("{} samples", ds.original_samples),
        features: ds.features,
        models_trained: derived.ranked.len(),
        best_model,
    }
}

pub fn tab_strip() -> Vec<TabEntry> {
    Tab::ALL.iter().map(|t| TabEntry { id: t.id(), label: t.label() }).collect()
}

pub fn footer(doc: &ReportDocument) -> Footer {
    let project = doc.project.title.as_deref().unwrap_or(DEFAULT_FOOTER_PROJECT);
    let date = footer_date(doc.metadata.created.as_deref());
    Footer { text: format!("{DEFAULT_TITLE} | {project} | {date}") }
}
