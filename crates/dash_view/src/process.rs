//! crates/dash_view/src/process.rs
//! Process Flow tab: data preparation steps and the modelling pipeline.

use dash_core::document::ReportDocument;
use serde::Serialize;

use crate::format::shape;

/// Shown when the report carries no `pipeline_flow`.
pub const DEFAULT_MODELING_STEPS: [(&str, &str); 4] = [
    ("Data Loading", "Load heart disease dataset from CSV"),
    ("Multi-Model Training", "Train 5 different models (LogReg, RF, GB, ET, Ada)"),
    ("Aggressive Search", "RandomizedSearchCV with precision focus (50-80 iterations)"),
    ("Model Evaluation", "Compare metrics across all models"),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessView {
    pub preparation: Vec<PrepStepRow>,
    pub original_shape: String,
    pub cleaned_shape: String,
    pub modeling: Vec<ModelingStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrepStepRow {
    pub step: u32,
    pub title: String,
    pub description: String,
    /// e.g. `"Dropped: slope, ca, thal (>40% missing)"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<String>,
    /// Arrow to the next step; false on the last one.
    pub connector: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelingStep {
    pub title: String,
    pub description: String,
}

pub fn build(doc: &ReportDocument) -> ProcessView {
    let steps = &doc.data_preparation.steps;
    let last = steps.len().saturating_sub(1);

    let preparation = steps
        .iter()
        .enumerate()
        .map(|(idx, s)| PrepStepRow {
            step: s.step,
            title: s.title.clone(),
            description: s.description.clone(),
            dropped: s.dropped_columns.as_ref().map(|cols| {
                let joined = cols.join(", ");
                match &s.reason {
                    Some(r) => format!("Dropped: {joined} ({r})"),
                    None => format!("Dropped: {joined}"),
                }
            }),
            connector: idx < last,
        })
        .collect();

    let modeling = match &doc.pipeline_flow {
        Some(p) if !p.stages.is_empty() => p
            .stages
            .iter()
            .map(|s| ModelingStep { title: s.name.clone(), description: s.steps.join("; ") })
            .collect(),
        _ => DEFAULT_MODELING_STEPS
            .iter()
            .map(|&(t, d)| ModelingStep { title: t.to_string(), description: d.to_string() })
            .collect(),
    };

    ProcessView {
        preparation,
        original_shape: shape(doc.data_preparation.original_shape),
        cleaned_shape: shape(doc.data_preparation.cleaned_shape),
        modeling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_core::document::PreparationStep;

    #[test]
    fn dropped_columns_and_connectors() {
        let mut doc = ReportDocument::default();
        doc.data_preparation.steps = vec![
            PreparationStep { step: 1, title: "Load".into(), description: "Read CSV".into(), dropped_columns: None, reason: None },
            PreparationStep {
                step: 2,
                title: "Drop".into(),
                description: "Drop sparse columns".into(),
                dropped_columns: Some(vec!["slope".into(), "ca".into()]),
                reason: Some(">40% missing".into()),
            },
        ];
        let v = build(&doc);
        assert!(v.preparation[0].connector);
        assert!(!v.preparation[1].connector);
        assert_eq!(v.preparation[1].dropped.as_deref(), Some("Dropped: slope, ca (>40% missing)"));
        assert_eq!(v.modeling.len(), DEFAULT_MODELING_STEPS.len());
    }

    #[test]
    fn no_steps() {
        let v = build(&ReportDocument::default());
        assert!(v.preparation.is_empty());
        assert_eq!(v.original_shape, "N/A");
    }
}
