//! crates/dash_io/src/fallback.rs
//! The built-in sample report shown when the artifact cannot be fetched.
//!
//! Legacy shape. Every value here is pinned by tests; change them only
//! together with the golden records in `dash_view`.

use std::collections::BTreeMap;

use dash_core::document::{
    ClassCounts, DataPreparation, Dataset, ModelComparison, ModelResult, PreparationStep, Project,
    Recommendations, ReportDocument, ResultsSummary, TrainTestSplit,
};

pub const FALLBACK_TITLE: &str = "ML Model Comparison - Heart Disease Prediction";

const MODEL_TABLE: [(&str, f64, f64, f64, f64, f64); 5] = [
    // model, accuracy, precision, recall, f1, roc_auc
    ("LogisticRegression", 0.8983, 0.8571, 0.8571, 0.8571, 0.8960),
    ("RandomForest", 0.8814, 0.8500, 0.8095, 0.8293, 0.9236),
    ("AdaBoost", 0.8475, 0.8000, 0.7619, 0.7805, 0.8872),
    ("GradientBoosting", 0.7966, 0.7647, 0.6190, 0.6842, 0.8684),
    ("ExtraTrees", 0.7966, 0.7647, 0.6190, 0.6842, 0.9424),
];

const PREPARATION: [(u32, &str, &str); 6] = [
    (1, "Data Loading", "Load heart disease dataset"),
    (2, "Column Normalization", "Normalize column names"),
    (3, "Missing Value Handling", "Handle missing tokens"),
    (4, "Data Type Coercion", "Coerce data types"),
    (5, "Column Dropping", "Drop high-missing columns"),
    (6, "Final Validation", "Validate and save cleaned data"),
];

const NEXT_STEPS: [&str; 3] = [
    "Apply threshold tuning to LogisticRegression",
    "Find probability threshold maximizing recall with precision ≥ 0.9",
    "Deploy best-tuned model for production",
];

/// Build the fallback report. Pure; every call returns an equal value.
pub fn fallback_report() -> ReportDocument {
    let detailed_results = MODEL_TABLE
        .iter()
        .map(|&(model, accuracy, precision, recall, f1, roc_auc)| ModelResult {
            model: model.to_string(),
            accuracy,
            precision,
            recall,
            f1,
            roc_auc,
        })
        .collect();

    let steps = PREPARATION
        .iter()
        .map(|&(step, title, description)| PreparationStep {
            step,
            title: title.to_string(),
            description: description.to_string(),
            dropped_columns: None,
            reason: None,
        })
        .collect();

    let model_files: BTreeMap<String, String> = MODEL_TABLE
        .iter()
        .map(|(model, ..)| (model.to_string(), format!("tuned_precision_{model}.joblib")))
        .collect();

    ReportDocument {
        project: Project {
            title: Some(FALLBACK_TITLE.to_string()),
            description: None,
            dataset: Dataset {
                original_samples: 294,
                features: 11,
                train_test_split: TrainTestSplit { train: 235, test: 59, ratio: None },
                class_distribution: Some(ClassCounts { class_0: 188, class_1: 106 }),
                imbalance_ratio: None,
                goal: None,
            },
        },
        model_comparison: ModelComparison {
            models: Vec::new(),
            detailed_results,
            best_model: None,
            precision_target: None,
            target_met: None,
        },
        data_preparation: DataPreparation { steps, original_shape: None, cleaned_shape: None },
        results_summary: Some(ResultsSummary {
            best_precision_model: Some("LogisticRegression".into()),
            best_precision_score: Some(0.8571),
            best_recall_score: Some(0.8571),
            best_f1_score: Some(0.8571),
            best_roc_auc_model: Some("ExtraTrees".into()),
            best_roc_auc_score: Some(0.9424),
            models_meeting_target: Some(0),
            precision_target: Some(0.9),
            next_steps: NEXT_STEPS.iter().map(|s| s.to_string()).collect(),
        }),
        recommendations: Recommendations {
            production_model: Some("LogisticRegression".into()),
            reason: None,
            model_files,
            next_steps: Vec::new(),
        },
        ..ReportDocument::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use dash_core::document::SchemaVariant;

    #[test]
    fn fallback_is_legacy_and_valid() {
        let doc = fallback_report();
        assert_eq!(doc.variant(), SchemaVariant::Legacy);
        let v = serde_json::to_value(&doc).unwrap();
        let (again, variant) = normalize::validate_owned(v).unwrap();
        assert_eq!(variant, SchemaVariant::Legacy);
        assert_eq!(again, doc);
    }

    #[test]
    fn fallback_literals() {
        let doc = fallback_report();
        let ds = &doc.project.dataset;
        assert_eq!((ds.original_samples, ds.features), (294, 11));
        assert_eq!((ds.train_test_split.train, ds.train_test_split.test), (235, 59));
        assert_eq!(ds.class_distribution, Some(ClassCounts { class_0: 188, class_1: 106 }));
        assert!(doc.model_comparison.models.is_empty());

        let names: Vec<&str> = doc.model_comparison.detailed_results.iter().map(|m| m.model.as_str()).collect();
        assert_eq!(names, vec!["LogisticRegression", "RandomForest", "AdaBoost", "GradientBoosting", "ExtraTrees"]);
        let et = &doc.model_comparison.detailed_results[4];
        assert_eq!((et.precision, et.roc_auc), (0.7647, 0.9424));

        assert_eq!(doc.data_preparation.steps.len(), 6);
        assert_eq!(doc.data_preparation.steps[5].title, "Final Validation");
        assert_eq!(
            doc.recommendations.model_files.get("AdaBoost").map(String::as_str),
            Some("tuned_precision_AdaBoost.joblib")
        );
        let rs = doc.results_summary.as_ref().unwrap();
        assert_eq!(rs.models_meeting_target, Some(0));
        assert_eq!(rs.next_steps[1], "Find probability threshold maximizing recall with precision ≥ 0.9");
    }

    #[test]
    fn fallback_is_constant() {
        assert_eq!(fallback_report(), fallback_report());
    }
}
