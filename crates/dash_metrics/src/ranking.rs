// crates/dash_metrics/src/ranking.rs
//
// Stored order vs. explicit argmax.
//
// The report lists models in the order the pipeline ranked them (usually by
// precision). That order is kept as-is: callers treat entry 0 as "the" best.
// Per-metric winners are computed separately, with ties going to the earlier
// entry, because the stored order is not sorted by every metric at once.

use dash_core::determinism::argmax_first_by;
use dash_core::document::ModelResult;
use dash_core::Metric;
use serde::Serialize;

/// A model with its 1-based position in stored order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedModel {
    pub rank: u32,
    pub result: ModelResult,
}

/// Winner of one metric.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricLeader {
    pub metric: Metric,
    pub model: String,
    pub value: f64,
}

/// Stored order, numbered. Never re-sorts.
pub fn rank_models(models: &[ModelResult]) -> Vec<RankedModel> {
    models
        .iter()
        .enumerate()
        .map(|(i, m)| RankedModel { rank: i as u32 + 1, result: m.clone() })
        .collect()
}

/// Model with the greatest `metric`; first occurrence wins ties. `None` when empty.
pub fn best_by_metric(models: &[ModelResult], metric: Metric) -> Option<&ModelResult> {
    argmax_first_by(models, |m| metric.of(m))
}

/// One leader per metric, in `Metric::ALL` order. Empty input → empty output.
pub fn metric_leaders(models: &[ModelResult]) -> Vec<MetricLeader> {
    Metric::ALL
        .iter()
        .filter_map(|&metric| {
            best_by_metric(models, metric).map(|m| MetricLeader {
                metric,
                model: m.model.clone(),
                value: metric.of(m),
            })
        })
        .collect()
}

/// Number of models whose precision reaches `target` (inclusive).
pub fn models_meeting_target(models: &[ModelResult], target: f64) -> usize {
    models.iter().filter(|m| m.precision >= target).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str, acc: f64, p: f64, r: f64, f1: f64, auc: f64) -> ModelResult {
        ModelResult { model: name.into(), accuracy: acc, precision: p, recall: r, f1, roc_auc: auc }
    }

    fn sample() -> Vec<ModelResult> {
        vec![
            m("LogisticRegression", 0.8983, 0.8571, 0.8571, 0.8571, 0.8960),
            m("RandomForest", 0.8814, 0.8500, 0.8095, 0.8293, 0.9236),
            m("AdaBoost", 0.8475, 0.8000, 0.7619, 0.7805, 0.8872),
            m("GradientBoosting", 0.7966, 0.7647, 0.6190, 0.6842, 0.8684),
            m("ExtraTrees", 0.7966, 0.7647, 0.6190, 0.6842, 0.9424),
        ]
    }

    #[test]
    fn stored_order_diverges_from_roc_auc_leader() {
        let models = sample();
        let ranked = rank_models(&models);
        let names: Vec<&str> = ranked.iter().map(|r| r.result.model.as_str()).collect();
        assert_eq!(names, vec!["LogisticRegression", "RandomForest", "AdaBoost", "GradientBoosting", "ExtraTrees"]);
        assert_eq!(ranked[0].rank, 1);

        let best = best_by_metric(&models, Metric::RocAuc).unwrap();
        assert_eq!(best.model, "ExtraTrees");
        assert_eq!(best.roc_auc, 0.9424);
    }

    #[test]
    fn precision_tie_goes_to_first() {
        let models = vec![
            m("A", 0.0, 0.9, 0.0, 0.0, 0.0),
            m("B", 0.0, 0.9, 0.0, 0.0, 0.0),
            m("C", 0.0, 0.8, 0.0, 0.0, 0.0),
        ];
        assert_eq!(best_by_metric(&models, Metric::Precision).unwrap().model, "A");
    }

    #[test]
    fn leaders_follow_metric_order() {
        let models = sample();
        let leaders = metric_leaders(&models);
        assert_eq!(leaders.len(), 5);
        assert_eq!(leaders[0].metric, Metric::Accuracy);
        assert_eq!(leaders[0].model, "LogisticRegression");
        assert_eq!(leaders[4].model, "ExtraTrees");
    }

    #[test]
    fn empty_inputs_are_neutral() {
        assert!(rank_models(&[]).is_empty());
        assert!(best_by_metric(&[], Metric::F1).is_none());
        assert!(metric_leaders(&[]).is_empty());
        assert_eq!(models_meeting_target(&[], 0.9), 0);
    }

    #[test]
    fn meeting_target_is_inclusive() {
        let models = sample();
        assert_eq!(models_meeting_target(&models, 0.9), 0);
        assert_eq!(models_meeting_target(&models, 0.85), 2);
    }
}
