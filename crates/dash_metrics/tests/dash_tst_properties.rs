//! Property checks for best-by-metric selection.

use dash_core::document::ModelResult;
use dash_core::Metric;
use dash_metrics::{best_by_metric, rank_models};
use proptest::prelude::*;

fn arb_model() -> impl Strategy<Value = ModelResult> {
    ("[A-Z][a-z]{1,8}", 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(model, accuracy, precision, recall, f1, roc_auc)| ModelResult {
            model,
            accuracy,
            precision,
            recall,
            f1,
            roc_auc,
        },
    )
}

fn arb_metric() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

proptest! {
    #[test]
    fn best_by_metric_is_idempotent(models in prop::collection::vec(arb_model(), 0..12), metric in arb_metric()) {
        let a = best_by_metric(&models, metric).cloned();
        let b = best_by_metric(&models, metric).cloned();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn winner_is_first_maximum(models in prop::collection::vec(arb_model(), 1..12), metric in arb_metric()) {
        let best = best_by_metric(&models, metric).unwrap();
        let max = models.iter().map(|m| metric.of(m)).fold(f64::MIN, f64::max);
        prop_assert_eq!(metric.of(best), max);
        let first = models.iter().position(|m| metric.of(m) == max).unwrap();
        prop_assert!(std::ptr::eq(best, &models[first]));
    }

    #[test]
    fn duplicated_leader_keeps_first_copy(models in prop::collection::vec(arb_model(), 1..8), metric in arb_metric()) {
        let mut doubled = models.clone();
        doubled.extend(models.iter().cloned());
        let best = best_by_metric(&doubled, metric).unwrap();
        let idx = doubled.iter().position(|m| std::ptr::eq(m, best)).unwrap();
        prop_assert!(idx < models.len());
    }

    #[test]
    fn ranking_preserves_stored_order(models in prop::collection::vec(arb_model(), 0..12)) {
        let ranked = rank_models(&models);
        prop_assert_eq!(ranked.len(), models.len());
        for (i, r) in ranked.iter().enumerate() {
            prop_assert_eq!(r.rank as usize, i + 1);
            prop_assert_eq!(&r.result, &models[i]);
        }
    }
}
