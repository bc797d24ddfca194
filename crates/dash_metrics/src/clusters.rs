// crates/dash_metrics/src/clusters.rs
//
// Cluster distribution and the silhouette-vs-k series.

use std::collections::BTreeMap;

use dash_core::determinism::cmp_numeric_ids;
use dash_core::document::ClusterShare;
use dash_core::errors::ValidationError;
use serde::Serialize;
use tracing::warn;

/// Allowed distance of the summed cluster percentages from 100.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterRow {
    pub id: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterDistribution {
    /// Ascending by numeric cluster id.
    pub rows: Vec<ClusterRow>,
    pub percentage_sum: f64,
    /// `|percentage_sum - 100| <= PERCENT_SUM_TOLERANCE`, or no clusters at all.
    pub within_tolerance: bool,
}

/// Rows ordered by numeric id ("2" before "10"). A percentage sum outside the
/// tolerance is logged and flagged, never an error.
pub fn cluster_distribution(dist: &BTreeMap<String, ClusterShare>) -> ClusterDistribution {
    let mut rows: Vec<ClusterRow> = dist
        .iter()
        .map(|(id, s)| ClusterRow { id: id.clone(), count: s.count, percentage: s.percentage })
        .collect();
    rows.sort_by(|a, b| cmp_numeric_ids(&a.id, &b.id));

    let percentage_sum: f64 = rows.iter().map(|r| r.percentage).sum();
    let within_tolerance = rows.is_empty() || (percentage_sum - 100.0).abs() <= PERCENT_SUM_TOLERANCE;
    if !within_tolerance {
        warn!(
            sum = percentage_sum,
            tolerance = PERCENT_SUM_TOLERANCE,
            "cluster percentages do not sum to 100"
        );
    }
    ClusterDistribution { rows, percentage_sum, within_tolerance }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SilhouettePoint {
    pub k: u32,
    pub score: f64,
}

/// Pair `k_range[i]` with `scores[i]`. Unequal lengths cannot be charted and
/// are rejected.
pub fn silhouette_series(k_range: &[u32], scores: &[f64]) -> Result<Vec<SilhouettePoint>, ValidationError> {
    if k_range.len() != scores.len() {
        return Err(ValidationError::LengthMismatch {
            pointer: "/unsupervised_analysis/clustering/optimization".into(),
            left: k_range.len(),
            right: scores.len(),
        });
    }
    Ok(k_range
        .iter()
        .zip(scores)
        .map(|(&k, &score)| SilhouettePoint { k, score })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(count: u64, percentage: f64) -> ClusterShare {
        ClusterShare { count, percentage }
    }

    #[test]
    fn rows_sorted_numerically() {
        let mut m = BTreeMap::new();
        m.insert("10".to_string(), share(1, 10.0));
        m.insert("2".to_string(), share(2, 40.0));
        m.insert("0".to_string(), share(5, 50.0));
        let d = cluster_distribution(&m);
        let ids: Vec<&str> = d.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "2", "10"]);
        assert!(d.within_tolerance);
    }

    #[test]
    fn sum_outside_tolerance_is_flagged_not_fatal() {
        let mut m = BTreeMap::new();
        m.insert("0".to_string(), share(5, 58.8));
        m.insert("1".to_string(), share(4, 40.0));
        let d = cluster_distribution(&m);
        assert!(!d.within_tolerance);
        assert!((d.percentage_sum - 98.8).abs() < 1e-9);
    }

    #[test]
    fn empty_distribution_is_within_tolerance() {
        let d = cluster_distribution(&BTreeMap::new());
        assert!(d.rows.is_empty());
        assert!(d.within_tolerance);
    }

    #[test]
    fn silhouette_zip() {
        let s = silhouette_series(&[2, 3], &[0.21, 0.18]).unwrap();
        assert_eq!(s, vec![SilhouettePoint { k: 2, score: 0.21 }, SilhouettePoint { k: 3, score: 0.18 }]);
    }

    #[test]
    fn silhouette_length_mismatch() {
        let err = silhouette_series(&[2, 3, 4], &[0.1, 0.2]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                pointer: "/unsupervised_analysis/clustering/optimization".into(),
                left: 3,
                right: 2,
            }
        );
    }
}
