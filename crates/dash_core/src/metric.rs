//! Model-quality metrics reported per trained model.

use crate::document::ModelResult;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
    Precision,
    Recall,
    F1,
    RocAuc,
}

impl Metric {
    /// Canonical iteration order (matches the table columns).
    pub const ALL: [Metric; 5] = [
        Metric::Accuracy,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
        Metric::RocAuc,
    ];

    /// Wire name, as used for `ModelResult` fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
            Metric::RocAuc => "roc_auc",
        }
    }

    /// Human label for headers and legends.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Accuracy => "Accuracy",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1",
            Metric::RocAuc => "ROC-AUC",
        }
    }

    #[inline]
    pub fn of(self, r: &ModelResult) -> f64 {
        match self {
            Metric::Accuracy => r.accuracy,
            Metric::Precision => r.precision,
            Metric::Recall => r.recall,
            Metric::F1 => r.f1,
            Metric::RocAuc => r.roc_auc,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric {:?} (expected accuracy, precision, recall, f1 or roc_auc)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    /// Accepts wire names and the common spellings `roc-auc` / `rocauc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accuracy" => Ok(Metric::Accuracy),
            "precision" => Ok(Metric::Precision),
            "recall" => Ok(Metric::Recall),
            "f1" => Ok(Metric::F1),
            "roc_auc" | "roc-auc" | "rocauc" => Ok(Metric::RocAuc),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_wire_names() {
        for m in Metric::ALL {
            assert_eq!(m.as_str().parse::<Metric>().unwrap(), m);
        }
        assert_eq!("ROC-AUC".parse::<Metric>().unwrap(), Metric::RocAuc);
        assert!("auc".parse::<Metric>().is_err());
    }

    #[test]
    fn reads_the_matching_field() {
        let r = ModelResult {
            model: "ExtraTrees".into(),
            accuracy: 0.7966,
            precision: 0.7647,
            recall: 0.6190,
            f1: 0.6842,
            roc_auc: 0.9424,
        };
        assert_eq!(Metric::RocAuc.of(&r), 0.9424);
        assert_eq!(Metric::Recall.of(&r), 0.6190);
        assert_eq!(Metric::RocAuc.label(), "ROC-AUC");
    }
}
