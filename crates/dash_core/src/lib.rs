//! dash_core — Canonical report document, metric names, value domains, and
//! stable-order helpers.
//!
//! This crate is **I/O-free**. It defines the types shared across the
//! dashboard workspace (`dash_io`, `dash_metrics`, `dash_view`,
//! `dash_pipeline`, `dash_cli`):
//!
//! - `document`: one canonical `ReportDocument` for both schema lineages
//! - `metric`: the five model-quality metrics and their display labels
//! - `errors`: `ValidationError`, every variant tagged with a JSON Pointer
//! - `domain`: numeric domains (`[0,1]`, `[-1,1]`, `[0,100]`, `≥ 0`) and checks
//! - `determinism`: first-occurrence argmax and stable magnitude ordering
//! - `rounding`: display rounding and safe percentages

#![forbid(unsafe_code)]

pub mod determinism;
pub mod document;
pub mod metric;
pub mod rounding;

pub mod errors {
    use crate::domain::Domain;
    use thiserror::Error;

    /// A document that parsed as JSON but cannot be displayed as-is.
    ///
    /// Missing optional data is never an error; it is defaulted during
    /// normalization. Every variant names the offending field as a JSON Pointer.
    #[derive(Debug, Clone, PartialEq, Error)]
    pub enum ValidationError {
        /// Wrong JSON type or structure (object expected, array of two, ...).
        #[error("shape error at {pointer}: {msg}")]
        Shape { pointer: String, msg: String },

        /// Numeric value present but outside its declared domain.
        #[error("value {value} at {pointer} is outside {domain}")]
        OutOfDomain {
            pointer: String,
            value: f64,
            domain: Domain,
        },

        /// A field the display cannot do without (e.g. a model entry's name).
        #[error("missing required field at {pointer}")]
        MissingField { pointer: String },

        /// Model names must be unique within one result sequence.
        #[error("duplicate model name {name:?} in {pointer}")]
        DuplicateModel { pointer: String, name: String },

        /// Paired sequences (k values and silhouette scores) must align.
        #[error("length mismatch at {pointer}: {left} vs {right}")]
        LengthMismatch {
            pointer: String,
            left: usize,
            right: usize,
        },

        /// A class distribution whose counts sum to zero.
        #[error("class counts at {pointer} sum to zero")]
        EmptyClassDistribution { pointer: String },
    }

    impl ValidationError {
        /// JSON Pointer of the offending field.
        pub fn pointer(&self) -> &str {
            match self {
                ValidationError::Shape { pointer, .. }
                | ValidationError::OutOfDomain { pointer, .. }
                | ValidationError::MissingField { pointer }
                | ValidationError::DuplicateModel { pointer, .. }
                | ValidationError::LengthMismatch { pointer, .. }
                | ValidationError::EmptyClassDistribution { pointer } => pointer,
            }
        }
    }
}

pub mod domain {
    //! Numeric domains for report values.

    use crate::errors::ValidationError;
    use core::fmt;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Domain {
        /// Probabilities and ratios: accuracy, precision, explained variance, ...
        UnitInterval,
        /// Silhouette scores and correlation coefficients.
        SignedUnitInterval,
        /// Percent shares reported by the pipeline (0..=100).
        Percentage,
        /// Counts and unbounded ratios (imbalance ratio).
        NonNegative,
    }

    impl Domain {
        #[inline]
        pub fn contains(self, v: f64) -> bool {
            if !v.is_finite() {
                return false;
            }
            match self {
                Domain::UnitInterval => (0.0..=1.0).contains(&v),
                Domain::SignedUnitInterval => (-1.0..=1.0).contains(&v),
                Domain::Percentage => (0.0..=100.0).contains(&v),
                Domain::NonNegative => v >= 0.0,
            }
        }
    }

    impl fmt::Display for Domain {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Domain::UnitInterval => f.write_str("[0, 1]"),
                Domain::SignedUnitInterval => f.write_str("[-1, 1]"),
                Domain::Percentage => f.write_str("[0, 100]"),
                Domain::NonNegative => f.write_str("[0, inf)"),
            }
        }
    }

    /// Reject `value` when it falls outside `domain`. Never clamps.
    pub fn check(pointer: &str, value: f64, domain: Domain) -> Result<(), ValidationError> {
        if domain.contains(value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfDomain {
                pointer: pointer.to_string(),
                value,
                domain,
            })
        }
    }

    /// `check` for optional leaves; `None` always passes.
    #[inline]
    pub fn check_opt(pointer: &str, value: Option<f64>, domain: Domain) -> Result<(), ValidationError> {
        match value {
            Some(v) => check(pointer, v, domain),
            None => Ok(()),
        }
    }
}

pub use document::ReportDocument;
pub use errors::ValidationError;
pub use metric::Metric;

#[cfg(test)]
mod tests {
    use super::domain::{check, Domain};
    use super::errors::ValidationError;

    #[test]
    fn unit_interval_bounds_are_inclusive() {
        assert!(Domain::UnitInterval.contains(0.0));
        assert!(Domain::UnitInterval.contains(1.0));
        assert!(!Domain::UnitInterval.contains(1.5));
        assert!(!Domain::UnitInterval.contains(-0.01));
        assert!(!Domain::UnitInterval.contains(f64::NAN));
    }

    #[test]
    fn out_of_domain_is_not_clamped() {
        let err = check("/model_comparison/models/0/precision", 1.5, Domain::UnitInterval).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfDomain {
                pointer: "/model_comparison/models/0/precision".into(),
                value: 1.5,
                domain: Domain::UnitInterval,
            }
        );
        assert_eq!(err.pointer(), "/model_comparison/models/0/precision");
        assert_eq!(
            err.to_string(),
            "value 1.5 at /model_comparison/models/0/precision is outside [0, 1]"
        );
    }

    #[test]
    fn signed_interval_accepts_negative_silhouette() {
        assert!(check("/s", -0.2, Domain::SignedUnitInterval).is_ok());
        assert!(check("/s", -1.2, Domain::SignedUnitInterval).is_err());
    }
}
