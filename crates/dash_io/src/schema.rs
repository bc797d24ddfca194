//! crates/dash_io/src/schema.rs
//! Structural pass over a normalized report using the embedded JSON Schema
//! (draft 7). This checks JSON types, required names, and non-negative
//! integer counts. Numeric domains beyond that are checked in `normalize`.

use std::sync::OnceLock;

use dash_core::domain::Domain;
use dash_core::errors::ValidationError;
use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

/// Report schema shipped with the crate.
pub const REPORT_SCHEMA_JSON: &str = include_str!("../schemas/report.schema.json");

static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();

fn compiled() -> Result<&'static JSONSchema, ValidationError> {
    let slot = COMPILED.get_or_init(|| {
        let schema: Value = serde_json::from_str(REPORT_SCHEMA_JSON).map_err(|e| e.to_string())?;
        JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| e.to_string())
    });
    slot.as_ref().map_err(|msg| ValidationError::Shape {
        pointer: "/".into(),
        msg: format!("embedded report schema failed to compile: {msg}"),
    })
}

/// Validate `instance` against the report schema. Reports the first error in
/// document order (lowest JSON Pointer), so results are deterministic.
pub fn validate_structure(instance: &Value) -> Result<(), ValidationError> {
    let schema = compiled()?;
    let result = schema.validate(instance);
    let errors = match result {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut mapped: Vec<ValidationError> = errors.map(|e| map_error(&e)).collect();
    mapped.sort_by(|a, b| a.pointer().cmp(b.pointer()));
    match mapped.into_iter().next() {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

fn map_error(e: &jsonschema::ValidationError<'_>) -> ValidationError {
    let mut pointer = e.instance_path.to_string();
    if pointer.is_empty() {
        pointer.push('/');
    }
    match &e.kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string());
            let base = pointer.trim_end_matches('/');
            ValidationError::MissingField {
                pointer: format!("{base}/{name}"),
            }
        }
        ValidationErrorKind::Minimum { .. } => ValidationError::OutOfDomain {
            pointer,
            value: e.instance.as_f64().unwrap_or(f64::NAN),
            domain: Domain::NonNegative,
        },
        _ => ValidationError::Shape {
            pointer,
            msg: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_compiles() {
        assert!(compiled().is_ok());
    }

    #[test]
    fn empty_object_is_structurally_valid() {
        assert!(validate_structure(&json!({})).is_ok());
    }

    #[test]
    fn negative_count_is_out_of_domain() {
        let v = json!({ "project": { "dataset": { "original_samples": -3 } } });
        match validate_structure(&v).unwrap_err() {
            ValidationError::OutOfDomain { pointer, value, domain } => {
                assert_eq!(pointer, "/project/dataset/original_samples");
                assert_eq!(value, -3.0);
                assert_eq!(domain, Domain::NonNegative);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unnamed_model_is_missing_field() {
        let v = json!({ "model_comparison": { "models": [ { "precision": 0.5 } ] } });
        assert_eq!(
            validate_structure(&v).unwrap_err(),
            ValidationError::MissingField { pointer: "/model_comparison/models/0/model".into() }
        );
    }

    #[test]
    fn wrong_type_is_shape() {
        let v = json!({ "model_comparison": { "models": "LogisticRegression" } });
        let err = validate_structure(&v).unwrap_err();
        assert!(matches!(err, ValidationError::Shape { .. }));
        assert_eq!(err.pointer(), "/model_comparison/models");
    }
}
