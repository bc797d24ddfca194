//! crates/dash_io/src/normalize.rs
//! Raw JSON → canonical `ReportDocument`.
//!
//! Steps, in order:
//! 1. root must be an object; `null` members are dropped recursively
//! 2. lineage detection (`RawReport::Legacy` / `RawReport::V2`)
//! 3. shape unification (unsupervised key, goal placement, numeric text fields,
//!    integral floats such as `294.0` narrowed to integers)
//! 4. structural pass against the embedded schema (`schema.rs`)
//! 5. typed decode (absent leaves take their documented defaults)
//! 6. domain and cross-field checks on the typed document
//!
//! Missing optional data never fails. A present value outside its domain does.

use std::collections::BTreeSet;

use dash_core::document::{ModelResult, ReportDocument, SchemaVariant};
use dash_core::domain::{check, check_opt, Domain};
use dash_core::errors::ValidationError;
use serde_json::{Map, Value};
use tracing::debug;

use crate::schema;

// ----------------------------- Lineage -----------------------------

/// A parsed report tagged with the lineage it was written in.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReport {
    Legacy(Value),
    V2(Value),
}

impl RawReport {
    /// Classify by the v2 markers `pipeline_flow` / `analysis_insights_summary`.
    pub fn detect(v: Value) -> Self {
        let is_v2 = ["pipeline_flow", "analysis_insights_summary"]
            .iter()
            .any(|k| v.get(*k).map_or(false, |x| !x.is_null()));
        if is_v2 {
            RawReport::V2(v)
        } else {
            RawReport::Legacy(v)
        }
    }

    pub fn variant(&self) -> SchemaVariant {
        match self {
            RawReport::Legacy(_) => SchemaVariant::Legacy,
            RawReport::V2(_) => SchemaVariant::V2,
        }
    }

    /// Unify both lineages into the canonical wire shape.
    pub fn into_canonical_value(self) -> Value {
        match self {
            RawReport::Legacy(mut v) => {
                unify_common(&mut v);
                v
            }
            RawReport::V2(mut v) => {
                unify_v2(&mut v);
                unify_common(&mut v);
                v
            }
        }
    }
}

// ----------------------------- Public entry points -----------------------------

/// Validate and normalize an already-parsed JSON value.
pub fn validate(raw: &Value) -> Result<ReportDocument, ValidationError> {
    validate_owned(raw.clone()).map(|(doc, _)| doc)
}

/// As `validate`, consuming the value and also returning the detected lineage.
pub fn validate_owned(mut raw: Value) -> Result<(ReportDocument, SchemaVariant), ValidationError> {
    if !raw.is_object() {
        return Err(ValidationError::Shape {
            pointer: "/".into(),
            msg: format!("report must be a JSON object, got {}", json_type_name(&raw)),
        });
    }
    strip_nulls(&mut raw);

    let tagged = RawReport::detect(raw);
    let variant = tagged.variant();
    let mut canonical = tagged.into_canonical_value();
    narrow_integral_floats(&mut canonical);

    schema::validate_structure(&canonical)?;

    let doc: ReportDocument = serde_json::from_value(canonical).map_err(|e| ValidationError::Shape {
        pointer: "/".into(),
        msg: e.to_string(),
    })?;

    check_document(&doc)?;
    debug!(variant = variant.as_str(), "report normalized");
    Ok((doc, variant))
}

// ----------------------------- Shape unification -----------------------------

fn strip_nulls(v: &mut Value) {
    match v {
        Value::Object(map) => {
            map.retain(|_, x| !x.is_null());
            for x in map.values_mut() {
                strip_nulls(x);
            }
        }
        Value::Array(items) => {
            for x in items.iter_mut() {
                strip_nulls(x);
            }
        }
        _ => {}
    }
}

/// v2 writers use `unsupervised_learning`; the canonical key wins when both exist.
fn unify_v2(v: &mut Value) {
    let Some(root) = v.as_object_mut() else { return };
    if let Some(alt) = root.remove("unsupervised_learning") {
        root.entry("unsupervised_analysis").or_insert(alt);
    }
}

fn unify_common(v: &mut Value) {
    let Some(root) = v.as_object_mut() else { return };

    if let Some(project) = root.get_mut("project").and_then(Value::as_object_mut) {
        hoist_goal(project);
        if let Some(split) = project
            .get_mut("dataset")
            .and_then(|d| d.get_mut("train_test_split"))
            .and_then(Value::as_object_mut)
        {
            number_to_text(split, "ratio");
        }
    }

    if let Some(meta) = root.get_mut("metadata").and_then(Value::as_object_mut) {
        number_to_text(meta, "version");
    }

    if let Some(methods) = root
        .get_mut("unsupervised_analysis")
        .and_then(|u| u.get_mut("methods"))
        .and_then(Value::as_array_mut)
    {
        for m in methods.iter_mut().filter_map(Value::as_object_mut) {
            range_to_text(m, "k_range");
        }
    }
}

/// `project.goal` (as the dashboard header reads it) moves under `project.dataset`.
fn hoist_goal(project: &mut Map<String, Value>) {
    let Some(goal) = project.remove("goal") else { return };
    let ds = project
        .entry("dataset")
        .or_insert_with(|| Value::Object(Map::new()));
    // A non-object dataset is left for the structural pass to report.
    if let Value::Object(ds) = ds {
        ds.entry("goal").or_insert(goal);
    }
}

fn number_to_text(obj: &mut Map<String, Value>, key: &str) {
    if let Some(slot) = obj.get_mut(key) {
        if let Value::Number(n) = slot {
            *slot = Value::String(n.to_string());
        }
    }
}

/// `[2, 10]` or `[2, 3, ..., 10]` → `"2-10"`; a bare number becomes text.
fn range_to_text(obj: &mut Map<String, Value>, key: &str) {
    let Some(slot) = obj.get_mut(key) else { return };
    match slot {
        Value::Number(n) => *slot = Value::String(n.to_string()),
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_number) => {
            let first = items[0].to_string();
            let last = items[items.len() - 1].to_string();
            *slot = Value::String(if items.len() == 1 { first } else { format!("{first}-{last}") });
        }
        _ => {}
    }
}

/// `294.0` → `294`. Counts are typed as integers; float-valued scores decode
/// from either form. Runs after the text conversions so `"version": 1.0`
/// keeps its written form.
fn narrow_integral_floats(v: &mut Value) {
    match v {
        Value::Number(n) => {
            let Some(f) = n.as_f64().filter(|_| n.is_f64()) else { return };
            // Beyond 2^53 an f64 no longer holds every integer exactly.
            if f.fract() != 0.0 || f.abs() > 9_007_199_254_740_992.0 {
                return;
            }
            *v = if f >= 0.0 { Value::from(f as u64) } else { Value::from(f as i64) };
        }
        Value::Object(map) => map.values_mut().for_each(narrow_integral_floats),
        Value::Array(items) => items.iter_mut().for_each(narrow_integral_floats),
        _ => {}
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ----------------------------- Domain checks -----------------------------

fn check_document(doc: &ReportDocument) -> Result<(), ValidationError> {
    let ds = &doc.project.dataset;
    check_opt("/project/dataset/imbalance_ratio", ds.imbalance_ratio, Domain::NonNegative)?;
    if let Some(cd) = &ds.class_distribution {
        if cd.total() == 0 {
            return Err(ValidationError::EmptyClassDistribution {
                pointer: "/project/dataset/class_distribution".into(),
            });
        }
    }

    let mc = &doc.model_comparison;
    check_models("/model_comparison/models", &mc.models)?;
    check_models("/model_comparison/detailed_results", &mc.detailed_results)?;
    check_opt("/model_comparison/precision_target", mc.precision_target, Domain::UnitInterval)?;

    check_eda(doc)?;
    check_unsupervised(doc)?;

    if let Some(rs) = &doc.results_summary {
        let base = "/results_summary";
        check_opt(&format!("{base}/best_precision_score"), rs.best_precision_score, Domain::UnitInterval)?;
        check_opt(&format!("{base}/best_recall_score"), rs.best_recall_score, Domain::UnitInterval)?;
        check_opt(&format!("{base}/best_f1_score"), rs.best_f1_score, Domain::UnitInterval)?;
        check_opt(&format!("{base}/best_roc_auc_score"), rs.best_roc_auc_score, Domain::UnitInterval)?;
        check_opt(&format!("{base}/precision_target"), rs.precision_target, Domain::UnitInterval)?;
    }

    if let Some(perf) = doc.analysis_insights_summary.as_ref().and_then(|s| s.model_performance.as_ref()) {
        let base = "/analysis_insights_summary/model_performance";
        check_opt(&format!("{base}/precision_achieved"), perf.precision_achieved, Domain::UnitInterval)?;
        check_opt(&format!("{base}/precision_target"), perf.precision_target, Domain::UnitInterval)?;
    }
    Ok(())
}

fn check_models(base: &str, models: &[ModelResult]) -> Result<(), ValidationError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for (i, m) in models.iter().enumerate() {
        if !seen.insert(m.model.as_str()) {
            return Err(ValidationError::DuplicateModel {
                pointer: format!("{base}/{i}/model"),
                name: m.model.clone(),
            });
        }
        for metric in dash_core::Metric::ALL {
            check(&format!("{base}/{i}/{}", metric.as_str()), metric.of(m), Domain::UnitInterval)?;
        }
    }
    Ok(())
}

fn check_eda(doc: &ReportDocument) -> Result<(), ValidationError> {
    let eda = &doc.exploratory_data_analysis;

    let ta = &eda.target_analysis;
    check_opt("/exploratory_data_analysis/target_analysis/imbalance_ratio", ta.imbalance_ratio, Domain::NonNegative)?;
    if let Some(cd) = &ta.class_distribution {
        let base = "/exploratory_data_analysis/target_analysis/class_distribution";
        check(&format!("{base}/class_0/percentage"), cd.class_0.percentage, Domain::Percentage)?;
        check(&format!("{base}/class_1/percentage"), cd.class_1.percentage, Domain::Percentage)?;
    }

    for (i, c) in eda.correlation_analysis.top_correlations.iter().enumerate() {
        check(
            &format!("/exploratory_data_analysis/correlation_analysis/top_correlations/{i}/correlation"),
            c.correlation,
            Domain::SignedUnitInterval,
        )?;
    }

    for (i, o) in eda.outlier_analysis.features_with_outliers.iter().enumerate() {
        check(
            &format!("/exploratory_data_analysis/outlier_analysis/features_with_outliers/{i}/outlier_percentage"),
            o.outlier_percentage,
            Domain::Percentage,
        )?;
    }
    Ok(())
}

fn check_unsupervised(doc: &ReportDocument) -> Result<(), ValidationError> {
    let ua = &doc.unsupervised_analysis;

    if let Some(cl) = &ua.clustering {
        let base = "/unsupervised_analysis/clustering";
        check_opt(&format!("{base}/final_silhouette_score"), cl.final_silhouette_score, Domain::SignedUnitInterval)?;

        let opt = &cl.optimization;
        if opt.k_range_tested.len() != opt.silhouette_scores.len() {
            return Err(ValidationError::LengthMismatch {
                pointer: format!("{base}/optimization"),
                left: opt.k_range_tested.len(),
                right: opt.silhouette_scores.len(),
            });
        }
        for (i, s) in opt.silhouette_scores.iter().enumerate() {
            check(&format!("{base}/optimization/silhouette_scores/{i}"), *s, Domain::SignedUnitInterval)?;
        }

        for (id, share) in &cl.cluster_distribution {
            let ptr = format!("{base}/cluster_distribution/{}", escape_pointer_token(id));
            // Plain decimal only: "01" and "+1" would both display as "Cluster 1".
            let canonical = id.parse::<u32>().map_or(false, |n| n.to_string() == *id);
            if !canonical {
                return Err(ValidationError::Shape {
                    pointer: ptr,
                    msg: format!("cluster id {id:?} is not a non-negative integer in plain decimal form"),
                });
            }
            check(&format!("{ptr}/percentage"), share.percentage, Domain::Percentage)?;
        }
    }

    if let Some(dr) = &ua.dimensionality_reduction {
        let base = "/unsupervised_analysis/dimensionality_reduction";
        check_opt(&format!("{base}/explained_variance_pc1"), dr.explained_variance_pc1, Domain::UnitInterval)?;
        check_opt(&format!("{base}/explained_variance_pc2"), dr.explained_variance_pc2, Domain::UnitInterval)?;
        check_opt(&format!("{base}/explained_variance_total"), dr.explained_variance_total, Domain::UnitInterval)?;
    }
    Ok(())
}

/// RFC 6901 token escaping.
fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

// ----------------------------- Tests -----------------------------
