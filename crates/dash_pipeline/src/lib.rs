//! crates/dash_pipeline/src/lib.rs
//! Orchestration for the dashboard core.
//!
//! Flow: LOAD (bytes → validated document, or the fallback report)
//!    → DERIVE (`dash_metrics::derive`)
//!    → QUALITY (soft-invariant findings, never fatal)
//!    → VIEWS (`dash_view::build_dashboard`)
//!
//! The finished `Dashboard` is immutable; reloading builds a new one and
//! publishes it through `ReportSlot`.

#![forbid(unsafe_code)]

use dash_core::document::ReportDocument;
use dash_core::errors::ValidationError;
use dash_io::{ConfigError, LoadConfiguredError, LoadError, LoadedReport, LoaderConfig, Origin};
use dash_metrics::DerivedMetrics;
use dash_view::{DashboardView, Tab};
use thiserror::Error;
use tracing::info;

pub mod quality;
pub mod slot;

pub use quality::{QualityIssue, QualityReport, Severity};
pub use slot::ReportSlot;

/// Single error surface for the orchestration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    /// Derivation rejected the document (misaligned silhouette series).
    #[error("derive: {0}")]
    Derive(ValidationError),
}

impl From<LoadConfiguredError> for PipelineError {
    fn from(e: LoadConfiguredError) -> Self {
        match e {
            LoadConfiguredError::Config(c) => PipelineError::Config(c),
            LoadConfiguredError::Load(l) => PipelineError::Load(l),
        }
    }
}

impl PipelineError {
    /// True when the artifact itself is at fault (bad JSON or bad values).
    pub fn is_data_error(&self) -> bool {
        matches!(self, PipelineError::Load(_) | PipelineError::Derive(_))
    }
}

/// Everything one load produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub document: ReportDocument,
    pub origin: Origin,
    pub derived: DerivedMetrics,
    pub quality: QualityReport,
    pub views: DashboardView,
}

/// Derive, check and build views for an already-loaded report.
pub fn build_dashboard(loaded: LoadedReport, tabs: &[Tab]) -> Result<Dashboard, PipelineError> {
    let LoadedReport { document, origin } = loaded;
    let derived = dash_metrics::derive(&document).map_err(PipelineError::Derive)?;
    let quality = quality::check(&document, &derived);
    let views = dash_view::build_dashboard(&document, &derived, tabs);
    info!(
        fallback = origin.is_fallback(),
        models = derived.ranked.len(),
        quality_issues = quality.issues.len(),
        "dashboard built"
    );
    Ok(Dashboard { document, origin, derived, quality, views })
}

/// Load from `cfg.source` and build the dashboard.
pub async fn load_dashboard(cfg: &LoaderConfig, tabs: &[Tab]) -> Result<Dashboard, PipelineError> {
    let loaded = dash_io::load_configured(cfg).await?;
    build_dashboard(loaded, tabs)
}

/// Load, build and publish into `slot`. On error the slot keeps its previous value.
pub async fn reload(slot: &ReportSlot, cfg: &LoaderConfig, tabs: &[Tab]) -> Result<(), PipelineError> {
    let dashboard = load_dashboard(cfg, tabs).await?;
    slot.replace(dashboard);
    Ok(())
}
