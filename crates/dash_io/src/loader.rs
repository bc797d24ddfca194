//! crates/dash_io/src/loader.rs
//! Byte source → validated `ReportDocument`.
//!
//! Failure policy:
//! - transport failure (unreachable, non-2xx, timeout, oversize) → fallback report
//! - bytes that are not JSON → `LoadError::Parse`
//! - JSON that fails validation → `LoadError::Validation`
//!
//! Malformed artifacts are never papered over with sample data.

use serde::Serialize;
use tracing::{info, warn};

use dash_core::document::{ReportDocument, SchemaVariant};

use crate::config::LoaderConfig;
use crate::fallback::fallback_report;
use crate::hasher::sha256_hex;
use crate::normalize;
use crate::source::ByteSource;
use crate::{ConfigError, LoadError, TransportError};

/// Identity of the bytes a document was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub source: String,
    pub variant: SchemaVariant,
    pub bytes: u64,
    pub sha256: String,
}

/// Where the loaded document came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Artifact(Provenance),
    Fallback { cause: TransportError },
}

impl Origin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Origin::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedReport {
    pub document: ReportDocument,
    pub origin: Origin,
}

/// Parse and validate raw artifact bytes.
pub fn parse_report(bytes: &[u8]) -> Result<(ReportDocument, SchemaVariant), LoadError> {
    let raw: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| LoadError::Parse {
        line: e.line(),
        column: e.column(),
        msg: e.to_string(),
    })?;
    Ok(normalize::validate_owned(raw)?)
}

/// Load from an explicit source, bounded by `cfg.timeout` and `cfg.max_bytes`.
pub async fn load(source: &dyn ByteSource, cfg: &LoaderConfig) -> Result<LoadedReport, LoadError> {
    let described = source.describe();
    let fetched = match tokio::time::timeout(cfg.timeout, source.fetch(cfg.max_bytes)).await {
        Ok(r) => r,
        Err(_elapsed) => Err(TransportError::Timeout),
    };

    let bytes = match fetched {
        Ok(b) => b,
        Err(cause) => {
            warn!(source = %described, cause = %cause, "report unavailable; showing built-in sample report");
            return Ok(LoadedReport { document: fallback_report(), origin: Origin::Fallback { cause } });
        }
    };

    let (document, variant) = parse_report(&bytes)?;
    let provenance = Provenance {
        source: described,
        variant,
        bytes: bytes.len() as u64,
        sha256: sha256_hex(&bytes),
    };
    info!(
        source = %provenance.source,
        variant = provenance.variant.as_str(),
        bytes = provenance.bytes,
        sha256 = %provenance.sha256,
        "report loaded"
    );
    Ok(LoadedReport { document, origin: Origin::Artifact(provenance) })
}

/// Resolve `cfg.source` and load from it.
pub async fn load_configured(cfg: &LoaderConfig) -> Result<LoadedReport, LoadConfiguredError> {
    let source = cfg.source.open(cfg.timeout)?;
    Ok(load(source.as_ref(), cfg).await?)
}

#[derive(Debug, thiserror::Error)]
pub enum LoadConfiguredError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Stalled;

    #[async_trait]
    impl ByteSource for Stalled {
        fn describe(&self) -> String {
            "stalled".into()
        }
        async fn fetch(&self, _max: usize) -> Result<Vec<u8>, TransportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn unreachable_source_yields_fallback() {
        let out = load(&MemorySource::unreachable(), &LoaderConfig::default()).await.unwrap();
        assert_eq!(out.document, fallback_report());
        assert!(out.origin.is_fallback());
    }

    #[tokio::test]
    async fn error_status_yields_fallback() {
        let src = MemorySource::failing("http://host/ml_project_results.json", TransportError::Status(404));
        let out = load(&src, &LoaderConfig::default()).await.unwrap();
        assert_eq!(out.document, fallback_report());
        assert_eq!(out.origin, Origin::Fallback { cause: TransportError::Status(404) });
    }

    #[tokio::test]
    async fn oversize_body_yields_fallback() {
        let cfg = LoaderConfig { max_bytes: 8, ..LoaderConfig::default() };
        let src = MemorySource::new("mem", br#"{"project":{}}"#.to_vec());
        let out = load(&src, &cfg).await.unwrap();
        assert_eq!(out.document, fallback_report());
        assert_eq!(out.origin, Origin::Fallback { cause: TransportError::TooLarge { limit: 8, actual: 14 } });
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_a_transport_failure() {
        let cfg = LoaderConfig { timeout: Duration::from_millis(50), ..LoaderConfig::default() };
        let out = load(&Stalled, &cfg).await.unwrap();
        assert_eq!(out.origin, Origin::Fallback { cause: TransportError::Timeout });
    }

    #[tokio::test]
    async fn malformed_json_is_a_parse_error_not_fallback() {
        let src = MemorySource::new("mem", b"{\"project\": ".to_vec());
        match load(&src, &LoaderConfig::default()).await.unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn provenance_records_digest_and_variant() {
        let body = br#"{"pipeline_flow":{"stages":[]}}"#.to_vec();
        let src = MemorySource::new("mem://v2", body.clone());
        let out = load(&src, &LoaderConfig::default()).await.unwrap();
        match out.origin {
            Origin::Artifact(p) => {
                assert_eq!(p.source, "mem://v2");
                assert_eq!(p.variant, SchemaVariant::V2);
                assert_eq!(p.bytes, body.len() as u64);
                assert_eq!(p.sha256, sha256_hex(&body));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
