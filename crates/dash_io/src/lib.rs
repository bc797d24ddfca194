//! crates/dash_io/src/lib.rs
//! Report loading for the dashboard.
//!
//! - `source`: where bytes come from (file, HTTP, in-memory)
//! - `schema` + `normalize`: raw JSON → canonical `ReportDocument`
//! - `loader`: the failure policy (transport → fallback, parse/validation → error)
//! - `fallback`: the built-in sample report
//! - `hasher`, `canonical_json`: provenance digests and stable output

#![forbid(unsafe_code)]

use thiserror::Error;

pub use dash_core::errors::ValidationError;

/// The artifact could not be obtained. Always answered with the fallback report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// Non-2xx HTTP status.
    #[error("source returned status {0}")]
    Status(u16),

    #[error("source timed out")]
    Timeout,

    #[error("artifact is {actual} bytes, limit is {limit}")]
    TooLarge { limit: u64, actual: u64 },
}

/// Bytes were obtained but do not form a displayable report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("report is not valid JSON (line {line}, column {column}): {msg}")]
    Parse { line: usize, column: usize, msg: String },

    #[error("report failed validation: {0}")]
    Validation(#[from] ValidationError),
}

pub mod canonical_json;
pub mod config;
pub mod fallback;
pub mod hasher;
pub mod loader;
pub mod normalize;
pub mod schema;
pub mod source;

pub use config::{ConfigError, LoaderConfig, SourceSpec};
pub use fallback::fallback_report;
pub use loader::{load, load_configured, parse_report, LoadConfiguredError, LoadedReport, Origin, Provenance};
pub use normalize::{validate, RawReport};

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, write_atomic, write_canonical_file};
    pub use crate::hasher::{sha256_canonical, sha256_hex};
    pub use crate::source::{ByteSource, FileSource, MemorySource};
    pub use crate::{
        fallback_report, load, load_configured, parse_report, validate, LoadError, LoadedReport,
        LoaderConfig, Origin, Provenance, SourceSpec, TransportError,
    };
}
