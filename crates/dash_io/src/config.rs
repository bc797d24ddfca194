//! crates/dash_io/src/config.rs
//! Loader configuration: where the artifact lives and how much patience to have.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::source::{ByteSource, FileSource};

/// Artifact name the dashboard looks for when no source is given.
pub const DEFAULT_ARTIFACT: &str = "ml_project_results.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty source")]
    EmptySource,
    #[error("file:// URLs are not accepted; pass the path directly: {0}")]
    FileUrl(String),
    #[error("unsupported URL scheme {scheme:?} in {url}")]
    UnsupportedScheme { scheme: String, url: String },
    #[error("HTTP sources need the `http` feature: {0}")]
    HttpDisabled(String),
}

/// Where the report comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    File(PathBuf),
    Http(String),
}

impl SourceSpec {
    /// `http://` and `https://` select HTTP. Any other `<scheme>://` is an
    /// error (including `file://`). Everything else is a filesystem path.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::EmptySource);
        }
        match s.split_once("://") {
            None => Ok(SourceSpec::File(PathBuf::from(s))),
            Some((scheme, _)) => match scheme.to_ascii_lowercase().as_str() {
                "http" | "https" => Ok(SourceSpec::Http(s.to_string())),
                "file" => Err(ConfigError::FileUrl(s.to_string())),
                other => Err(ConfigError::UnsupportedScheme {
                    scheme: other.to_string(),
                    url: s.to_string(),
                }),
            },
        }
    }

    /// Build the concrete byte source.
    pub fn open(&self, timeout: Duration) -> Result<Box<dyn ByteSource>, ConfigError> {
        match self {
            SourceSpec::File(p) => Ok(Box::new(FileSource::new(p.clone()))),
            #[cfg(feature = "http")]
            SourceSpec::Http(url) => match crate::source::HttpSource::new(url.clone(), timeout) {
                Ok(src) => Ok(Box::new(src)),
                // A client that cannot be built behaves like an unreachable host.
                Err(cause) => Ok(Box::new(crate::source::MemorySource::failing(url.clone(), cause))),
            },
            #[cfg(not(feature = "http"))]
            SourceSpec::Http(url) => {
                let _ = timeout;
                Err(ConfigError::HttpDisabled(url.clone()))
            }
        }
    }
}

impl Default for SourceSpec {
    fn default() -> Self {
        SourceSpec::File(PathBuf::from(DEFAULT_ARTIFACT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub source: SourceSpec,
    /// Upper bound on the whole fetch; expiry counts as a transport failure.
    pub timeout: Duration,
    pub max_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: SourceSpec::default(),
            timeout: DEFAULT_TIMEOUT,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LoaderConfig::default();
        assert_eq!(cfg.source, SourceSpec::File(PathBuf::from("ml_project_results.json")));
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.max_bytes, 16 * 1024 * 1024);
    }

    #[test]
    fn parse_source_specs() {
        assert_eq!(
            SourceSpec::parse("https://example.org/ml_project_results.json").unwrap(),
            SourceSpec::Http("https://example.org/ml_project_results.json".into())
        );
        assert_eq!(
            SourceSpec::parse(" results/ml_project_complete_results.json ").unwrap(),
            SourceSpec::File(PathBuf::from("results/ml_project_complete_results.json"))
        );
        assert!(matches!(SourceSpec::parse("file:///tmp/x.json"), Err(ConfigError::FileUrl(_))));
        assert!(matches!(
            SourceSpec::parse("ftp://host/x.json"),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
        assert_eq!(SourceSpec::parse("  "), Err(ConfigError::EmptySource));
    }
}
