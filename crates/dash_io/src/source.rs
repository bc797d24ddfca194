//! crates/dash_io/src/source.rs
//! Byte sources for the report artifact: local file, HTTP(S), and in-memory.
//!
//! A source only moves bytes. It never parses. Every failure is a
//! `TransportError`, which the loader answers with the fallback report.

use std::path::{Path, PathBuf};
#[cfg(feature = "http")]
use std::time::Duration;

use async_trait::async_trait;

use crate::TransportError;

#[async_trait]
pub trait ByteSource: Send + Sync {
    /// Short human description (path or URL), recorded in provenance.
    fn describe(&self) -> String;

    /// Read the whole artifact, refusing bodies larger than `max_bytes`.
    async fn fetch(&self, max_bytes: usize) -> Result<Vec<u8>, TransportError>;
}

// ----------------------------- File -----------------------------

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self, max_bytes: usize) -> Result<Vec<u8>, TransportError> {
        let meta = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| TransportError::Unavailable(format!("{}: {e}", self.path.display())))?;
        if !meta.is_file() {
            return Err(TransportError::Unavailable(format!(
                "{}: not a regular file",
                self.path.display()
            )));
        }
        if meta.len() > max_bytes as u64 {
            return Err(TransportError::TooLarge { limit: max_bytes as u64, actual: meta.len() });
        }
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| TransportError::Unavailable(format!("{}: {e}", self.path.display())))?;
        // The file may have grown between stat and read.
        ensure_within(bytes.len(), max_bytes)?;
        Ok(bytes)
    }
}

// ----------------------------- HTTP -----------------------------

#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Unavailable(format!("http client: {e}")))?;
        Ok(Self { url: url.into(), client })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ByteSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self, max_bytes: usize) -> Result<Vec<u8>, TransportError> {
        let resp = self.client.get(&self.url).send().await.map_err(map_reqwest)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        if let Some(len) = resp.content_length() {
            if len > max_bytes as u64 {
                return Err(TransportError::TooLarge { limit: max_bytes as u64, actual: len });
            }
        }
        let body = resp.bytes().await.map_err(map_reqwest)?;
        ensure_within(body.len(), max_bytes)?;
        Ok(body.to_vec())
    }
}

#[cfg(feature = "http")]
fn map_reqwest(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Unavailable(e.to_string())
    }
}

// ----------------------------- In-memory -----------------------------

/// Injected bytes, or an injected transport failure. Used by tests and by
/// embedders that already hold the artifact.
#[derive(Debug, Clone)]
pub struct MemorySource {
    label: String,
    payload: Result<Vec<u8>, TransportError>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { label: label.into(), payload: Ok(bytes.into()) }
    }

    /// A source that always fails with `err`.
    pub fn failing(label: impl Into<String>, err: TransportError) -> Self {
        Self { label: label.into(), payload: Err(err) }
    }

    /// A source that is never reachable.
    pub fn unreachable() -> Self {
        Self::failing("unreachable", TransportError::Unavailable("source unreachable".into()))
    }
}

#[async_trait]
impl ByteSource for MemorySource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self, max_bytes: usize) -> Result<Vec<u8>, TransportError> {
        let bytes = self.payload.clone()?;
        ensure_within(bytes.len(), max_bytes)?;
        Ok(bytes)
    }
}

// ----------------------------- Helpers -----------------------------

fn ensure_within(len: usize, max_bytes: usize) -> Result<(), TransportError> {
    if len > max_bytes {
        Err(TransportError::TooLarge { limit: max_bytes as u64, actual: len as u64 })
    } else {
        Ok(())
    }
}
