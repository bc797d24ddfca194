// crates/dash_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, logging, the validate-only
// short-circuit and the full load → dashboard → output path.

#![forbid(unsafe_code)]

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags, bad JSON, or values outside their domain.
    pub const VALIDATION: i32 = 2;
    /// Source unreachable in validate-only mode, or output could not be written.
    pub const IO: i32 = 4;
}

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use args::Args;
use dash_io::canonical_json::{to_canonical_bytes, to_pretty_sorted_bytes, write_atomic, write_canonical_file};
use dash_io::hasher::sha256_canonical;
use dash_io::{LoadConfiguredError, LoadError, Origin};
use dash_pipeline::{load_dashboard, Dashboard, PipelineError};
use dash_view::render_json::render_dashboard_json;

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Flags, JSON syntax, schema or domain failures.
    Validation(String),
    /// Transport or filesystem failures.
    Io(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) => f.write_str(m),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args);

    let outcome = if args.validate_only { validate_only(&args).await } else { run_once(&args).await };

    let rc = match outcome {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("mldash: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

fn init_tracing(args: &Args) {
    let filter = match args.log_directive() {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    // Logs go to stderr; stdout carries JSON only.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    match e {
        MainError::Validation(_) => exitcodes::VALIDATION,
        MainError::Io(_) => exitcodes::IO,
    }
}

fn map_load_err(e: LoadError) -> MainError {
    MainError::Validation(e.to_string())
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Config(c) => MainError::Validation(format!("--source: {c}")),
        PipelineError::Load(l) => map_load_err(l),
        PipelineError::Derive(v) => MainError::Validation(format!("derive: {v}")),
    }
}

/// Validate-only path: no views, no files.
///
/// A source that cannot be read is an error here; there is nothing to validate.
async fn validate_only(args: &Args) -> Result<(), MainError> {
    let cfg = args.loader_config().map_err(|c| MainError::Validation(format!("--source: {c}")))?;
    let loaded = dash_io::load_configured(&cfg).await.map_err(|e| match e {
        LoadConfiguredError::Config(c) => MainError::Validation(format!("--source: {c}")),
        LoadConfiguredError::Load(l) => map_load_err(l),
    })?;

    match &loaded.origin {
        Origin::Fallback { cause } => Err(MainError::Io(format!("{}: {cause}", args.source))),
        Origin::Artifact(p) => {
            if !args.quiet {
                println!(
                    "validate-only: OK source={} variant={} bytes={} sha256={}",
                    p.source,
                    p.variant.as_str(),
                    p.bytes,
                    p.sha256
                );
            }
            Ok(())
        }
    }
}

/// Full run: build the dashboard and emit it.
async fn run_once(args: &Args) -> Result<(), MainError> {
    let cfg = args.loader_config().map_err(|c| MainError::Validation(format!("--source: {c}")))?;
    let dashboard = load_dashboard(&cfg, &args.tabs).await.map_err(map_pipeline_err)?;

    match &args.out {
        Some(dir) => write_outputs(dir, &dashboard, args.pretty),
        None => {
            let v = dashboard_json(&dashboard)?;
            let bytes = encode(&v, args.pretty)?;
            let text = String::from_utf8_lossy(&bytes);
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

fn origin_json(origin: &Origin) -> Value {
    match origin {
        Origin::Artifact(p) => json!({
            "kind": "artifact",
            "source": p.source,
            "variant": p.variant.as_str(),
            "bytes": p.bytes,
            "sha256": p.sha256,
        }),
        Origin::Fallback { cause } => json!({ "kind": "fallback", "cause": cause.to_string() }),
    }
}

fn to_json<T: serde::Serialize>(v: &T, what: &str) -> Result<Value, MainError> {
    serde_json::to_value(v).map_err(|e| MainError::Io(format!("serialize {what}: {e}")))
}

/// `report_sha256` identifies the normalized document independent of how the
/// artifact was formatted; it equals the digest of a compact `report.json`.
fn dashboard_json(d: &Dashboard) -> Result<Value, MainError> {
    let report_sha256 =
        sha256_canonical(&d.document).map_err(|e| MainError::Io(format!("digest report: {e}")))?;
    Ok(json!({
        "origin": origin_json(&d.origin),
        "report_sha256": report_sha256,
        "quality": to_json(&d.quality, "quality report")?,
        "views": render_dashboard_json(&d.views).map_err(|e| MainError::Io(format!("render: {e}")))?,
    }))
}

fn encode(v: &Value, pretty: bool) -> Result<Vec<u8>, MainError> {
    let r = if pretty { to_pretty_sorted_bytes(v) } else { to_canonical_bytes(v) };
    r.map_err(|e| MainError::Io(format!("encode: {e}")))
}

fn write_outputs(dir: &Path, d: &Dashboard, pretty: bool) -> Result<(), MainError> {
    std::fs::create_dir_all(dir).map_err(|e| MainError::Io(format!("create {}: {e}", dir.display())))?;

    let files = [
        ("dashboard.json", dashboard_json(d)?),
        ("report.json", to_json(&d.document, "report")?),
        ("quality.json", to_json(&d.quality, "quality report")?),
    ];
    for (name, value) in files {
        let path = dir.join(name);
        let written = if pretty {
            let bytes = encode(&value, true)?;
            write_atomic(&path, &bytes)
        } else {
            write_canonical_file(&path, &value)
        };
        written.map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "wrote output");
    }
    Ok(())
}
