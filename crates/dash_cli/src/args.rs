// crates/dash_cli/src/args.rs
//
// CLI argument surface and its translation into a `LoaderConfig`.
//
// Rules:
// - --source is a local path or an http(s) URL; file:// and other schemes are rejected
// - --tab may repeat; omitted means all six tabs
// - --out writes files (atomic, canonical JSON) instead of printing to stdout
// - --validate-only loads and validates, prints provenance, builds nothing

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use dash_io::config::{DEFAULT_ARTIFACT, DEFAULT_MAX_BYTES};
use dash_io::{ConfigError, LoaderConfig, SourceSpec};
use dash_view::Tab;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "mldash",
    version,
    disable_help_subcommand = true,
    about = "Load an ML experiment results artifact and render dashboard view models as JSON"
)]
pub struct Args {
    /// Artifact location: a file path or an http(s) URL.
    #[arg(long, default_value = DEFAULT_ARTIFACT)]
    pub source: String,

    /// Give up on the source after this many seconds (then the built-in sample report is shown).
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=600))]
    pub timeout_secs: u64,

    /// Largest artifact accepted, in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_BYTES)]
    pub max_bytes: usize,

    /// Tab(s) to render: overview, eda, comparison, unsupervised, process, recommendations.
    #[arg(long = "tab", value_parser = parse_tab)]
    pub tabs: Vec<Tab>,

    /// Write dashboard.json, report.json and quality.json into this directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Indented output (keys still sorted).
    #[arg(long)]
    pub pretty: bool,

    /// Load and validate only; print provenance.
    #[arg(long)]
    pub validate_only: bool,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Errors only.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Tab parser for clap.
pub fn parse_tab(s: &str) -> Result<Tab, String> {
    s.parse::<Tab>().map_err(|e| e.to_string())
}

impl Args {
    pub fn loader_config(&self) -> Result<LoaderConfig, ConfigError> {
        Ok(LoaderConfig {
            source: SourceSpec::parse(&self.source)?,
            timeout: Duration::from_secs(self.timeout_secs),
            max_bytes: self.max_bytes,
        })
    }

    /// Log filter requested on the command line, if any. `None` defers to `RUST_LOG`.
    pub fn log_directive(&self) -> Option<&'static str> {
        if self.quiet {
            return Some("error");
        }
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("mldash").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let a = parse(&[]);
        assert_eq!(a.source, "ml_project_results.json");
        assert_eq!(a.timeout_secs, 10);
        assert!(a.tabs.is_empty());
        assert_eq!(a.log_directive(), None);
        let cfg = a.loader_config().unwrap();
        assert_eq!(cfg, LoaderConfig::default());
    }

    #[test]
    fn repeated_tabs_and_verbosity() {
        let a = parse(&["--tab", "eda", "--tab", "comparison", "-vv"]);
        assert_eq!(a.tabs, vec![Tab::Eda, Tab::Comparison]);
        assert_eq!(a.log_directive(), Some("debug"));
    }

    #[test]
    fn bad_inputs_are_rejected() {
        assert!(Args::try_parse_from(["mldash", "--tab", "charts"]).is_err());
        assert!(Args::try_parse_from(["mldash", "--timeout-secs", "0"]).is_err());
        assert!(Args::try_parse_from(["mldash", "-q", "-v"]).is_err());
        let a = parse(&["--source", "file:///tmp/x.json"]);
        assert!(matches!(a.loader_config(), Err(ConfigError::FileUrl(_))));
    }
}
