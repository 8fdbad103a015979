//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: unreadable inputs, fatal errors
//! - `warn`: records that failed validation
//! - `info`: run progress and summary counts
//! - `debug`: per-record validation spans and each field error
//! - `trace`: not used
//!
//! Subject identifiers are only written when `--log-data` is set; otherwise
//! [`redact_value`] replaces them.
//!
//! # Usage
//!
//! ```ignore
//! use crf_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(1);
//! init_logging(&config).expect("init logging");
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when subject-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Crates whose events follow the configured level.
const OWN_CRATES: &[&str] = &["crf_cli", "crf_model", "crf_validate"];

/// Returns true if subject-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when subject logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Whether to emit span close events in JSON output.
    pub with_spans: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file path. When set, logs are written to the file.
    pub log_file: Option<PathBuf>,
    /// Whether subject identifiers may be logged.
    pub log_data: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
            log_data: false,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from a verbosity count.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2 (`-vv`): debug
    /// - 3+: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level_filter = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level_filter,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log file path (writes to stderr when None).
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(config, Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    LOG_DATA_ENABLED.store(config.log_data, Ordering::Release);
    tracing_subscriber::registry()
        .with(build_env_filter(config.level_filter, config.use_env_filter))
        .with(output_layer(config, writer))
        .init();
}

/// The formatting layer for `config.format`.
fn output_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer
            .json()
            .with_span_events(if config.with_spans {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Filter directives for the workspace crates at `level`; other crates stay at warn.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

fn build_env_filter(level_filter: LevelFilter, use_env_filter: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(level_filter));
    if use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
