//! # Logging Utilities
//!
//! Logging infrastructure for vtdump using `tracing`.
//!
//! The report goes to stdout, so every console log line goes to stderr.
//! Supported:
//! - Pretty (human-readable) and JSON output
//! - Level filtering, with `RUST_LOG` taking precedence over the CLI level
//! - An optional log file next to the console output
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vtdump_utils::{LogFormat, LogLevel, init_logging_with_level};
//!
//! // Keep the guard alive until the program exits
//! let _guard = init_logging_with_level(LogLevel::Warn, LogFormat::Pretty).expect("Failed to initialize logging");
//!
//! tracing::warn!("Couldn't demangle the given symbol");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Level filter (e.g. `RUST_LOG=debug`, `RUST_LOG=vtdump_core=trace`)
//! - `VTDUMP_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
//! - `VTDUMP_LOG_FILE`: Optional log file. A directory gets a dated
//!   `YYYY-MM-DD-vtdump.log` inside it.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fmt};

use chrono::Utc;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "VTDUMP_LOG_FORMAT";

/// Environment variable naming the log file.
pub const LOG_FILE_ENV: &str = "VTDUMP_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Human-readable lines (default)
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

impl fmt::Display for LogFormat
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level (default for the command-line tool)
    Warn,
    /// Info level
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(format!(
                "{s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            ))),
        }
    }
}

/// Keeps the log file writer alive.
///
/// Dropping it flushes and closes the log file; console logging is not
/// affected.
#[must_use = "dropping the guard stops file logging"]
#[derive(Default)]
pub struct LoggingGuard
{
    _worker: Option<WorkerGuard>,
    path: Option<PathBuf>,
}

impl LoggingGuard
{
    /// Log file in use, if any.
    pub fn log_file(&self) -> Option<&Path>
    {
        self.path.as_deref()
    }
}

/// Initialize logging with an explicit level and format
///
/// `RUST_LOG`, when set, still overrides `level` so module-specific filters
/// keep working.
///
/// ## Example
///
/// ```rust,no_run
/// use vtdump_utils::{LogFormat, LogLevel, init_logging_with_level};
///
/// let _guard = init_logging_with_level(LogLevel::Debug, LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized or file logging fails.
pub fn init_logging_with_level(level: LogLevel, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_logging_internal(format, level.into())
}

/// Format requested through `VTDUMP_LOG_FORMAT`, if it is set and valid.
pub fn format_from_env() -> Option<LogFormat>
{
    env::var(LOG_FORMAT_ENV).ok().and_then(|value| value.parse().ok())
}

fn init_logging_internal(format: LogFormat, default_level: Level) -> Result<LoggingGuard, LoggingError>
{
    let mut layers: Vec<BoxedLayer> = vec![console_layer(format, env_filter(default_level))];
    let mut guard = LoggingGuard::default();

    if let Some(value) = env::var_os(LOG_FILE_ENV) {
        let path = log_file_path(Path::new(&value));
        let directory = path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or(Path::new("."));
        std::fs::create_dir_all(directory)?;

        let file_name = path.file_name().unwrap_or_default();
        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);

        let file_layer = match format {
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_filter(env_filter(default_level))
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(env_filter(default_level))
                .boxed(),
        };
        layers.push(file_layer);
        guard._worker = Some(worker);
        guard.path = Some(path);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|err| LoggingError::InitializationFailed(err.to_string()))?;

    Ok(guard)
}

/// `RUST_LOG` when set, otherwise everything at `default_level` and above.
fn env_filter(default_level: Level) -> EnvFilter
{
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.to_string()))
}

/// Console output: stderr, colored only when it is a terminal.
fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed(),
    }
}

/// Resolve the `VTDUMP_LOG_FILE` value to a file path.
///
/// Existing directories get a file named after today's date.
pub fn log_file_path(value: &Path) -> PathBuf
{
    if value.is_dir() {
        let today = Utc::now().format("%Y-%m-%d");
        value.join(format!("{today}-vtdump.log"))
    } else {
        value.to_path_buf()
    }
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
