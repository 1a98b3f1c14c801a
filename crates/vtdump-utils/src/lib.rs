//! # vtdump Utilities
//!
//! Shared utilities for the vtdump workspace.
//!
//! Currently this is the logging setup built on `tracing`, plus re-exports of
//! the `tracing` macros so the command-line crate needs no direct dependency.

pub mod logging;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging_with_level, LogFormat, LogLevel, LoggingError, LoggingGuard};
pub use tracing::{debug, error, info, trace, warn};
