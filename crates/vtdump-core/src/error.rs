//! # Error Types
//!
//! General error handling for the vtable extractor.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! Only fatal conditions are represented here. Ambiguous section-relative
//! relocations and demangling failures are recovered where they happen (a
//! `???` placeholder in the report, or a warning event) and never reach the
//! caller as errors.

use thiserror::Error;

/// Main error type for extraction operations
///
/// ## Error Categories
///
/// 1. **Collaborator errors**: ToolInvocation
/// 2. **Consistency errors**: ClassificationInconsistency, MissingSectionReference
/// 3. **Configuration errors**: InvalidArgument
/// 4. **I/O errors**: Io (reading the artifact header, writing the report)
#[derive(Error, Debug)]
pub enum ExtractError
{
    /// The binary inspector could not be run or exited abnormally
    ///
    /// `mode` names the listing that was requested (sections, symbols,
    /// relocations, hex dump) and `message` carries whatever the tool printed
    /// on stderr, or the spawn error if it never started.
    #[error("{tool} failed while reading {mode}: {message}")]
    ToolInvocation
    {
        /// Program that was invoked (e.g. `readelf`)
        tool: String,
        /// Which listing was being produced
        mode: String,
        /// Captured stderr or spawn error
        message: String,
    },

    /// A symbol was classified as a vtable but its demangled form does not
    /// read `vtable for ...` / `construction vtable for ...`
    ///
    /// This means the demangler and the classifier disagree about the naming
    /// scheme. It is never masked.
    #[error("symbol {symbol} looks like a vtable but demangles to {demangled:?}")]
    ClassificationInconsistency
    {
        /// Linkage name handed to the demangler
        symbol: String,
        /// What the demangler returned
        demangled: String,
    },

    /// A relocation refers to a section that is not in the section table
    #[error("relocation refers to unknown section {0}")]
    MissingSectionReference(String),

    /// Invalid argument passed to an extractor function
    ///
    /// Examples:
    /// - A malformed pointer threshold
    /// - An unknown artifact mode
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error (reading the artifact, writing the report)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, ExtractError>`
///
/// ```rust
/// use vtdump_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ExtractError>;
