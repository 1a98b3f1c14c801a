//! # Extractor configuration
//!
//! Everything the pipeline needs to know besides the artifact path. The
//! command-line tool fills this in from its arguments; library users start
//! from [`ExtractorConfig::default`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{ExtractError, Result};
use crate::inspector::DEFAULT_READELF;
use crate::metadata::parse_number;

/// Slot values at or above this are printed in hex, smaller ones in decimal.
///
/// The default matches the conventional load address of non-PIE x86-64
/// executables.
pub const DEFAULT_POINTER_THRESHOLD: u64 = 0x40_0000;

/// How slot values are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactMode
{
    /// Decide from the ELF header (see [`crate::artifact::detect_mode`])
    #[default]
    Auto,
    /// Relocatable object: slots are resolved through relocation entries
    Object,
    /// Linked executable or shared object: slots hold final addresses
    Linked,
}

impl FromStr for ArtifactMode
{
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self>
    {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ArtifactMode::Auto),
            "object" | "obj" | "o" => Ok(ArtifactMode::Object),
            "linked" | "exec" | "executable" => Ok(ArtifactMode::Linked),
            other => Err(ExtractError::InvalidArgument(format!(
                "unknown artifact mode '{other}' (expected auto, object or linked)"
            ))),
        }
    }
}

impl fmt::Display for ArtifactMode
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            ArtifactMode::Auto => write!(f, "auto"),
            ArtifactMode::Object => write!(f, "object"),
            ArtifactMode::Linked => write!(f, "linked"),
        }
    }
}

/// Extractor settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig
{
    /// Program used to list ELF metadata
    pub readelf: PathBuf,
    /// Resolution strategy
    pub mode: ArtifactMode,
    /// Hex/decimal cut-off for literal slot values
    pub pointer_threshold: u64,
    /// Class names to report; empty reports every vtable
    pub classes: Vec<String>,
    /// Print demangled names in the target column
    pub demangle_targets: bool,
}

impl Default for ExtractorConfig
{
    fn default() -> Self
    {
        Self {
            readelf: PathBuf::from(DEFAULT_READELF),
            mode: ArtifactMode::Auto,
            pointer_threshold: DEFAULT_POINTER_THRESHOLD,
            classes: Vec::new(),
            demangle_targets: false,
        }
    }
}

/// Parse a pointer threshold given as `0x...` hex or decimal.
///
/// ```rust
/// use vtdump_core::config::parse_pointer_threshold;
///
/// assert_eq!(parse_pointer_threshold("0x400000").unwrap(), 0x400000);
/// assert_eq!(parse_pointer_threshold("4096").unwrap(), 4096);
/// assert!(parse_pointer_threshold("lots").is_err());
/// ```
pub fn parse_pointer_threshold(text: &str) -> Result<u64>
{
    parse_number(text.trim())
        .ok_or_else(|| ExtractError::InvalidArgument(format!("invalid pointer threshold '{text}'")))
}
