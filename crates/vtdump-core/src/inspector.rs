//! # Binary Inspector
//!
//! The interface to the external tool that lists ELF metadata as text.
//!
//! Apart from the file header, the extractor never decodes ELF structures
//! itself. It asks an inspector for four kinds of listing and parses the text
//! that comes back:
//!
//! - section headers (`readelf -SW`)
//! - the symbol table (`readelf -sW`)
//! - relocation tables (`readelf -rW`, object files only)
//! - a hex dump of one section (`readelf -x <index>`)
//!
//! ## Implementations
//!
//! [`ReadelfInspector`] spawns `readelf`. The integration tests implement the
//! same trait over canned text.
//!
//! Every call blocks until the tool has exited and returns its complete
//! standard output. There is no streaming and no timeout.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::types::SectionId;

/// Default program used by [`ReadelfInspector`].
pub const DEFAULT_READELF: &str = "readelf";

/// The listings an inspector can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing
{
    /// Section header table
    Sections,
    /// Symbol table
    Symbols,
    /// Relocation tables
    Relocations,
    /// Hex dump of one section
    HexDump(SectionId),
}

impl Listing
{
    /// `readelf` arguments producing this listing (without the file name).
    fn readelf_args(self) -> Vec<String>
    {
        match self {
            Listing::Sections => vec!["-SW".to_string()],
            Listing::Symbols => vec!["-sW".to_string()],
            Listing::Relocations => vec!["-rW".to_string()],
            Listing::HexDump(id) => vec!["-x".to_string(), id.to_string()],
        }
    }
}

impl fmt::Display for Listing
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Listing::Sections => write!(f, "sections"),
            Listing::Symbols => write!(f, "symbols"),
            Listing::Relocations => write!(f, "relocations"),
            Listing::HexDump(id) => write!(f, "hex dump of section {id}"),
        }
    }
}

/// Source of textual ELF metadata
///
/// Implementations must return the complete output of one listing for the
/// artifact at `path`, or [`ExtractError::ToolInvocation`] if the listing
/// could not be produced.
pub trait BinaryInspector
{
    /// Produce one listing as text.
    fn listing(&self, path: &Path, listing: Listing) -> Result<String>;

    /// Section header table.
    fn section_headers(&self, path: &Path) -> Result<String>
    {
        self.listing(path, Listing::Sections)
    }

    /// Symbol table.
    fn symbol_table(&self, path: &Path) -> Result<String>
    {
        self.listing(path, Listing::Symbols)
    }

    /// Relocation tables.
    fn relocations(&self, path: &Path) -> Result<String>
    {
        self.listing(path, Listing::Relocations)
    }

    /// Hex dump of one section.
    fn hex_dump(&self, path: &Path, section: SectionId) -> Result<String>
    {
        self.listing(path, Listing::HexDump(section))
    }
}

/// Inspector backed by GNU `readelf`
#[derive(Debug, Clone)]
pub struct ReadelfInspector
{
    program: PathBuf,
}

impl ReadelfInspector
{
    /// Use the given `readelf` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self
    {
        Self { program: program.into() }
    }

    /// Program this inspector runs.
    pub fn program(&self) -> &Path
    {
        &self.program
    }

    fn failure(&self, listing: Listing, message: impl Into<String>) -> ExtractError
    {
        ExtractError::ToolInvocation {
            tool: self.program.display().to_string(),
            mode: listing.to_string(),
            message: message.into(),
        }
    }
}

impl Default for ReadelfInspector
{
    fn default() -> Self
    {
        Self::new(DEFAULT_READELF)
    }
}

impl BinaryInspector for ReadelfInspector
{
    fn listing(&self, path: &Path, listing: Listing) -> Result<String>
    {
        let args = listing.readelf_args();
        debug!(program = %self.program.display(), ?args, file = %path.display(), "running inspector");

        let output = Command::new(&self.program)
            .args(&args)
            .arg(path)
            .output()
            .map_err(|err| self.failure(listing, err.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(self.failure(listing, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Create the inspector used by the command-line tool.
///
/// ## Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use vtdump_core::inspector::{create_inspector, BinaryInspector};
///
/// let inspector = create_inspector(Path::new("readelf"));
/// let sections = inspector.section_headers(Path::new("main.o"))?;
/// # Ok::<(), vtdump_core::error::ExtractError>(())
/// ```
pub fn create_inspector(program: &Path) -> Box<dyn BinaryInspector>
{
    Box::new(ReadelfInspector::new(program))
}
