//! # Relocation Resolver
//!
//! In a relocatable object the vtable bytes are mostly zero: the pointers
//! are filled in by the linker from relocation entries. The resolver indexes
//! those entries by the section and offset they patch and turns each one into
//! the symbolic expression the linker would install.
//!
//! Two kinds of entries exist:
//!
//! - **symbol-relative**: the target is a symbol name; the expression is the
//!   name plus the addend
//! - **section-relative**: the target is a section name (`.text`) and the
//!   addend is an offset into it; the symbol defined there is looked up in the
//!   alias table
//!
//! Only used for object files. Linked artifacts already carry final values.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::index::SymbolIndex;
use crate::types::{Address, RelocationEntry, RelocationTable, SectionId};

/// Rendered for section-relative relocations that do not match exactly one
/// symbol.
pub const UNRESOLVED_PLACEHOLDER: &str = "???";

/// What a relocation entry installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationTarget
{
    /// A symbol plus a signed addend
    Symbol
    {
        name: String,
        addend: i64,
    },
    /// A section-relative relocation with zero or several candidate symbols
    Ambiguous,
}

impl RelocationTarget
{
    /// Symbol name, if the target resolved to one.
    pub fn symbol_name(&self) -> Option<&str>
    {
        match self {
            RelocationTarget::Symbol { name, .. } => Some(name),
            RelocationTarget::Ambiguous => None,
        }
    }

    /// Same target with the symbol name replaced.
    pub fn with_name(&self, name: String) -> Self
    {
        match self {
            RelocationTarget::Symbol { addend, .. } => RelocationTarget::Symbol { name, addend: *addend },
            RelocationTarget::Ambiguous => RelocationTarget::Ambiguous,
        }
    }
}

impl fmt::Display for RelocationTarget
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            RelocationTarget::Symbol { name, addend: 0 } => write!(f, "{name}"),
            RelocationTarget::Symbol { name, addend } if *addend < 0 => {
                write!(f, "{name}-0x{:x}", addend.unsigned_abs())
            }
            RelocationTarget::Symbol { name, addend } => write!(f, "{name}+0x{addend:x}"),
            RelocationTarget::Ambiguous => write!(f, "{UNRESOLVED_PLACEHOLDER}"),
        }
    }
}

/// Relocation entries keyed by the section and offset they patch.
pub struct RelocationResolver<'a>
{
    index: &'a SymbolIndex,
    entries: HashMap<SectionId, BTreeMap<Address, RelocationEntry>>,
}

impl<'a> RelocationResolver<'a>
{
    /// Commit every relocation table to the section it patches.
    ///
    /// ## Errors
    ///
    /// [`ExtractError::MissingSectionReference`] when a relocation section, or
    /// the section it patches, is not in the section table.
    pub fn new(tables: Vec<RelocationTable>, index: &'a SymbolIndex) -> Result<Self>
    {
        let mut entries: HashMap<SectionId, BTreeMap<Address, RelocationEntry>> = HashMap::new();

        for table in tables {
            let section = index
                .section_by_name(&table.section_name)
                .ok_or_else(|| ExtractError::MissingSectionReference(table.section_name.clone()))?;
            let target_name = section
                .relocation_target()
                .ok_or_else(|| ExtractError::MissingSectionReference(table.section_name.clone()))?;
            let target = index
                .section_by_name(target_name)
                .ok_or_else(|| ExtractError::MissingSectionReference(target_name.to_string()))?;

            debug!(
                relocations = %table.section_name,
                target = %target.name,
                entries = table.entries.len(),
                "committed relocation table"
            );
            let patched = entries.entry(target.id).or_default();
            for entry in table.entries {
                patched.insert(entry.offset, entry);
            }
        }

        Ok(Self { index, entries })
    }

    /// Whether any relocation patches `section`.
    pub fn has_relocations(&self, section: SectionId) -> bool
    {
        self.entries.get(&section).is_some_and(|patched| !patched.is_empty())
    }

    /// The entry patching `offset` in `section`.
    pub fn entry(&self, section: SectionId, offset: Address) -> Option<&RelocationEntry>
    {
        self.entries.get(&section)?.get(&offset)
    }

    /// Resolve an entry to the expression it installs.
    ///
    /// ## Errors
    ///
    /// [`ExtractError::MissingSectionReference`] when a section-relative
    /// entry names a section that does not exist.
    pub fn resolve(&self, entry: &RelocationEntry) -> Result<RelocationTarget>
    {
        if !entry.is_section_relative() {
            return Ok(RelocationTarget::Symbol {
                name: entry.target.clone(),
                addend: entry.addend,
            });
        }

        let section = self
            .index
            .section_by_name(&entry.target)
            .ok_or_else(|| ExtractError::MissingSectionReference(entry.target.clone()))?;

        let candidates = Address::from_slot(entry.addend)
            .map(|address| self.index.aliases_at(section.id, address))
            .unwrap_or_default();

        match candidates {
            [name] => Ok(RelocationTarget::Symbol {
                name: name.clone(),
                addend: 0,
            }),
            _ => {
                debug!(
                    section = %section.name,
                    addend = entry.addend,
                    candidates = candidates.len(),
                    "ambiguous section-relative relocation"
                );
                Ok(RelocationTarget::Ambiguous)
            }
        }
    }

    /// Resolve the entry patching `offset` in `section`, if there is one.
    pub fn resolve_at(&self, section: SectionId, offset: Address) -> Result<Option<RelocationTarget>>
    {
        self.entry(section, offset).map(|entry| self.resolve(entry)).transpose()
    }
}
