//! Relocation records for relocatable objects.

use super::address::Address;

/// One line of a relocation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationEntry
{
    /// Offset inside the patched section
    pub offset: Address,
    /// Target symbol, or a section name for section-relative relocations
    pub target: String,
    /// Signed addend
    pub addend: i64,
}

impl RelocationEntry
{
    pub fn new(offset: impl Into<Address>, target: impl Into<String>, addend: i64) -> Self
    {
        Self {
            offset: offset.into(),
            target: target.into(),
            addend,
        }
    }

    /// Section-relative relocations name a section (`.rodata`) instead of a
    /// symbol; the addend is then an offset into that section.
    pub fn is_section_relative(&self) -> bool
    {
        self.target.starts_with('.')
    }
}

/// All entries of one relocation section, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelocationTable
{
    /// Name of the relocation section itself (`.rela.data.rel.ro`)
    pub section_name: String,
    pub entries: Vec<RelocationEntry>,
}

impl RelocationTable
{
    pub fn new(section_name: impl Into<String>) -> Self
    {
        Self {
            section_name: section_name.into(),
            entries: Vec::new(),
        }
    }
}
