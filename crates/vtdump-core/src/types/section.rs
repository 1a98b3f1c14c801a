//! Section header records.

use std::fmt;

/// Index of a section in the section header table.
pub type SectionId = u32;

/// Relocation section prefixes, in the order they are tried.
pub const RELOCATION_PREFIXES: [&str; 2] = [".rela", ".rel"];

/// One entry of the section header table.
///
/// Immutable once read. `file_offset` is the sum of the address and offset
/// columns of the listing, which for a relocatable object (address 0) is the
/// position of the section's bytes in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section
{
    /// Section name, e.g. `.data.rel.ro`
    pub name: String,
    /// Index in the section header table
    pub id: SectionId,
    /// Section type as printed by the inspector (`PROGBITS`, `RELA`, ...)
    pub section_type: String,
    /// Address + offset columns
    pub file_offset: u64,
    /// Size in bytes
    pub size: u64,
}

impl Section
{
    /// Construct a section record.
    pub fn new(name: impl Into<String>, id: SectionId, section_type: impl Into<String>, file_offset: u64, size: u64) -> Self
    {
        Self {
            name: name.into(),
            id,
            section_type: section_type.into(),
            file_offset,
            size,
        }
    }

    /// Name of the section this one relocates, if it is a relocation section.
    ///
    /// ```rust
    /// use vtdump_core::types::Section;
    ///
    /// let rela = Section::new(".rela.data.rel.ro", 7, "RELA", 0x400, 0x30);
    /// assert_eq!(rela.relocation_target(), Some(".data.rel.ro"));
    /// ```
    pub fn relocation_target(&self) -> Option<&str>
    {
        RELOCATION_PREFIXES
            .iter()
            .find_map(|prefix| self.name.strip_prefix(prefix))
            .filter(|target| !target.is_empty())
    }
}

impl fmt::Display for Section
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "[{}] {} ({}, {} bytes)", self.id, self.name, self.section_type, self.size)
    }
}
