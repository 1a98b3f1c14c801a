//! Symbol records.
//!
//! Symbols are built in two phases. The reader produces a [`RawSymbol`] per
//! symbol-table line; the classifier then turns every raw symbol into a
//! [`Symbol`], demangling only the ones that turn out to be virtual tables.

use std::fmt;

use super::address::Address;
use super::section::SectionId;

/// A symbol-table entry exactly as the reader found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSymbol
{
    /// Symbol value (virtual address, or section offset in an object file)
    pub address: Address,
    /// Size in bytes
    pub size: u64,
    /// Owning section
    pub section_id: SectionId,
    /// Name as printed in the symbol table
    pub name: String,
}

impl RawSymbol
{
    /// Construct a raw symbol.
    pub fn new(address: impl Into<Address>, size: u64, section_id: SectionId, name: impl Into<String>) -> Self
    {
        Self {
            address: address.into(),
            size,
            section_id,
            name: name.into(),
        }
    }
}

/// What the classifier learned about a virtual-table symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTableInfo
{
    /// Bare class name (`A`, `ns::B<int>`, `C0-in-D` for construction tables)
    pub class_name: String,
    /// Set for construction vtables (`_ZTC...`)
    pub construction: bool,
}

/// A classified symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol
{
    address: Address,
    size: u64,
    section_id: SectionId,
    raw_name: String,
    name: String,
    demangled: Option<String>,
    vtable: Option<VTableInfo>,
}

impl Symbol
{
    /// A symbol that is not a virtual table; nothing is demangled.
    pub fn plain(raw: RawSymbol) -> Self
    {
        Self {
            address: raw.address,
            size: raw.size,
            section_id: raw.section_id,
            name: raw.name.clone(),
            raw_name: raw.name,
            demangled: None,
            vtable: None,
        }
    }

    /// A virtual-table symbol.
    ///
    /// `name` is the linkage name after prefix stripping and `demangled` the
    /// full demangler output (`vtable for A`).
    pub fn vtable(raw: RawSymbol, name: String, demangled: String, info: VTableInfo) -> Self
    {
        Self {
            address: raw.address,
            size: raw.size,
            section_id: raw.section_id,
            raw_name: raw.name,
            name,
            demangled: Some(demangled),
            vtable: Some(info),
        }
    }

    /// Symbol value.
    pub fn address(&self) -> Address
    {
        self.address
    }

    /// First address past the symbol.
    pub fn end(&self) -> Address
    {
        self.address.saturating_add(self.size)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64
    {
        self.size
    }

    /// Owning section.
    pub fn section_id(&self) -> SectionId
    {
        self.section_id
    }

    /// Name as it appears in the symbol table.
    pub fn raw_name(&self) -> &str
    {
        &self.raw_name
    }

    /// Linkage name with any instrumentation prefix removed.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// Demangled name, present only for virtual tables.
    pub fn demangled(&self) -> Option<&str>
    {
        self.demangled.as_deref()
    }

    pub fn is_vtable(&self) -> bool
    {
        self.vtable.is_some()
    }

    pub fn is_construction_vtable(&self) -> bool
    {
        self.vtable.as_ref().is_some_and(|info| info.construction)
    }

    /// Bare class name for vtables.
    pub fn class_name(&self) -> Option<&str>
    {
        self.vtable.as_ref().map(|info| info.class_name.as_str())
    }
}

impl fmt::Display for Symbol
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match &self.vtable {
            Some(info) if info.construction => write!(f, "(cons) {}", info.class_name),
            Some(info) => write!(f, "{}", info.class_name),
            None => write!(f, "{}", self.name),
        }
    }
}
