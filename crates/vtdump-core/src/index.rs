//! # Cross-Reference Index
//!
//! Lookup tables over the sections and classified symbols of one artifact.
//!
//! The index is built once, after classification, and never changes. Every
//! lookup that can miss returns an `Option`; deciding whether a miss matters
//! is up to the caller.
//!
//! ## Lookups
//!
//! - section by name and by id
//! - symbol by name and by address (first symbol wins on collisions)
//! - vtables by owning section, restricted to the class allow-list
//! - aliases: every symbol name seen at a `(section, address)` pair, including
//!   the duplicates that deduplication dropped

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::symbols::{vtable_linkage_name, ClassFilter};
use crate::types::{Address, RawSymbol, Section, SectionId, Symbol};

/// Read-only cross-reference tables for one artifact.
#[derive(Debug, Default)]
pub struct SymbolIndex
{
    sections: Vec<Section>,
    symbols: Vec<Symbol>,
    sections_by_name: HashMap<String, usize>,
    sections_by_id: HashMap<SectionId, usize>,
    symbols_by_name: HashMap<String, usize>,
    symbols_by_address: HashMap<Address, usize>,
    vtables_by_section: BTreeMap<SectionId, Vec<usize>>,
    aliases: HashMap<(SectionId, Address), Vec<String>>,
}

impl SymbolIndex
{
    /// Build the index.
    ///
    /// `symbols` are the deduplicated, classified symbols in discovery order.
    /// `all_symbols` is the reader output before deduplication and only feeds
    /// the alias table.
    pub fn new(sections: Vec<Section>, symbols: Vec<Symbol>, all_symbols: &[RawSymbol], filter: &ClassFilter) -> Self
    {
        let mut sections_by_name = HashMap::new();
        let mut sections_by_id = HashMap::new();
        for (i, section) in sections.iter().enumerate() {
            sections_by_name.entry(section.name.clone()).or_insert(i);
            sections_by_id.entry(section.id).or_insert(i);
        }

        let mut symbols_by_name = HashMap::new();
        let mut symbols_by_address = HashMap::new();
        let mut vtables_by_section: BTreeMap<SectionId, Vec<usize>> = BTreeMap::new();
        for (i, symbol) in symbols.iter().enumerate() {
            symbols_by_name.entry(symbol.name().to_string()).or_insert(i);
            symbols_by_address.entry(symbol.address()).or_insert(i);
            if filter.allows(symbol) {
                vtables_by_section.entry(symbol.section_id()).or_default().push(i);
            }
        }

        let mut aliases: HashMap<(SectionId, Address), Vec<String>> = HashMap::new();
        for raw in all_symbols {
            let name = vtable_linkage_name(&raw.name).unwrap_or(&raw.name);
            let names = aliases.entry((raw.section_id, raw.address)).or_default();
            if !names.iter().any(|known| known == name) {
                names.push(name.to_string());
            }
        }

        let index = Self {
            sections,
            symbols,
            sections_by_name,
            sections_by_id,
            symbols_by_name,
            symbols_by_address,
            vtables_by_section,
            aliases,
        };
        debug!(
            sections = index.sections.len(),
            symbols = index.symbols.len(),
            vtables = index.vtable_count(),
            vtable_sections = index.vtables_by_section.len(),
            "built symbol index"
        );
        index
    }

    /// All sections in listing order.
    pub fn sections(&self) -> &[Section]
    {
        &self.sections
    }

    /// All classified symbols in discovery order.
    pub fn symbols(&self) -> &[Symbol]
    {
        &self.symbols
    }

    pub fn section_by_name(&self, name: &str) -> Option<&Section>
    {
        self.sections_by_name.get(name).map(|&i| &self.sections[i])
    }

    pub fn section_by_id(&self, id: SectionId) -> Option<&Section>
    {
        self.sections_by_id.get(&id).map(|&i| &self.sections[i])
    }

    pub fn symbol_by_name(&self, name: &str) -> Option<&Symbol>
    {
        self.symbols_by_name.get(name).map(|&i| &self.symbols[i])
    }

    pub fn symbol_by_address(&self, address: Address) -> Option<&Symbol>
    {
        self.symbols_by_address.get(&address).map(|&i| &self.symbols[i])
    }

    /// Ids of sections owning at least one selected vtable, ascending.
    pub fn vtable_sections(&self) -> impl Iterator<Item = SectionId> + '_
    {
        self.vtables_by_section.keys().copied()
    }

    /// Selected vtables of one section, in discovery order.
    pub fn vtables_in(&self, section: SectionId) -> impl Iterator<Item = &Symbol> + '_
    {
        self.vtables_by_section
            .get(&section)
            .into_iter()
            .flatten()
            .map(|&i| &self.symbols[i])
    }

    /// Every selected vtable in render order: by section, then discovery.
    pub fn vtables(&self) -> impl Iterator<Item = &Symbol> + '_
    {
        self.vtables_by_section.values().flatten().map(|&i| &self.symbols[i])
    }

    pub fn vtable_count(&self) -> usize
    {
        self.vtables_by_section.values().map(Vec::len).sum()
    }

    /// Names of every symbol defined at `address` in `section`.
    pub fn aliases_at(&self, section: SectionId, address: Address) -> &[String]
    {
        self.aliases
            .get(&(section, address))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
