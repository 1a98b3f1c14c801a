//! # VTable Renderer
//!
//! Turns one vtable and the hex dump of its section into report text.
//!
//! ## Output
//!
//! ```text
//! HEXDUMP for A
//! 0x401e10 to 0x401e28
//! 0  : 401e10: 00000000 00000000 => 0
//! 1  : 401e18: 10204000 00000000 => _ZN1A3fooEv
//! 2  : 401e20: 30204000 00000000 => _ZN1AD1Ev
//!
//! ```
//!
//! Linked artifacts print the slot index and address; object files print the
//! slot's position in the file instead of an index:
//!
//! ```text
//! HEXDUMP for (cons) B-in-D
//! 0x0 to 0x18
//! 0x2a0: 00000000 00000000 => 0
//! 0x2a8: 00000000 00000000 => _ZTI1B
//! 0x2b0: 00000000 00000000 => _ZN1B3fooEv
//!
//! ```
//!
//! ## Slot resolution
//!
//! - **Linked**: the slot value is looked up by address in the symbol index.
//! - **Object**: the relocation patching the slot is resolved; slots without
//!   one show their literal value.
//!
//! Literal values at or above the pointer threshold are printed in hex,
//! everything else in decimal.

pub mod slots;

use std::io::Write;

use crate::error::Result;
use crate::index::SymbolIndex;
use crate::metadata::{decode_slot, DumpLine};
use crate::resolver::{RelocationResolver, RelocationTarget, UNRESOLVED_PLACEHOLDER};
use crate::symbols::Demangler;
use crate::types::{Address, Section, Symbol};

pub use slots::{Slot, SlotWalker, SLOT_SIZE};

/// Strategy for turning slot values into targets.
pub enum Resolution<'a>
{
    /// Slot values are final addresses
    Linked,
    /// Slot values come from relocation entries
    Object(&'a RelocationResolver<'a>),
}

/// Formatting switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions
{
    /// Hex/decimal cut-off for literal values
    pub pointer_threshold: u64,
    /// Demangle symbol names in the target column
    pub demangle_targets: bool,
}

/// Format a literal slot value.
///
/// ```rust
/// use vtdump_core::render::format_value;
///
/// assert_eq!(format_value(0x401e10, 0x400000), "0x401e10");
/// assert_eq!(format_value(16, 0x400000), "16");
/// assert_eq!(format_value(-16, 0x400000), "-16");
/// ```
pub fn format_value(value: i64, threshold: u64) -> String
{
    if i128::from(value) >= i128::from(threshold) {
        format!("0x{value:x}")
    } else {
        value.to_string()
    }
}

/// Header lines of one vtable.
pub fn write_header(out: &mut dyn Write, vtable: &Symbol) -> Result<()>
{
    writeln!(out, "HEXDUMP for {vtable}")?;
    writeln!(out, "0x{:x} to 0x{:x}", vtable.address(), vtable.end())?;
    Ok(())
}

/// Renders vtables against one symbol index.
pub struct VTableRenderer<'a>
{
    index: &'a SymbolIndex,
    resolution: Resolution<'a>,
    demangler: &'a dyn Demangler,
    options: RenderOptions,
}

impl<'a> VTableRenderer<'a>
{
    pub fn new(
        index: &'a SymbolIndex,
        resolution: Resolution<'a>,
        demangler: &'a dyn Demangler,
        options: RenderOptions,
    ) -> Self
    {
        Self {
            index,
            resolution,
            demangler,
            options,
        }
    }

    /// Render one vtable: header, one line per slot, blank line.
    ///
    /// `dump` is the parsed hex dump of `section`, the vtable's owning
    /// section.
    pub fn render(&self, out: &mut dyn Write, vtable: &Symbol, section: &Section, dump: &[DumpLine]) -> Result<()>
    {
        write_header(out, vtable)?;

        for slot in SlotWalker::new(dump, vtable.address(), vtable.size()) {
            let target = self.target(section, &slot)?;
            let [w0, w1] = slot.words;
            match self.resolution {
                Resolution::Linked => {
                    writeln!(out, "{:<3}: {:x}: {w0} {w1} => {target}", slot.index, slot.address)?;
                }
                Resolution::Object(_) => {
                    let position = slot.address.saturating_add(section.file_offset);
                    writeln!(out, "0x{position:x}: {w0} {w1} => {target}")?;
                }
            }
        }

        writeln!(out)?;
        Ok(())
    }

    /// Text of the target column for one slot.
    fn target(&self, section: &Section, slot: &Slot<'_>) -> Result<String>
    {
        let value = decode_slot(&slot.words);

        match self.resolution {
            Resolution::Linked => {
                let symbol = value
                    .and_then(Address::from_slot)
                    .and_then(|address| self.index.symbol_by_address(address));
                Ok(match symbol {
                    Some(symbol) => self.symbol_name(symbol.name()),
                    None => self.literal(value),
                })
            }
            Resolution::Object(resolver) => match resolver.resolve_at(section.id, slot.address)? {
                Some(target) => Ok(self.relocation_target(&target)),
                None => Ok(self.literal(value)),
            },
        }
    }

    fn literal(&self, value: Option<i64>) -> String
    {
        value.map_or_else(
            || UNRESOLVED_PLACEHOLDER.to_string(),
            |value| format_value(value, self.options.pointer_threshold),
        )
    }

    fn symbol_name(&self, name: &str) -> String
    {
        if self.options.demangle_targets {
            self.demangler.demangle(name)
        } else {
            name.to_string()
        }
    }

    fn relocation_target(&self, target: &RelocationTarget) -> String
    {
        match target.symbol_name() {
            Some(name) if self.options.demangle_targets => target.with_name(self.symbol_name(name)).to_string(),
            _ => target.to_string(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::metadata::parse_hex_dump;
    use crate::symbols::{ClassFilter, ItaniumDemangler, SymbolClassifier};
    use crate::types::{RawSymbol, RelocationEntry, RelocationTable};

    const OPTIONS: RenderOptions = RenderOptions {
        pointer_threshold: 0x400000,
        demangle_targets: false,
    };

    fn index(sections: Vec<Section>, raws: Vec<RawSymbol>) -> SymbolIndex
    {
        let demangler = ItaniumDemangler::new();
        let symbols = SymbolClassifier::new(&demangler)
            .classify_all(raws.iter().cloned())
            .unwrap();
        SymbolIndex::new(sections, symbols, &raws, &ClassFilter::default())
    }

    fn render(renderer: &VTableRenderer<'_>, index: &SymbolIndex, dump: &str) -> String
    {
        let lines = parse_hex_dump(dump);
        let mut out = Vec::new();
        for vtable in index.vtables() {
            let section = index.section_by_id(vtable.section_id()).unwrap();
            renderer.render(&mut out, vtable, section, &lines).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_value_threshold()
    {
        assert_eq!(format_value(0x3fffff, 0x400000), "4194303");
        assert_eq!(format_value(0x400000, 0x400000), "0x400000");
        assert_eq!(format_value(0, 0x400000), "0");
        assert_eq!(format_value(255, 0x10), "0xff");
        assert_eq!(format_value(i64::MIN, 0), i64::MIN.to_string());
    }

    #[test]
    fn test_linked_vtable()
    {
        let index = index(
            vec![
                Section::new(".text", 1, "PROGBITS", 0x1000, 0x2000),
                Section::new(".data.rel.ro", 3, "PROGBITS", 0x1000, 0x100),
            ],
            vec![
                RawSymbol::new(0x2000u64, 4, 1, "f"),
                RawSymbol::new(0x1000u64, 16, 3, "_ZTV1A"),
            ],
        );
        let demangler = ItaniumDemangler::new();
        let renderer = VTableRenderer::new(&index, Resolution::Linked, &demangler, OPTIONS);

        let text = render(&renderer, &index, "  0x00001000 00200000 00000000 00000000 00000000 . ..............\n");
        assert_eq!(
            text,
            "HEXDUMP for A\n\
             0x1000 to 0x1010\n\
             0  : 1000: 00200000 00000000 => f\n\
             1  : 1008: 00000000 00000000 => 0\n\
             \n"
        );
    }

    #[test]
    fn test_linked_literals_and_negatives()
    {
        let index = index(
            vec![Section::new(".data.rel.ro", 3, "PROGBITS", 0x1000, 0x100)],
            vec![RawSymbol::new(0x1000u64, 16, 3, "_ZTV1A")],
        );
        let demangler = ItaniumDemangler::new();
        let renderer = VTableRenderer::new(&index, Resolution::Linked, &demangler, OPTIONS);

        let text = render(&renderer, &index, "  0x00001000 f0ffffff ffffffff 10204000 00000000 ................\n");
        assert!(text.contains("0  : 1000: f0ffffff ffffffff => -16\n"), "{text}");
        assert!(text.contains("1  : 1008: 10204000 00000000 => 0x402010\n"), "{text}");
    }

    #[test]
    fn test_object_vtable()
    {
        let index = index(
            vec![
                Section::new(".text", 1, "PROGBITS", 0x40, 0x100),
                Section::new(".data.rel.ro", 5, "PROGBITS", 0x2a0, 0x18),
                Section::new(".rela.data.rel.ro", 6, "RELA", 0x700, 0x30),
            ],
            vec![RawSymbol::new(0u64, 0x18, 5, "_ZTV1A")],
        );
        let tables = vec![RelocationTable {
            section_name: ".rela.data.rel.ro".to_string(),
            entries: vec![
                RelocationEntry::new(8u64, "_ZTI1A", 0),
                RelocationEntry::new(16u64, "_ZN1AD0Ev", 0),
            ],
        }];
        let resolver = RelocationResolver::new(tables, &index).unwrap();
        let demangler = ItaniumDemangler::new();
        let renderer = VTableRenderer::new(&index, Resolution::Object(&resolver), &demangler, OPTIONS);

        let text = render(
            &renderer,
            &index,
            "  0x00000000 00000000 00000000 00000000 00000000 ................\n  0x00000010 00000000 00000000          ........\n",
        );
        assert_eq!(
            text,
            "HEXDUMP for A\n\
             0x0 to 0x18\n\
             0x2a0: 00000000 00000000 => 0\n\
             0x2a8: 00000000 00000000 => _ZTI1A\n\
             0x2b0: 00000000 00000000 => _ZN1AD0Ev\n\
             \n"
        );
    }

    #[test]
    fn test_demangled_targets()
    {
        let index = index(
            vec![
                Section::new(".data.rel.ro", 5, "PROGBITS", 0x100, 0x10),
                Section::new(".rela.data.rel.ro", 6, "RELA", 0x700, 0x30),
            ],
            vec![RawSymbol::new(0u64, 0x10, 5, "_ZTC1D0_1B")],
        );
        let tables = vec![RelocationTable {
            section_name: ".rela.data.rel.ro".to_string(),
            entries: vec![RelocationEntry::new(8u64, "_ZN1AD0Ev", 0x10)],
        }];
        let resolver = RelocationResolver::new(tables, &index).unwrap();
        let demangler = ItaniumDemangler::new();
        let options = RenderOptions {
            demangle_targets: true,
            ..OPTIONS
        };
        let renderer = VTableRenderer::new(&index, Resolution::Object(&resolver), &demangler, options);

        let text = render(&renderer, &index, "  0x00000000 00000000 00000000 00000000 00000000 ................\n");
        assert!(text.starts_with("HEXDUMP for (cons) B-in-D\n"), "{text}");
        assert!(text.contains("0x108: 00000000 00000000 => A::~A()+0x10\n"), "{text}");
    }
}
