//! Tests for the record types

use vtdump_core::types::{Address, RawSymbol, RelocationEntry, Section, Symbol, VTableInfo};

#[test]
fn test_address_from_u64()
{
    let addr = Address::from(0x401e10);
    assert_eq!(addr.value(), 0x401e10);
    let value: u64 = addr.into();
    assert_eq!(value, 0x401e10);
}

#[test]
fn test_address_formatting()
{
    let addr = Address::new(0x401e10);
    assert_eq!(format!("{addr}"), "0x401e10");
    assert_eq!(format!("{addr:x}"), "401e10");
    assert_eq!(format!("{:<8x}|", addr), "401e10  |");
}

#[test]
fn test_address_from_slot()
{
    assert_eq!(Address::from_slot(0x2000), Some(Address::new(0x2000)));
    assert_eq!(Address::from_slot(0), Some(Address::ZERO));
    assert_eq!(Address::from_slot(-16), None);
}

#[test]
fn test_address_ordering()
{
    let low = Address::new(0x1000);
    let high = low + 8;
    assert!(low < high);
    assert_eq!(Address::new(u64::MAX).saturating_add(1), Address::new(u64::MAX));
}

#[test]
fn test_relocation_target_of_sections()
{
    assert_eq!(
        Section::new(".rela.data.rel.ro", 7, "RELA", 0, 0).relocation_target(),
        Some(".data.rel.ro")
    );
    assert_eq!(Section::new(".rel.data", 4, "REL", 0, 0).relocation_target(), Some(".data"));
    assert_eq!(Section::new(".data.rel.ro", 6, "PROGBITS", 0, 0).relocation_target(), None);
    assert_eq!(Section::new(".rela", 2, "RELA", 0, 0).relocation_target(), None);
}

#[test]
fn test_section_relative_entries()
{
    assert!(RelocationEntry::new(8u64, ".text", 0x40).is_section_relative());
    assert!(!RelocationEntry::new(8u64, "_ZN1AD0Ev", 0).is_section_relative());
}

#[test]
fn test_plain_symbol()
{
    let symbol = Symbol::plain(RawSymbol::new(0x2000u64, 12, 1, "_Z1fv"));
    assert_eq!(symbol.name(), "_Z1fv");
    assert_eq!(symbol.raw_name(), "_Z1fv");
    assert_eq!(symbol.end(), Address::new(0x200c));
    assert!(!symbol.is_vtable());
    assert_eq!(symbol.class_name(), None);
    assert_eq!(symbol.to_string(), "_Z1fv");
}

#[test]
fn test_vtable_symbol_display()
{
    let raw = RawSymbol::new(0u64, 0x18, 5, "_SD_ZTC1D0_1B");
    let info = VTableInfo {
        class_name: "B-in-D".to_string(),
        construction: true,
    };
    let symbol = Symbol::vtable(
        raw,
        "_ZTC1D0_1B".to_string(),
        "construction vtable for B-in-D".to_string(),
        info,
    );
    assert!(symbol.is_construction_vtable());
    assert_eq!(symbol.to_string(), "(cons) B-in-D");
    assert_eq!(symbol.raw_name(), "_SD_ZTC1D0_1B");
    assert_eq!(symbol.demangled(), Some("construction vtable for B-in-D"));
}
