//! Relocation listing reader.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::numbers::{parse_hex, parse_signed_hex};
use crate::types::{RelocationEntry, RelocationTable};

static RE_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Relocation section '([^ ']*)' at offset").expect("valid relocation declaration regex"));

static RE_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-fA-F]+").expect("valid relocation entry regex"));

/// Parse a relocation listing into one table per relocation section.
///
/// A declaration line opens a new table; entry lines (those starting with a
/// hex offset) are collected into the open table until the next declaration
/// or the end of the input. Columns of an entry are
/// `Offset Info Type SymValue SymName + Addend`; the trailing columns are
/// joined without separators and read as a signed hex addend.
///
/// Entries that cannot be read, such as those without a symbol column, are
/// skipped.
pub fn parse_relocations(text: &str) -> Vec<RelocationTable>
{
    let mut tables = Vec::new();
    let mut current: Option<RelocationTable> = None;

    for line in text.lines() {
        if let Some(caps) = RE_DECLARATION.captures(line) {
            if let Some(done) = current.take() {
                tables.push(done);
            }
            current = Some(RelocationTable::new(&caps[1]));
            continue;
        }

        let Some(table) = current.as_mut() else {
            continue;
        };
        if !RE_ENTRY.is_match(line) {
            continue;
        }
        match parse_entry(line) {
            Some(entry) => table.entries.push(entry),
            None => trace!(line, "skipping unreadable relocation entry"),
        }
    }

    if let Some(done) = current {
        tables.push(done);
    }
    tables
}

fn parse_entry(line: &str) -> Option<RelocationEntry>
{
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() < 6 {
        return None;
    }
    let offset = parse_hex(cols[0])?;
    let addend = parse_signed_hex(&cols[5..].concat())?;
    Some(RelocationEntry::new(offset, cols[4], addend))
}

#[cfg(test)]
mod tests
{
    use super::*;

    const LISTING: &str = "\

Relocation section '.rela.text' at offset 0x4d0 contains 1 entry:
    Offset             Info             Type               Symbol's Value  Symbol's Name + Addend
0000000000000007  0000000900000002 R_X86_64_PC32          0000000000000000 .rodata - 4

Relocation section '.rela.data.rel.ro' at offset 0x520 contains 3 entries:
    Offset             Info             Type               Symbol's Value  Symbol's Name + Addend
0000000000000008  0000000c00000001 R_X86_64_64            0000000000000000 _ZTI1A + 0
0000000000000010  0000000d00000001 R_X86_64_64            0000000000000000 _ZN1AD1Ev + 0
0000000000000018  0000000300000001 R_X86_64_64            0000000000000000 .text + 30
";

    #[test]
    fn test_parse_relocations_groups_by_section()
    {
        let tables = parse_relocations(LISTING);
        assert_eq!(tables.len(), 2);

        assert_eq!(tables[0].section_name, ".rela.text");
        assert_eq!(tables[0].entries, vec![RelocationEntry::new(7u64, ".rodata", -4)]);

        assert_eq!(tables[1].section_name, ".rela.data.rel.ro");
        assert_eq!(tables[1].entries.len(), 3);
        assert_eq!(tables[1].entries[0], RelocationEntry::new(8u64, "_ZTI1A", 0));
        assert_eq!(tables[1].entries[2], RelocationEntry::new(0x18u64, ".text", 0x30));
        assert!(tables[1].entries[2].is_section_relative());
    }

    #[test]
    fn test_entries_before_any_declaration_are_ignored()
    {
        let tables = parse_relocations("0000000000000008  0000000c00000001 R_X86_64_64 0000000000000000 _ZTI1A + 0\n");
        assert!(tables.is_empty());
    }

    #[test]
    fn test_entry_without_symbol_is_skipped()
    {
        let text = "Relocation section '.rela.dyn' at offset 0x10 contains 1 entry:\n\
                    0000000000003df0  0000000000000008 R_X86_64_RELATIVE                    1130\n";
        let tables = parse_relocations(text);
        assert_eq!(tables.len(), 1);
        assert!(tables[0].entries.is_empty());
    }

    #[test]
    fn test_no_relocations()
    {
        assert!(parse_relocations("\nThere are no relocations in this file.\n").is_empty());
    }
}
