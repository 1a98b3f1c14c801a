//! Symbol table listing reader.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::numbers::{parse_hex, parse_number};
use crate::types::RawSymbol;

/// Name markers a symbol line must contain to be read at all.
///
/// Plain C symbols can never be vtables or their targets of interest, so
/// everything that is not an Itanium name (or one of its instrumented forms)
/// is dropped before column parsing.
static RE_NAME_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i) (_Z|_SD_Z|_SVT_Z)").expect("valid symbol name marker regex"));

/// Parse a symbol table listing.
///
/// Columns: `Num: Value Size Type Bind Vis Ndx Name`. Lines without a name
/// marker, with fewer than eight columns, or whose section index is not a
/// positive number (`UND`, `ABS`, `COM`, `0`) are skipped.
///
/// Every surviving line is returned, aliases included; see [`deduplicate`].
pub fn parse_symbols(text: &str) -> Vec<RawSymbol>
{
    let mut symbols = Vec::new();
    for line in text.lines() {
        if !RE_NAME_MARKER.is_match(line) {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 8 {
            continue;
        }
        let Some(section_id) = cols[6].parse::<u32>().ok().filter(|id| *id > 0) else {
            continue;
        };
        let (Some(address), Some(size)) = (parse_hex(cols[1]), parse_number(cols[2])) else {
            trace!(line, "skipping symbol line with unreadable numbers");
            continue;
        };
        symbols.push(RawSymbol::new(address, size, section_id, cols[7]));
    }
    symbols
}

/// Keep only the first symbol for every `(address, section)` pair.
///
/// Several names at one place are aliases of one object (complete and base
/// object constructors, versioned names, the same symbol listed in both
/// `.dynsym` and `.symtab`), not distinct objects.
pub fn deduplicate(symbols: &[RawSymbol]) -> Vec<RawSymbol>
{
    let mut seen = HashSet::new();
    symbols
        .iter()
        .filter(|sym| seen.insert((sym.address, sym.section_id)))
        .cloned()
        .collect()
}
