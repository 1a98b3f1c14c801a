//! Section hex dump reader and slot decoding.
//!
//! `readelf -x` prints a section as lines of up to sixteen bytes:
//!
//! ```text
//!   0x00000010 00000000 00000000 10204000 00000000 ......... @.....
//! ```
//!
//! The leading number is the address of the first byte (a section offset in
//! object files, a virtual address in linked files), followed by up to four
//! groups of four bytes in file order and an ASCII rendering. On a
//! little-endian target a pointer-sized slot is two consecutive groups whose
//! bytes have to be reversed to read the value.

use once_cell::sync::Lazy;
use regex::Regex;

use super::numbers::parse_hex;
use crate::types::Address;

/// Byte groups per dump line.
pub const WORDS_PER_LINE: usize = 4;

/// Byte groups per pointer-sized slot.
pub const WORDS_PER_SLOT: usize = 2;

static RE_DUMP_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*0x([0-9a-fA-F]+)\s+(.*)$").expect("valid hex dump line regex"));

/// One line of a section hex dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine
{
    /// Address of the first byte on the line
    pub address: Address,
    /// Byte groups in file order, as printed
    pub words: Vec<String>,
}

/// Parse a hex dump listing.
///
/// Only the byte groups are kept; the ASCII column and any headers are
/// dropped.
pub fn parse_hex_dump(text: &str) -> Vec<DumpLine>
{
    text.lines()
        .filter_map(|line| {
            let caps = RE_DUMP_LINE.captures(line)?;
            let address = parse_hex(&caps[1])?;
            let words = caps[2]
                .split_whitespace()
                .take_while(|word| is_byte_group(word))
                .take(WORDS_PER_LINE)
                .map(str::to_string)
                .collect();
            Some(DumpLine {
                address: Address::new(address),
                words,
            })
        })
        .collect()
}

fn is_byte_group(word: &str) -> bool
{
    !word.is_empty() && word.len() <= 8 && word.len() % 2 == 0 && word.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Reverse the byte order of a hex string (`"10204000"` → `"00402010"`).
///
/// Returns `None` for strings that are not whole bytes. Applying the
/// transform twice yields the input.
///
/// ```rust
/// use vtdump_core::metadata::swap_byte_order;
///
/// let swapped = swap_byte_order("1020400000000000").unwrap();
/// assert_eq!(swapped, "0000000000402010");
/// assert_eq!(swap_byte_order(&swapped).unwrap(), "1020400000000000");
/// ```
pub fn swap_byte_order(hex: &str) -> Option<String>
{
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    let mut out = String::with_capacity(hex.len());
    for pair in hex.as_bytes().rchunks(2) {
        out.push(char::from(pair[0]));
        out.push(char::from(pair[1]));
    }
    Some(out)
}

/// Decode the byte groups of one slot into a signed integer.
///
/// The groups are concatenated, byte-reversed and read as a two's-complement
/// number whose width is the number of digits: when the high bit of the most
/// significant nibble is set the value is negative.
///
/// ```rust
/// use vtdump_core::metadata::decode_slot;
///
/// assert_eq!(decode_slot(&["10204000", "00000000"]), Some(0x402010));
/// assert_eq!(decode_slot(&["f0ffffff", "ffffffff"]), Some(-16));
/// ```
pub fn decode_slot<S: AsRef<str>>(words: &[S]) -> Option<i64>
{
    let joined: String = words.iter().map(AsRef::as_ref).collect();
    if joined.is_empty() || joined.len() > 16 || !joined.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let swapped = swap_byte_order(&joined)?;
    let value = u64::from_str_radix(&swapped, 16).ok()?;

    let bits = swapped.len() * 4;
    let sign_bit = 1u128 << (bits - 1);
    let value = u128::from(value);
    let signed = if value & sign_bit == 0 {
        value as i128
    } else {
        value as i128 - (1i128 << bits)
    };
    i64::try_from(signed).ok()
}
