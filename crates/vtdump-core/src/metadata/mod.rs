//! # Metadata Readers
//!
//! Parsers for the text listings produced by a
//! [`BinaryInspector`](crate::inspector::BinaryInspector).
//!
//! Every reader works line by line with positional columns. Lines that do not
//! look like records are skipped without complaint: verbose tool output is
//! full of headers, legends and blank lines.
//!
//! - [`sections`]: section header table
//! - [`symbols`]: symbol table, with the name-marker filter and deduplication
//! - [`relocations`]: relocation tables grouped by relocation section
//! - [`hexdump`]: section hex dumps and the byte-order inversion of slot text
//! - [`numbers`]: numeric column helpers shared by the above

pub mod hexdump;
pub mod numbers;
pub mod relocations;
pub mod sections;
pub mod symbols;

pub use hexdump::{decode_slot, parse_hex_dump, swap_byte_order, DumpLine};
pub use numbers::{parse_number, parse_signed_hex};
pub use relocations::parse_relocations;
pub use sections::parse_sections;
pub use symbols::{deduplicate, parse_symbols};
