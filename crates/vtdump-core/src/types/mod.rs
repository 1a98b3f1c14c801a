//! # Types
//!
//! Typed records for everything read out of an ELF artifact.
//!
//! Each entity the inspector reports (sections, symbols, relocations) gets
//! its own record with a fixed set of fields, so the rest of the extractor
//! never deals with loosely shaped text columns.

pub mod address;
pub mod relocation;
pub mod section;
pub mod symbols;

// Re-export all public types
pub use address::Address;
pub use relocation::{RelocationEntry, RelocationTable};
pub use section::{Section, SectionId};
pub use symbols::{RawSymbol, Symbol, VTableInfo};
