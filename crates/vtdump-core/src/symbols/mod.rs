//! # Symbols
//!
//! Demangling and virtual-table classification.
//!
//! Classification is an explicit pass over the raw symbols the reader
//! produced. Only symbols that qualify as vtables are ever demangled, so a
//! large symbol table costs one prefix check per entry.

pub mod classify;
pub mod demangle;

pub use classify::{parse_vtable_name, vtable_linkage_name, ClassFilter, SymbolClassifier};
pub use demangle::{Demangler, ItaniumDemangler, PURE_VIRTUAL_THUNK};
