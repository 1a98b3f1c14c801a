//! # vtdump-core
//!
//! Locate C++ virtual tables in an ELF artifact and resolve every slot.
//!
//! This crate provides the extraction engine, including:
//! - Readers for the textual section, symbol, relocation and hex-dump listings
//! - Vtable classification through the demangler
//! - A cross-reference index over sections and symbols
//! - Relocation resolution for relocatable objects
//! - Rendering of annotated vtable dumps
//!
//! ## Artifact Support
//!
//! - **Linked executables and shared objects**: slot values are final
//!   addresses and are looked up in the symbol table
//! - **Relocatable objects (`.o`)**: slots are resolved through the relocation
//!   entries that patch them
//!
//! ELF structures are never decoded here beyond the file header. All
//! metadata comes from a [`BinaryInspector`](inspector::BinaryInspector),
//! normally `readelf`.

pub mod artifact;
pub mod config;
pub mod error;
pub mod extractor;
pub mod index;
pub mod inspector;
pub mod metadata;
pub mod prelude;
pub mod render;
pub mod resolver;
pub mod symbols;
pub mod types;

pub use config::{ArtifactMode, ExtractorConfig};
// Re-export commonly used types
pub use error::{ExtractError, Result};
pub use extractor::VTableExtractor;
pub use inspector::{create_inspector, BinaryInspector};
pub use types::{Address, Section, SectionId, Symbol};
