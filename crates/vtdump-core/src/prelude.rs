//! Common module for library exports

pub use crate::config::{ArtifactMode, ExtractorConfig};
pub use crate::error::{ExtractError, Result};
pub use crate::extractor::VTableExtractor;
pub use crate::inspector::{create_inspector, BinaryInspector, Listing, ReadelfInspector};
pub use crate::symbols::{Demangler, ItaniumDemangler};
pub use crate::types::address::Address;
pub use crate::types::{RawSymbol, RelocationEntry, RelocationTable, Section, SectionId, Symbol, VTableInfo};
