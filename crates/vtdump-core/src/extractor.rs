//! # Extractor
//!
//! The pipeline that ties everything together:
//!
//! 1. read section headers and the symbol table through the inspector
//! 2. deduplicate and classify symbols
//! 3. build the [`SymbolIndex`]
//! 4. (object files) build the [`RelocationResolver`]
//! 5. fetch one hex dump per vtable section and render every vtable
//!
//! Steps 1–3 happen in [`VTableExtractor::load`]; steps 4–5 in
//! [`VTableExtractor::write_report`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use vtdump_core::prelude::*;
//!
//! let config = ExtractorConfig::default();
//! let inspector = create_inspector(&config.readelf);
//! let demangler = ItaniumDemangler::new();
//!
//! let extractor = VTableExtractor::load("shapes.o", config, inspector.as_ref(), &demangler)?;
//! extractor.write_report(&mut std::io::stdout().lock())?;
//! # Ok::<(), vtdump_core::error::ExtractError>(())
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::artifact::detect_mode;
use crate::config::{ArtifactMode, ExtractorConfig};
use crate::error::{ExtractError, Result};
use crate::index::SymbolIndex;
use crate::inspector::BinaryInspector;
use crate::metadata::{deduplicate, parse_hex_dump, parse_relocations, parse_sections, parse_symbols};
use crate::render::{RenderOptions, Resolution, VTableRenderer};
use crate::resolver::RelocationResolver;
use crate::symbols::{ClassFilter, Demangler, SymbolClassifier};
use crate::types::Symbol;

/// Loaded view of one artifact.
pub struct VTableExtractor<'a>
{
    path: PathBuf,
    config: ExtractorConfig,
    mode: ArtifactMode,
    inspector: &'a dyn BinaryInspector,
    demangler: &'a dyn Demangler,
    index: SymbolIndex,
}

impl<'a> VTableExtractor<'a>
{
    /// Read and classify the metadata of the artifact at `path`.
    ///
    /// ## Errors
    ///
    /// - [`ExtractError::ToolInvocation`] if a listing cannot be produced
    /// - [`ExtractError::ClassificationInconsistency`] if a vtable name does
    ///   not demangle as one
    pub fn load(
        path: impl AsRef<Path>,
        config: ExtractorConfig,
        inspector: &'a dyn BinaryInspector,
        demangler: &'a dyn Demangler,
    ) -> Result<Self>
    {
        let path = path.as_ref().to_path_buf();
        info!(file = %path.display(), "Loading artifact metadata");

        let sections = parse_sections(&inspector.section_headers(&path)?);
        debug!(count = sections.len(), "read sections");

        let all_symbols = parse_symbols(&inspector.symbol_table(&path)?);
        let unique = deduplicate(&all_symbols);
        debug!(read = all_symbols.len(), unique = unique.len(), "read symbols");

        let symbols = SymbolClassifier::new(demangler).classify_all(unique)?;
        let filter = ClassFilter::new(config.classes.iter().cloned());
        let index = SymbolIndex::new(sections, symbols, &all_symbols, &filter);

        let mode = detect_mode(&path, config.mode);
        info!(mode = %mode, vtables = index.vtable_count(), "Metadata loaded");

        Ok(Self {
            path,
            config,
            mode,
            inspector,
            demangler,
            index,
        })
    }

    /// Artifact being inspected.
    pub fn path(&self) -> &Path
    {
        &self.path
    }

    pub fn config(&self) -> &ExtractorConfig
    {
        &self.config
    }

    /// Resolution mode in effect; never [`ArtifactMode::Auto`].
    pub fn mode(&self) -> ArtifactMode
    {
        self.mode
    }

    pub fn index(&self) -> &SymbolIndex
    {
        &self.index
    }

    /// Selected vtables in report order.
    pub fn vtables(&self) -> impl Iterator<Item = &Symbol> + '_
    {
        self.index.vtables()
    }

    /// Render every selected vtable to `out`.
    ///
    /// ## Errors
    ///
    /// - [`ExtractError::ToolInvocation`] if a listing cannot be produced
    /// - [`ExtractError::MissingSectionReference`] if relocation data names
    ///   an unknown section
    /// - [`ExtractError::Io`] if writing fails
    pub fn write_report(&self, out: &mut dyn Write) -> Result<()>
    {
        if self.index.vtable_count() == 0 {
            info!(file = %self.path.display(), "No vtables to report");
            return Ok(());
        }

        let resolver = match self.mode {
            ArtifactMode::Object => {
                info!("Reading relocations");
                let tables = parse_relocations(&self.inspector.relocations(&self.path)?);
                debug!(tables = tables.len(), "read relocation tables");
                Some(RelocationResolver::new(tables, &self.index)?)
            }
            ArtifactMode::Linked | ArtifactMode::Auto => None,
        };
        let resolution = match &resolver {
            Some(resolver) => Resolution::Object(resolver),
            None => Resolution::Linked,
        };

        let options = RenderOptions {
            pointer_threshold: self.config.pointer_threshold,
            demangle_targets: self.config.demangle_targets,
        };
        let renderer = VTableRenderer::new(&self.index, resolution, self.demangler, options);

        for section_id in self.index.vtable_sections() {
            let section = self
                .index
                .section_by_id(section_id)
                .ok_or_else(|| ExtractError::MissingSectionReference(format!("[{section_id}]")))?;

            let dump = parse_hex_dump(&self.inspector.hex_dump(&self.path, section_id)?);
            debug!(section = %section.name, lines = dump.len(), "read hex dump");

            for vtable in self.index.vtables_in(section_id) {
                renderer.render(out, vtable, section, &dump)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
