//! Virtual-table classification.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::demangle::Demangler;
use crate::error::{ExtractError, Result};
use crate::types::{RawSymbol, Symbol, VTableInfo};

/// Mangled-name prefixes of vtables (`_ZTV`) and construction vtables (`_ZTC`).
pub const VTABLE_PREFIXES: [&str; 2] = ["_ZTV", "_ZTC"];

/// Prefix added to vtable names by the dispatch-protection instrumentation.
/// It is removed before the name is demangled.
pub const INSTRUMENTED_PREFIX: &str = "_SD";

/// Substring of compiler-runtime names (`__cxxabiv1::...`) whose vtables are
/// never reported.
pub const INTERNAL_MARKER: &str = "__cxx";

static RE_VTABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(construction )?vtable for (.*)$").expect("valid vtable name regex"));

/// Linkage name of a vtable symbol, or `None` if the name does not denote one.
///
/// ```rust
/// use vtdump_core::symbols::vtable_linkage_name;
///
/// assert_eq!(vtable_linkage_name("_ZTV1A"), Some("_ZTV1A"));
/// assert_eq!(vtable_linkage_name("_SD_ZTC1D0_1B"), Some("_ZTC1D0_1B"));
/// assert_eq!(vtable_linkage_name("_ZTI1A"), None);
/// assert_eq!(vtable_linkage_name("_ZTVN10__cxxabiv117__class_type_infoE"), None);
/// ```
pub fn vtable_linkage_name(raw: &str) -> Option<&str>
{
    let name = raw.strip_prefix(INSTRUMENTED_PREFIX).unwrap_or(raw);
    if !VTABLE_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return None;
    }
    if name.contains(INTERNAL_MARKER) {
        return None;
    }
    Some(name)
}

/// Split a demangled vtable name into class name and construction flag.
pub fn parse_vtable_name(demangled: &str) -> Option<VTableInfo>
{
    let caps = RE_VTABLE_NAME.captures(demangled)?;
    Some(VTableInfo {
        class_name: caps[2].to_string(),
        construction: caps.get(1).is_some(),
    })
}

/// Turns raw symbols into classified symbols.
pub struct SymbolClassifier<'a>
{
    demangler: &'a dyn Demangler,
}

impl<'a> SymbolClassifier<'a>
{
    pub fn new(demangler: &'a dyn Demangler) -> Self
    {
        Self { demangler }
    }

    /// Classify one symbol.
    ///
    /// Only symbols that qualify as vtables are demangled.
    ///
    /// ## Errors
    ///
    /// [`ExtractError::ClassificationInconsistency`] when a vtable name does
    /// not demangle to `vtable for ...` or `construction vtable for ...`.
    pub fn classify(&self, raw: RawSymbol) -> Result<Symbol>
    {
        if raw.section_id == 0 {
            return Ok(Symbol::plain(raw));
        }
        let Some(name) = vtable_linkage_name(&raw.name).map(str::to_string) else {
            return Ok(Symbol::plain(raw));
        };

        let demangled = self.demangler.demangle(&name);
        let info = parse_vtable_name(&demangled).ok_or_else(|| ExtractError::ClassificationInconsistency {
            symbol: name.clone(),
            demangled: demangled.clone(),
        })?;
        trace!(symbol = %name, class = %info.class_name, construction = info.construction, "classified vtable");

        Ok(Symbol::vtable(raw, name, demangled, info))
    }

    /// Classify every symbol, stopping at the first inconsistency.
    pub fn classify_all(&self, raws: impl IntoIterator<Item = RawSymbol>) -> Result<Vec<Symbol>>
    {
        raws.into_iter().map(|raw| self.classify(raw)).collect()
    }
}

/// Class-name allow-list for the vtable view.
///
/// An empty filter allows every class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter
{
    names: HashSet<String>,
}

impl ClassFilter
{
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool
    {
        self.names.is_empty()
    }

    /// Whether a vtable symbol belongs in the filtered view.
    pub fn allows(&self, symbol: &Symbol) -> bool
    {
        match symbol.class_name() {
            Some(class) => self.names.is_empty() || self.names.contains(class),
            None => false,
        }
    }
}
