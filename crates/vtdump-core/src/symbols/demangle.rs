//! Symbol demangling.
//!
//! The extractor only needs one thing from a demangler: turn a linkage name
//! into something a human can read, and hand the name back unchanged when it
//! cannot. [`Demangler`] is that interface; [`ItaniumDemangler`] is the
//! implementation used by the command-line tool.
//!
//! ## Symbol Mangling
//!
//! - **C++**: Itanium ABI mangling (e.g. `_ZTV1A` → `vtable for A`), handled
//!   by `cpp_demangle`
//! - **Rust**: legacy and v0 schemes (`_ZN...17h<hash>E`, `_R...`), handled by
//!   `rustc_demangle`
//!
//! Versioned names from the dynamic symbol table (`_ZTVSt9exception@GLIBCXX_3.4`)
//! are demangled without their version suffix.
//!
//! ## Virtual-table names
//!
//! Output for `_ZTV` and `_ZTC` names follows `c++filt`:
//!
//! - `_ZTV1A` → `vtable for A`
//! - `_ZTC1D0_1B` → `construction vtable for B-in-D` (base first, then the
//!   class it is constructed in)
//!
//! `cpp_demangle` prints these as `{vtable(A)}` and
//! `construction vtable for D-in-B`, so both are rewritten.

use rustc_demangle::try_demangle;
use tracing::warn;

/// Name the C++ runtime uses for the pure-virtual placeholder slot. It is not
/// a mangled name and is expected to come back unchanged.
pub const PURE_VIRTUAL_THUNK: &str = "__cxa_pure_virtual";

const VTABLE_FOR: &str = "vtable for ";
const CONSTRUCTION_VTABLE_FOR: &str = "construction vtable for ";

/// Mangled name → human-readable name.
///
/// Implementations never fail: a name that cannot be demangled is returned
/// as given.
pub trait Demangler
{
    fn demangle(&self, mangled: &str) -> String;
}

/// Demangler for Itanium C++ names, with Rust names recognised first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItaniumDemangler;

impl ItaniumDemangler
{
    pub fn new() -> Self
    {
        Self
    }

    /// Demangle without any logging; `None` when the name is not recognised.
    pub fn try_demangle(mangled: &str) -> Option<String>
    {
        let name = strip_version(mangled);

        // Legacy Rust names are valid Itanium names too; prefer the Rust
        // rendering, which drops the hash.
        if name.starts_with("_R") || looks_like_rust_legacy(name) {
            if let Ok(demangled) = try_demangle(name) {
                return Some(format!("{demangled:#}"));
            }
        }

        let demangled = demangle_itanium(name)?;
        if name.starts_with("_ZTV") {
            if let Some(class) = vtable_for(&demangled) {
                return Some(format!("{VTABLE_FOR}{class}"));
            }
        }
        if let Some(encoding) = name.strip_prefix("_ZTC") {
            return Some(construction_vtable_for(encoding, &demangled).unwrap_or(demangled));
        }
        Some(demangled)
    }
}

impl Demangler for ItaniumDemangler
{
    fn demangle(&self, mangled: &str) -> String
    {
        if let Some(demangled) = Self::try_demangle(mangled) {
            return demangled;
        }
        if strip_version(mangled) != PURE_VIRTUAL_THUNK {
            warn!(symbol = mangled, "Couldn't demangle the given symbol");
        }
        mangled.to_string()
    }
}

/// Drop an ELF symbol version (`name@VER` or `name@@VER`).
pub fn strip_version(name: &str) -> &str
{
    name.split_once('@').map_or(name, |(base, _)| base)
}

fn demangle_itanium(name: &str) -> Option<String>
{
    let symbol = cpp_demangle::Symbol::new(name).ok()?;
    symbol.demangle(&cpp_demangle::DemangleOptions::default()).ok()
}

/// Class of a demangled `_ZTV` name, in either wrapper form.
fn vtable_for(demangled: &str) -> Option<&str>
{
    demangled
        .strip_prefix("{vtable(")
        .and_then(|rest| rest.strip_suffix(")}"))
        .or_else(|| demangled.strip_prefix(VTABLE_FOR))
}

/// Rewrite a demangled `_ZTC` name as `construction vtable for Base-in-Derived`.
///
/// `encoding` is the mangled name after `_ZTC`: the derived type, the offset
/// of the base in it, `_`, then the base type. The derived type is demangled
/// on its own to find where it ends in `demangled`. The base type may refer
/// back to the derived one through substitutions, so its text is taken from
/// `demangled` instead.
fn construction_vtable_for(encoding: &str, demangled: &str) -> Option<String>
{
    let pair = demangled.strip_prefix(CONSTRUCTION_VTABLE_FOR)?;

    (1..encoding.len())
        .filter(|&end| encoding.get(end..).is_some_and(starts_with_offset))
        .find_map(|end| {
            let derived_name = demangle_itanium(&format!("_ZTV{}", encoding.get(..end)?))?;
            let derived = vtable_for(&derived_name)?;
            let base = pair.strip_prefix(derived)?.strip_prefix("-in-")?;
            Some(format!("{CONSTRUCTION_VTABLE_FOR}{base}-in-{derived}"))
        })
}

/// `<number> _` as used for the base offset of a construction vtable.
fn starts_with_offset(text: &str) -> bool
{
    let digits = text.strip_prefix('n').unwrap_or(text);
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    len > 0 && digits[len..].starts_with('_')
}

/// Legacy Rust symbols end in a 16-digit hash component (`17h0123456789abcdefE`).
fn looks_like_rust_legacy(name: &str) -> bool
{
    name.starts_with("_ZN")
        && name
            .strip_suffix('E')
            .and_then(|rest| rest.get(rest.len().saturating_sub(19)..))
            .is_some_and(|tail| tail.starts_with("17h") && tail[3..].bytes().all(|b| b.is_ascii_hexdigit()))
}
