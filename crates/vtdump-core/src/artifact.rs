//! Artifact-kind detection.
//!
//! Relocatable objects and linked artifacts need different slot resolution
//! (see [`ArtifactMode`]). In `auto` mode the ELF header decides; a file whose
//! header cannot be read falls back to its name.

use std::fs;
use std::path::Path;

use object::{Object, ObjectKind};
use tracing::debug;

use crate::config::ArtifactMode;

/// File-name suffix of relocatable objects.
pub const OBJECT_SUFFIX: &str = ".o";

/// Resolve `mode` to either [`ArtifactMode::Object`] or [`ArtifactMode::Linked`].
pub fn detect_mode(path: &Path, mode: ArtifactMode) -> ArtifactMode
{
    if mode != ArtifactMode::Auto {
        return mode;
    }

    match fs::read(path) {
        Ok(data) => match object::File::parse(&*data) {
            Ok(file) => {
                let kind = file.kind();
                debug!(file = %path.display(), ?kind, "read artifact header");
                mode_for_kind(kind)
            }
            Err(err) => {
                debug!(file = %path.display(), %err, "unrecognised artifact header, using file name");
                mode_for_name(path)
            }
        },
        Err(err) => {
            debug!(file = %path.display(), %err, "artifact not readable, using file name");
            mode_for_name(path)
        }
    }
}

/// Mode for an object file kind.
pub fn mode_for_kind(kind: ObjectKind) -> ArtifactMode
{
    match kind {
        ObjectKind::Relocatable => ArtifactMode::Object,
        _ => ArtifactMode::Linked,
    }
}

/// Mode implied by the file name alone.
pub fn mode_for_name(path: &Path) -> ArtifactMode
{
    if path.to_string_lossy().ends_with(OBJECT_SUFFIX) {
        ArtifactMode::Object
    } else {
        ArtifactMode::Linked
    }
}
