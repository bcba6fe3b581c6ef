//! Shared artifact classification.
//!
//! The dependency reconciler and the web container wiring must agree on how
//! an artifact links into the module, so the decision lives in one place.

use std::path::PathBuf;

use crate::core::{ProjectModel, ResolvedArtifact};

/// How a dependency artifact is wired into a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLink {
    /// A sibling module of the same workspace, referenced by name.
    Module,
    /// An external jar on disk.
    Library(PathBuf),
    /// Not a sibling and no resolved file; nothing to point at.
    Unresolved,
}

/// Decide how an artifact links. Sibling modules win over their jar files
/// only while module linking is on.
pub fn classify(
    artifact: &ResolvedArtifact,
    model: &ProjectModel,
    link_modules: bool,
) -> ArtifactLink {
    if link_modules && model.is_sibling(&artifact.group, &artifact.artifact) {
        return ArtifactLink::Module;
    }
    match &artifact.file {
        Some(file) => ArtifactLink::Library(file.clone()),
        None => ArtifactLink::Unresolved,
    }
}
