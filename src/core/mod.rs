//! Core data structures for berth.
//!
//! This module contains the foundational types used throughout berth:
//! - The resolved project model and its modules
//! - Resolved dependency artifacts
//! - Library overrides and sync settings
//! - Path-variable macro tracking

pub mod artifact;
pub mod macros;
pub mod model;
pub mod overrides;
pub mod settings;

pub use artifact::ResolvedArtifact;
pub use macros::MacroSet;
pub use model::{ModuleModel, Packaging, ProjectModel, Repository};
pub use overrides::{find_override, LibraryOverride};
pub use settings::SyncSettings;
