//! Dependency reconciliation.
//!
//! Turns a module's resolved artifact closure into descriptor order
//! entries, resolving source and javadoc companions through a run-wide
//! cache.

pub mod classifier;
pub mod classify;
pub mod entries;

pub use classifier::{ArtifactFetcher, ClassifierCache, HttpFetcher};
pub use classify::{classify, ArtifactLink};
pub use entries::{add_resource_entry, reconcile_dependencies};
