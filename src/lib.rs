//! Berth - module descriptor synchronization for IDEA workspaces
//!
//! This crate provides the core library functionality for berth: loading a
//! build tool's resolved project model and synthesizing or reconciling the
//! IntelliJ IDEA module descriptor (`.iml`) file of every module in it.

pub mod core;
pub mod descriptor;
pub mod layout;
pub mod ops;
pub mod reconcile;
pub mod util;

/// Test utilities and mocks for berth unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a module-tree fixture builder and a recording
/// artifact fetcher.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    LibraryOverride, MacroSet, ModuleModel, Packaging, ProjectModel, Repository, ResolvedArtifact,
    SyncSettings,
};

pub use descriptor::{merge_descriptor, parse_document, write_document, Element};
pub use reconcile::{ArtifactFetcher, ClassifierCache, HttpFetcher};
