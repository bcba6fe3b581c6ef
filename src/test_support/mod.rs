//! Test fixtures and mocks for berth unit tests.
//!
//! This module is only available when compiling tests. It provides a
//! module-tree fixture builder and a recording fetcher standing in for
//! repository transfers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};

use crate::core::{ModuleModel, Packaging, ProjectModel, ResolvedArtifact};
use crate::reconcile::ArtifactFetcher;

/// A project model with the given module names under a synthetic `/ws`
/// root, for tests that never touch the filesystem.
pub fn model_with_modules(names: &[&str]) -> ProjectModel {
    let mut model = ProjectModel::default();
    for name in names {
        model.modules.push(synthetic_module(name));
    }
    model
}

fn synthetic_module(name: &str) -> ModuleModel {
    let base = PathBuf::from("/ws").join(name);
    ModuleModel {
        name: name.to_string(),
        group: "com.example".to_string(),
        packaging: Packaging::Jar,
        build_dir: base.join("target"),
        output_dir: base.join("target/classes"),
        test_output_dir: base.join("target/test-classes"),
        base_dir: base,
        source_roots: Vec::new(),
        test_source_roots: Vec::new(),
        resource_roots: Vec::new(),
        test_resource_roots: Vec::new(),
        artifacts: Vec::new(),
    }
}

/// An artifact with no resolved file.
pub fn bare_artifact(group: &str, name: &str) -> ResolvedArtifact {
    ResolvedArtifact {
        group: group.to_string(),
        artifact: name.to_string(),
        version: "1.0".to_string(),
        kind: "jar".to_string(),
        classifier: None,
        file: None,
    }
}

/// An artifact resolved to the given file.
pub fn artifact_with_file(group: &str, name: &str, file: &Path) -> ResolvedArtifact {
    ResolvedArtifact {
        file: Some(file.to_path_buf()),
        ..bare_artifact(group, name)
    }
}

/// Fixture for a module directory tree on disk.
#[derive(Debug, Clone)]
pub struct ModuleFixture {
    name: String,
    group: String,
    packaging: Packaging,
    dirs: Vec<PathBuf>,
    source_roots: Vec<PathBuf>,
    test_source_roots: Vec<PathBuf>,
    resource_roots: Vec<PathBuf>,
    test_resource_roots: Vec<PathBuf>,
    artifacts: Vec<ResolvedArtifact>,
}

impl ModuleFixture {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleFixture {
            name: name.into(),
            group: "com.example".to_string(),
            packaging: Packaging::Jar,
            dirs: Vec::new(),
            source_roots: Vec::new(),
            test_source_roots: Vec::new(),
            resource_roots: Vec::new(),
            test_resource_roots: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn with_packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    /// Register a source root and create its directory.
    pub fn with_source_root(mut self, rel: &str) -> Self {
        self.source_roots.push(PathBuf::from(rel));
        self.dirs.push(PathBuf::from(rel));
        self
    }

    pub fn with_test_source_root(mut self, rel: &str) -> Self {
        self.test_source_roots.push(PathBuf::from(rel));
        self.dirs.push(PathBuf::from(rel));
        self
    }

    pub fn with_resource_root(mut self, rel: &str) -> Self {
        self.resource_roots.push(PathBuf::from(rel));
        self.dirs.push(PathBuf::from(rel));
        self
    }

    pub fn with_test_resource_root(mut self, rel: &str) -> Self {
        self.test_resource_roots.push(PathBuf::from(rel));
        self.dirs.push(PathBuf::from(rel));
        self
    }

    /// Create an extra directory under the module root, e.g. `target/classes`.
    pub fn with_dir(mut self, rel: &str) -> Self {
        self.dirs.push(PathBuf::from(rel));
        self
    }

    pub fn with_artifact(mut self, artifact: ResolvedArtifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    /// Write the tree under `base` and return the module model pointing at
    /// it, with the conventional build directory layout.
    pub fn build(self, base: &Path) -> ModuleModel {
        let base_dir = base.join(&self.name);
        std::fs::create_dir_all(&base_dir).unwrap();
        for dir in &self.dirs {
            std::fs::create_dir_all(base_dir.join(dir)).unwrap();
        }

        let absolute =
            |roots: &[PathBuf]| -> Vec<PathBuf> { roots.iter().map(|r| base_dir.join(r)).collect() };
        let build_dir = base_dir.join("target");
        ModuleModel {
            name: self.name,
            group: self.group,
            packaging: self.packaging,
            output_dir: build_dir.join("classes"),
            test_output_dir: build_dir.join("test-classes"),
            build_dir,
            source_roots: absolute(&self.source_roots),
            test_source_roots: absolute(&self.test_source_roots),
            resource_roots: absolute(&self.resource_roots),
            test_resource_roots: absolute(&self.test_resource_roots),
            base_dir,
            artifacts: self.artifacts,
        }
    }
}

/// Assemble a project model from already-built modules.
pub fn project(modules: Vec<ModuleModel>) -> ProjectModel {
    ProjectModel {
        modules,
        ..ProjectModel::default()
    }
}

/// Recording mock fetcher. Counts calls and either writes the destination
/// file or fails every transfer.
pub struct RecordingFetcher {
    succeed: bool,
    calls: Arc<Mutex<usize>>,
}

impl RecordingFetcher {
    pub fn succeeding() -> Self {
        RecordingFetcher {
            succeed: true,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        RecordingFetcher {
            succeed: false,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Shared call counter, usable after the fetcher moves into a cache.
    pub fn calls(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.calls)
    }
}

impl ArtifactFetcher for RecordingFetcher {
    fn fetch(&self, _artifact: &ResolvedArtifact, _classifier: &str, dest: &Path) -> Result<()> {
        *self.calls.lock().unwrap() += 1;
        if self.succeed {
            std::fs::write(dest, "fetched")
                .with_context(|| format!("failed to write {}", dest.display()))?;
            Ok(())
        } else {
            bail!("transfers disabled in this test")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_module_fixture_creates_registered_dirs() {
        let tmp = TempDir::new().unwrap();
        let module = ModuleFixture::new("core")
            .with_source_root("src/main/java")
            .with_dir("target/classes")
            .build(tmp.path());

        assert!(module.base_dir.join("src/main/java").is_dir());
        assert!(module.base_dir.join("target/classes").is_dir());
        assert_eq!(module.output_dir, module.base_dir.join("target/classes"));
        assert_eq!(module.source_roots, [module.base_dir.join("src/main/java")]);
    }

    #[test]
    fn test_recording_fetcher_counts_calls() {
        let tmp = TempDir::new().unwrap();
        let fetcher = RecordingFetcher::succeeding();
        let calls = fetcher.calls();

        let dest = tmp.path().join("lib-1.0-sources.jar");
        fetcher
            .fetch(&bare_artifact("com.x", "lib"), "sources", &dest)
            .unwrap();

        assert!(dest.exists());
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
