//! The resolved project model.
//!
//! `berth.toml` is the build tool's view of the workspace, written out for
//! berth to consume: modules with their directory layout and the ordered,
//! pre-resolved dependency closure of each. berth reads it, it never writes
//! it back.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::artifact::ResolvedArtifact;
use crate::core::overrides::LibraryOverride;
use crate::core::settings::SyncSettings;
use crate::util;

/// Top level of a `berth.toml` model file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectModel {
    pub settings: SyncSettings,
    pub repositories: Vec<Repository>,
    pub libraries: Vec<LibraryOverride>,
    pub modules: Vec<ModuleModel>,
}

/// A remote repository classifier attachments can be fetched from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Repository {
    pub url: String,
}

/// Module packaging, deciding the descriptor's module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Packaging {
    #[default]
    Jar,
    War,
    Ejb,
    /// Anything else; treated like a plain jar module.
    #[serde(other)]
    Other,
}

/// One module of the workspace.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleModel {
    /// Artifact id. The descriptor file is `<name>.iml` in the base dir.
    pub name: String,

    /// Group coordinate, used together with `name` for sibling detection.
    pub group: String,

    #[serde(default)]
    pub packaging: Packaging,

    /// Module root directory, the `$MODULE_DIR$` of its descriptor.
    pub base_dir: PathBuf,

    /// Build scratch directory. Defaults to `<base-dir>/target`.
    #[serde(default)]
    pub build_dir: PathBuf,

    /// Compiled classes directory. Defaults to `<build-dir>/classes`.
    #[serde(default)]
    pub output_dir: PathBuf,

    /// Compiled test classes directory. Defaults to `<build-dir>/test-classes`.
    #[serde(default)]
    pub test_output_dir: PathBuf,

    #[serde(default)]
    pub source_roots: Vec<PathBuf>,

    #[serde(default)]
    pub test_source_roots: Vec<PathBuf>,

    #[serde(default)]
    pub resource_roots: Vec<PathBuf>,

    #[serde(default)]
    pub test_resource_roots: Vec<PathBuf>,

    /// Test-scope dependency closure, in the build tool's order.
    #[serde(default)]
    pub artifacts: Vec<ResolvedArtifact>,
}

impl ProjectModel {
    /// Load and normalize a model file. Relative paths resolve against the
    /// file's directory; omitted build directories take the conventional
    /// layout.
    pub fn load(path: &Path) -> Result<ProjectModel> {
        let contents = util::fs::read_to_string(path)?;
        let mut model: ProjectModel = toml::from_str(&contents)
            .with_context(|| format!("failed to parse project model: {}", path.display()))?;

        if model.modules.is_empty() {
            bail!("project model defines no modules: {}", path.display());
        }
        let mut seen = HashSet::new();
        for module in &model.modules {
            if !seen.insert(module.name.as_str()) {
                bail!(
                    "duplicate module `{}` in project model: {}",
                    module.name,
                    path.display()
                );
            }
        }

        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        for module in &mut model.modules {
            module.normalize(&root);
        }
        Ok(model)
    }

    /// True when the coordinates name another module of this workspace.
    pub fn is_sibling(&self, group: &str, artifact: &str) -> bool {
        self.modules
            .iter()
            .any(|m| m.group == group && m.name == artifact)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleModel> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl ModuleModel {
    /// Path of this module's descriptor file.
    pub fn descriptor_path(&self) -> PathBuf {
        self.base_dir.join(format!("{}.iml", self.name))
    }

    /// Exploded webapp directory of a war module.
    pub fn war_webapp_dir(&self) -> PathBuf {
        self.build_dir.join(&self.name)
    }

    /// Conventional web source directory of a war module.
    pub fn web_source_dir(&self) -> PathBuf {
        self.base_dir.join("src").join("main").join("webapp")
    }

    /// Conventional deployment descriptor location.
    pub fn web_xml(&self) -> PathBuf {
        self.web_source_dir().join("WEB-INF").join("web.xml")
    }

    fn normalize(&mut self, root: &Path) {
        resolve(root, &mut self.base_dir);
        if self.build_dir.as_os_str().is_empty() {
            self.build_dir = self.base_dir.join("target");
        } else {
            resolve(root, &mut self.build_dir);
        }
        if self.output_dir.as_os_str().is_empty() {
            self.output_dir = self.build_dir.join("classes");
        } else {
            resolve(root, &mut self.output_dir);
        }
        if self.test_output_dir.as_os_str().is_empty() {
            self.test_output_dir = self.build_dir.join("test-classes");
        } else {
            resolve(root, &mut self.test_output_dir);
        }

        for path in self
            .source_roots
            .iter_mut()
            .chain(self.test_source_roots.iter_mut())
            .chain(self.resource_roots.iter_mut())
            .chain(self.test_resource_roots.iter_mut())
        {
            resolve(root, path);
        }
        for artifact in &mut self.artifacts {
            if let Some(file) = &mut artifact.file {
                resolve(root, file);
            }
        }
    }
}

fn resolve(root: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = root.join(&*path);
    }
}
