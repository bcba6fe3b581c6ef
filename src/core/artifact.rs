//! Resolved dependency artifacts.
//!
//! Artifacts arrive pre-resolved from the build tool: the test-scope
//! closure, ordered, each with its coordinates and (usually) a local file.
//! berth never resolves versions or walks a dependency graph itself.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// One artifact from the resolved dependency closure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedArtifact {
    /// Group coordinate, e.g. `org.apache.commons`.
    pub group: String,

    /// Artifact coordinate, e.g. `commons-lang`.
    pub artifact: String,

    /// Version string as the build tool reports it (not semver).
    pub version: String,

    /// Artifact type, almost always `jar`.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,

    /// Classifier of the resolved artifact itself, when it has one.
    #[serde(default)]
    pub classifier: Option<String>,

    /// Local path of the resolved file; absent when resolution produced no
    /// file (a sibling module during its first build, for example).
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_kind() -> String {
    "jar".to_string()
}

impl ResolvedArtifact {
    /// Full colon id, including the classifier when present. Used for cache
    /// keys and logging.
    pub fn id(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}:{}:{}:{}:{}",
                self.group, self.artifact, self.kind, classifier, self.version
            ),
            None => self.full_name(),
        }
    }

    /// The colon-joined (group, artifact, type, version) tuple used as the
    /// dependency identity in full-name mode.
    pub fn full_name(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.group, self.artifact, self.kind, self.version
        )
    }

    /// The identity a dependency entry is matched and named by.
    pub fn identity(&self, use_full_names: bool) -> String {
        if use_full_names {
            self.full_name()
        } else {
            self.artifact.clone()
        }
    }
}

impl fmt::Display for ResolvedArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
