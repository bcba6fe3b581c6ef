//! Classifier attachment resolution.
//!
//! Source and javadoc companions live next to the main jar with a
//! `-<classifier>` suffix. When the companion is missing locally it is
//! fetched from the configured repositories; every attempt, successful or
//! not, is memoized for the rest of the run so a flaky repository is asked
//! about each attachment at most once.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use url::Url;

use crate::core::{Repository, ResolvedArtifact};
use crate::layout::slash_path;
use crate::util;

/// Transfers one classified artifact into the given destination file.
pub trait ArtifactFetcher: Send + Sync {
    fn fetch(&self, artifact: &ResolvedArtifact, classifier: &str, dest: &Path) -> Result<()>;
}

/// Run-wide memo of classifier resolution attempts.
///
/// One instance is shared across every module of a sync. A failed transfer
/// is recorded as a permanent miss; it will not be retried within the run.
pub struct ClassifierCache {
    fetcher: Box<dyn ArtifactFetcher>,
    attempts: Mutex<HashMap<String, Option<String>>>,
}

impl ClassifierCache {
    pub fn new(fetcher: Box<dyn ArtifactFetcher>) -> Self {
        ClassifierCache {
            fetcher,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the local path of `artifact`'s `classifier` companion, with
    /// forward slashes. `None` means the companion could not be produced.
    pub fn resolve(&self, artifact: &ResolvedArtifact, classifier: &str) -> Option<String> {
        let key = format!("{}-{}", artifact.id(), classifier);
        {
            let attempts = self.attempts.lock().unwrap();
            if let Some(cached) = attempts.get(&key) {
                tracing::debug!("{} already attempted, reusing the result", key);
                return cached.clone();
            }
        }

        tracing::debug!("{} not attempted yet, resolving", key);
        let resolved = self.attempt(artifact, classifier);
        self.attempts
            .lock()
            .unwrap()
            .insert(key, resolved.clone());
        resolved
    }

    fn attempt(&self, artifact: &ResolvedArtifact, classifier: &str) -> Option<String> {
        let file = artifact.file.as_deref()?;
        let candidate = classified_path(&slash_path(file), classifier)?;

        if Path::new(&candidate).exists() {
            return Some(candidate);
        }
        match self
            .fetcher
            .fetch(artifact, classifier, Path::new(&candidate))
        {
            Ok(()) => Some(candidate),
            Err(err) => {
                tracing::debug!("could not resolve {} {}: {:#}", artifact, classifier, err);
                None
            }
        }
    }
}

/// Derive the companion filename by inserting `-<classifier>` before the
/// `.jar` extension. Paths without one yield no candidate.
fn classified_path(base: &str, classifier: &str) -> Option<String> {
    let stem = base.strip_suffix(".jar")?;
    Some(format!("{}-{}.jar", stem, classifier))
}

/// Fetches classified artifacts over HTTP from Maven-layout repositories.
pub struct HttpFetcher {
    repositories: Vec<Repository>,
}

impl HttpFetcher {
    pub fn new(repositories: Vec<Repository>) -> Self {
        HttpFetcher { repositories }
    }

    fn fetch_from(
        &self,
        repository: &Repository,
        artifact: &ResolvedArtifact,
        classifier: &str,
        dest: &Path,
    ) -> Result<()> {
        let url = format!(
            "{}/{}",
            repository.url.trim_end_matches('/'),
            repository_path(artifact, classifier)
        );
        let url = Url::parse(&url)
            .with_context(|| format!("invalid repository url: {}", repository.url))?;

        tracing::debug!("Fetching {} from {}", dest.display(), url);
        let response = reqwest::blocking::get(url.as_str())
            .with_context(|| format!("failed to download {}", url))?;
        if !response.status().is_success() {
            bail!("failed to download {}: HTTP {}", url, response.status());
        }
        let bytes = response
            .bytes()
            .with_context(|| format!("failed to read response body from {}", url))?;

        util::fs::write_atomic(dest, &bytes)
    }
}

impl ArtifactFetcher for HttpFetcher {
    fn fetch(&self, artifact: &ResolvedArtifact, classifier: &str, dest: &Path) -> Result<()> {
        if self.repositories.is_empty() {
            bail!("no repositories configured");
        }
        for repository in &self.repositories {
            match self.fetch_from(repository, artifact, classifier, dest) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::debug!("{}: {:#}", repository.url, err);
                }
            }
        }
        bail!(
            "{} {} not found in any configured repository",
            artifact,
            classifier
        );
    }
}

/// Repository-layout path of a classified jar.
fn repository_path(artifact: &ResolvedArtifact, classifier: &str) -> String {
    format!(
        "{}/{}/{}/{}-{}-{}.jar",
        artifact.group.replace('.', "/"),
        artifact.artifact,
        artifact.version,
        artifact.artifact,
        artifact.version,
        classifier
    )
}
