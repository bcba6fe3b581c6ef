//! Exclusion computation for build-output trees.
//!
//! The IDE should not index anything under the build output, except that
//! source roots occasionally live there (generated sources). Walking from an
//! output root, each subdirectory is either a source root (kept, not
//! descended), an ancestor of one (descended so only its irrelevant parts
//! are excluded), or unrelated (excluded wholesale). When a root keeps
//! nothing at all the per-subdirectory entries collapse into the root
//! itself, which keeps exclude lists short for the common case of an
//! entirely irrelevant output tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::urls::module_file_url;

/// Compute the directories under `root` that must be marked excluded so the
/// given source folder urls stay indexed.
///
/// `decided` holds the exclusions accumulated by earlier invocations in the
/// same merge (build dir, classes dir, test classes dir, configured
/// extras, in that order); a root or subdirectory already decided is not
/// revisited. A root that does not exist yields nothing; a configured
/// exclude pointing nowhere is not an error.
pub fn excluded_directories(
    root: &Path,
    decided: &[PathBuf],
    source_urls: &[String],
    base: &Path,
) -> Vec<PathBuf> {
    let mut found = Vec::new();

    if !root.is_dir() || decided.iter().any(|d| d == root) {
        return found;
    }

    let mut subdirs = match list_subdirectories(root) {
        Some(dirs) => dirs,
        None => return found,
    };
    subdirs.sort();

    let mut kept = 0usize;
    for sub in subdirs {
        if decided.iter().any(|d| d == &sub) {
            continue;
        }

        let url = module_file_url(base, &sub);
        if source_urls.iter().any(|s| *s == url) {
            // The subdirectory is a source root itself
            kept += 1;
        } else if source_urls.iter().any(|s| nests_under(s, &url)) {
            // A source root lives deeper inside; exclude around it
            kept += 1;
            found.extend(excluded_directories(&sub, decided, source_urls, base));
        } else {
            found.push(sub);
        }
    }

    // Nothing under this root is worth keeping, so one entry covers it all
    if kept == 0 {
        found.clear();
        found.push(root.to_path_buf());
    }

    found
}

/// True when `source_url` names a path strictly inside the directory url.
///
/// Segment-aware so `.../src` does not capture `.../src2/java`.
fn nests_under(source_url: &str, dir_url: &str) -> bool {
    source_url
        .strip_prefix(dir_url)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn list_subdirectories(root: &Path) -> Option<Vec<PathBuf>> {
    let entries = fs::read_dir(root).ok()?;
    Some(
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect(),
    )
}
