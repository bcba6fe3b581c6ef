//! Filesystem utilities.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a file by staging the contents in a sibling temp file and renaming
/// it into place, so a failed run never leaves a truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;

    let mut staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to stage file: {}", path.display()))?;
    staged
        .write_all(contents)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    staged
        .persist(path)
        .with_context(|| format!("failed to write file: {}", path.display()))?;
    Ok(())
}
