//! Symbolic url formatting.
//!
//! Descriptors never contain machine-specific absolute paths for anything
//! under the module; paths are expressed relative to the `$MODULE_DIR$`
//! placeholder so checkouts stay portable. Jar references are the exception
//! and keep their absolute location, in `jar://<path>!/` form.

use std::path::{Path, PathBuf};

/// The symbolic root every module-relative url hangs off.
pub const MODULE_DIR_URL: &str = "file://$MODULE_DIR$";

/// Compute `path` relative to `base`.
///
/// Paths that are already relative are taken as given (they are understood
/// to be module-relative); absolute paths outside `base` come back with
/// `..` segments. Never fails: when no relative form exists (for example
/// across Windows drive letters) the path is returned unchanged.
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

/// Format a path as a `file://$MODULE_DIR$/...` url relative to the module
/// base directory, normalizing separators to forward slashes.
///
/// A path equal to the base directory yields the bare symbolic root.
pub fn module_file_url(base: &Path, path: &Path) -> String {
    let relative = relative_to(base, path);
    if relative.as_os_str().is_empty() {
        MODULE_DIR_URL.to_string()
    } else {
        format!("{}/{}", MODULE_DIR_URL, slash_path(&relative))
    }
}

/// Format an archive path as a `jar://<absolute path>!/` root url.
pub fn jar_url(path: &Path) -> String {
    format!("jar://{}!/", slash_path(path))
}

/// Render a path with forward slashes regardless of host convention.
pub fn slash_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_inside_base() {
        let base = Path::new("/work/project/core");
        let path = base.join("src/main/java");
        assert_eq!(
            module_file_url(base, &path),
            "file://$MODULE_DIR$/src/main/java"
        );
    }

    #[test]
    fn test_url_equal_to_base() {
        let base = Path::new("/work/project/core");
        assert_eq!(module_file_url(base, base), "file://$MODULE_DIR$");
    }

    #[test]
    fn test_url_outside_base_uses_parent_segments() {
        let base = Path::new("/work/project/core");
        let path = Path::new("/work/project/shared/src");
        assert_eq!(
            module_file_url(base, path),
            "file://$MODULE_DIR$/../shared/src"
        );
    }

    #[test]
    fn test_url_unrelated_absolute_path() {
        let base = Path::new("/work/project/core");
        let path = Path::new("/opt/libs/extra");
        assert_eq!(
            module_file_url(base, path),
            "file://$MODULE_DIR$/../../../opt/libs/extra"
        );
    }

    #[test]
    fn test_relative_input_is_kept_as_given() {
        let base = Path::new("/work/project/core");
        assert_eq!(
            module_file_url(base, Path::new("src/main/webapp")),
            "file://$MODULE_DIR$/src/main/webapp"
        );
    }

    #[test]
    fn test_round_trip_inside_base() {
        let base = Path::new("/work/project/core");
        for rel in ["src/main/java", "target/generated/sub", "a"] {
            let path = base.join(rel);
            let url = module_file_url(base, &path);
            let suffix = url
                .strip_prefix("file://$MODULE_DIR$/")
                .expect("url should be module-relative");
            assert_eq!(base.join(suffix), path);
        }
    }

    #[test]
    fn test_jar_url() {
        assert_eq!(
            jar_url(Path::new("/repo/com/x/lib/1.0/lib-1.0.jar")),
            "jar:///repo/com/x/lib/1.0/lib-1.0.jar!/"
        );
    }
}
