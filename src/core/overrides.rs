//! Per-library overrides supplied in the project model.
//!
//! An override is looked up by bare artifact id regardless of the naming
//! mode, so one entry applies to every version of the library.

use serde::Deserialize;

/// Hand-maintained override for a single library.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LibraryOverride {
    /// Bare artifact id this override applies to.
    pub name: String,

    /// Replacement classes root urls, comma or whitespace separated.
    pub classes: Option<String>,

    /// Replacement source root urls, comma or whitespace separated.
    pub sources: Option<String>,

    /// Drop the dependency entry for this library entirely.
    pub exclude: bool,
}

impl LibraryOverride {
    pub fn classes_urls(&self) -> Vec<String> {
        self.classes.as_deref().map(split_list).unwrap_or_default()
    }

    pub fn sources_urls(&self) -> Vec<String> {
        self.sources.as_deref().map(split_list).unwrap_or_default()
    }
}

/// Finds the override for an artifact, always by bare artifact id.
pub fn find_override<'a>(
    overrides: &'a [LibraryOverride],
    artifact_id: &str,
) -> Option<&'a LibraryOverride> {
    overrides.iter().find(|o| o.name == artifact_id)
}

/// Splits a url or path list on commas and whitespace, dropping empty
/// segments.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_mixed_separators() {
        assert_eq!(
            split_list("file://a.jar, file://b.jar\n  file://c.jar"),
            vec!["file://a.jar", "file://b.jar", "file://c.jar"]
        );
    }

    #[test]
    fn test_split_list_empty() {
        assert!(split_list("").is_empty());
        assert!(split_list(" , ,, ").is_empty());
    }

    #[test]
    fn test_find_override_by_bare_id() {
        let overrides = vec![
            LibraryOverride {
                name: "junit".to_string(),
                exclude: true,
                ..Default::default()
            },
            LibraryOverride {
                name: "commons-lang".to_string(),
                classes: Some("file://$LIBS$/commons-lang.jar".to_string()),
                ..Default::default()
            },
        ];
        assert!(find_override(&overrides, "junit").unwrap().exclude);
        assert!(find_override(&overrides, "commons-io").is_none());
    }
}
