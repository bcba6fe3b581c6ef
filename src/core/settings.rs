//! Sync behavior switches.

use serde::Deserialize;

use crate::core::overrides::split_list;

/// Settings controlling how descriptors are produced. All of them have
/// working defaults; a minimal model file needs none.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SyncSettings {
    /// Link sibling workspace modules as module dependencies instead of
    /// library jars.
    pub link_modules: bool,

    /// Name dependency entries by the full colon id rather than the bare
    /// artifact id.
    pub use_full_names: bool,

    /// Attempt to resolve `-sources` and `-javadoc` companions for each
    /// dependency.
    pub use_classifiers: bool,

    /// Classifier used for source attachments.
    pub source_classifier: String,

    /// Classifier used for javadoc attachments.
    pub javadoc_classifier: String,

    /// Extra directories to mark excluded, comma or whitespace separated,
    /// relative to each module root.
    pub exclude: Option<String>,

    /// Discard any existing descriptor and start from the template.
    pub overwrite: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            link_modules: true,
            use_full_names: false,
            use_classifiers: false,
            source_classifier: "sources".to_string(),
            javadoc_classifier: "javadoc".to_string(),
            exclude: None,
            overwrite: false,
        }
    }
}

impl SyncSettings {
    /// The configured extra exclusions, split into individual paths.
    pub fn extra_excludes(&self) -> Vec<String> {
        self.exclude.as_deref().map(split_list).unwrap_or_default()
    }
}
