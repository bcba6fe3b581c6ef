//! Implementation of `berth sync`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::core::{MacroSet, ModuleModel, ProjectModel, SyncSettings};
use crate::descriptor::{merge_descriptor, write_document};
use crate::reconcile::{ClassifierCache, HttpFetcher};
use crate::util;

/// Options for the sync command.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Path to the project model file
    pub model: PathBuf,

    /// Sync only the named module instead of the whole project
    pub module: Option<String>,

    /// Settings overrides from the command line; `None` keeps the model's
    /// value
    pub link_modules: Option<bool>,
    pub use_full_names: Option<bool>,
    pub use_classifiers: Option<bool>,
    pub source_classifier: Option<String>,
    pub javadoc_classifier: Option<String>,
    pub exclude: Option<String>,

    /// Discard existing descriptors instead of merging into them
    pub overwrite: bool,
}

/// What one sync run produced.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Descriptor files written, in module order
    pub written: Vec<PathBuf>,

    /// Path variable names referenced by library overrides
    pub macros: Vec<String>,
}

/// Synchronize module descriptors with the project model.
pub fn sync(opts: &SyncOptions) -> Result<SyncReport> {
    let model = ProjectModel::load(&opts.model)?;
    let settings = effective_settings(&model, opts);

    let cache = ClassifierCache::new(Box::new(HttpFetcher::new(model.repositories.clone())));
    let mut macros = MacroSet::new();
    let mut report = SyncReport::default();

    for module in selected_modules(&model, opts.module.as_deref())? {
        let path = module.descriptor_path();
        let existing = if path.is_file() && !settings.overwrite {
            Some(util::fs::read_to_string(&path)?)
        } else {
            None
        };

        let root = merge_descriptor(
            existing.as_deref(),
            module,
            &model,
            &settings,
            &cache,
            &mut macros,
        )
        .with_context(|| format!("failed to merge descriptor: {}", path.display()))?;
        util::fs::write_atomic(&path, write_document(&root).as_bytes())?;
        tracing::info!("Wrote {}", path.display());
        report.written.push(path);
    }

    report.macros = macros.names().to_vec();
    if !report.macros.is_empty() {
        tracing::warn!(
            "Path variables must be defined in the IDE: {}",
            report.macros.join(", ")
        );
    }

    Ok(report)
}

fn selected_modules<'a>(
    model: &'a ProjectModel,
    filter: Option<&str>,
) -> Result<Vec<&'a ModuleModel>> {
    match filter {
        None => Ok(model.modules.iter().collect()),
        Some(name) => match model.module(name) {
            Some(module) => Ok(vec![module]),
            None => {
                let available: Vec<_> = model.modules.iter().map(|m| m.name.as_str()).collect();
                bail!(
                    "module `{}` not found in the project model\n\
                     available modules: {}",
                    name,
                    available.join(", ")
                );
            }
        },
    }
}

/// Command-line flags override model-file settings field by field.
fn effective_settings(model: &ProjectModel, opts: &SyncOptions) -> SyncSettings {
    let mut settings = model.settings.clone();
    if let Some(value) = opts.link_modules {
        settings.link_modules = value;
    }
    if let Some(value) = opts.use_full_names {
        settings.use_full_names = value;
    }
    if let Some(value) = opts.use_classifiers {
        settings.use_classifiers = value;
    }
    if let Some(value) = &opts.source_classifier {
        settings.source_classifier = value.clone();
    }
    if let Some(value) = &opts.javadoc_classifier {
        settings.javadoc_classifier = value.clone();
    }
    if let Some(value) = &opts.exclude {
        settings.exclude = Some(value.clone());
    }
    settings.overwrite |= opts.overwrite;
    settings
}
