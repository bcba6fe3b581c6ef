//! Descriptor merging.
//!
//! A descriptor is user-owned state: people reorder entries, add
//! components, and hand-tune settings. Merging therefore edits in place,
//! replacing only what the project model owns (outputs, source and exclude
//! folders, dependency entries) and leaving everything else exactly where
//! it was found.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::{MacroSet, ModuleModel, Packaging, ProjectModel, SyncSettings};
use crate::descriptor::element::Element;
use crate::descriptor::reader::parse_document;
use crate::descriptor::{template, web};
use crate::layout::{excluded_directories, module_file_url};
use crate::reconcile::{add_resource_entry, reconcile_dependencies, ClassifierCache};

/// Merge one module's model facts into its descriptor.
///
/// `existing` is the current file contents, or `None` to start from the
/// built-in template.
pub fn merge_descriptor(
    existing: Option<&str>,
    module: &ModuleModel,
    model: &ProjectModel,
    settings: &SyncSettings,
    cache: &ClassifierCache,
    macros: &mut MacroSet,
) -> Result<Element> {
    let mut root = match existing {
        Some(contents) => parse_document(contents)?,
        None => template::blank_module(),
    };

    match module.packaging {
        Packaging::War => web::add_web_facets(&mut root, module, model, settings),
        Packaging::Ejb => root.set_attribute("type", "J2EE_EJB_MODULE"),
        Packaging::Jar | Packaging::Other => {}
    }

    let base = &module.base_dir;
    let component = root.find_component("NewModuleRootManager");
    component
        .find_element("output")
        .set_attribute("url", module_file_url(base, &module.output_dir));
    component
        .find_element("output-test")
        .set_attribute("url", module_file_url(base, &module.test_output_dir));

    let content = component.find_element("content");
    content.remove_children("sourceFolder");
    for dir in &module.source_roots {
        add_source_folder(content, base, dir, false);
    }
    for dir in &module.test_source_roots {
        add_source_folder(content, base, dir, true);
    }
    // Test resources compile onto the test classpath, so they count as test
    // source folders.
    for dir in &module.test_resource_roots {
        add_source_folder(content, base, dir, true);
    }

    content.remove_children("excludeFolder");
    let source_urls: Vec<String> = content
        .children_named("sourceFolder")
        .filter_map(|folder| folder.attribute("url").map(str::to_string))
        .collect();

    let mut excluded: Vec<PathBuf> = Vec::new();
    for dir in [&module.build_dir, &module.output_dir, &module.test_output_dir] {
        let found = excluded_directories(dir, &excluded, &source_urls, base);
        excluded.extend(found);
    }
    for extra in settings.extra_excludes() {
        let dir = base.join(extra);
        let found = excluded_directories(&dir, &excluded, &source_urls, base);
        excluded.extend(found);
    }
    for dir in &excluded {
        add_exclude_folder(content, base, dir);
    }

    reconcile_dependencies(component, module, model, settings, cache, macros);

    for dir in &module.resource_roots {
        tracing::info!("Adding resource directory: {}", dir.display());
        add_resource_entry(component, &module_file_url(base, dir));
    }

    Ok(root)
}

/// Skips empty paths and paths that are not existing directories.
fn add_source_folder(content: &mut Element, base: &Path, directory: &Path, is_test: bool) {
    if directory.as_os_str().is_empty() || !directory.is_dir() {
        return;
    }
    let folder = content.create_child("sourceFolder");
    folder.set_attribute("url", module_file_url(base, directory));
    folder.set_attribute("isTestSource", if is_test { "true" } else { "false" });
}

fn add_exclude_folder(content: &mut Element, base: &Path, directory: &Path) {
    if directory.as_os_str().is_empty() || !directory.is_dir() {
        return;
    }
    content
        .create_child("excludeFolder")
        .set_attribute("url", module_file_url(base, directory));
}
