//! Order entry reconciliation.
//!
//! Dependency entries are berth-owned state inside a user-owned file: every
//! sync removes the module-library entries it wrote last time and rebuilds
//! them from the current artifact closure, while entries it did not write
//! (jdk, sourceFolder, hand-added ones) stay untouched.

use std::path::Path;

use crate::core::{find_override, MacroSet, ModuleModel, ProjectModel, ResolvedArtifact, SyncSettings};
use crate::descriptor::Element;
use crate::layout::jar_url;
use crate::reconcile::classifier::ClassifierCache;
use crate::reconcile::classify::{classify, ArtifactLink};

/// Rebuild the dependency order entries of a root manager component from the
/// module's artifact closure.
pub fn reconcile_dependencies(
    component: &mut Element,
    module: &ModuleModel,
    model: &ProjectModel,
    settings: &SyncSettings,
    cache: &ClassifierCache,
    macros: &mut MacroSet,
) {
    purge_library_entries(component);

    for artifact in &module.artifacts {
        let overridden = find_override(&model.libraries, &artifact.artifact);
        if overridden.is_some_and(|o| o.exclude) {
            continue;
        }

        let identity = artifact.identity(settings.use_full_names);
        let entry = match entry_position(component, &identity) {
            Some(idx) => &mut component.children_mut()[idx],
            None => component.create_child("orderEntry"),
        };

        match classify(artifact, model, settings.link_modules) {
            ArtifactLink::Module => {
                entry.set_attribute("type", "module");
                entry.set_attribute("module-name", identity);
            }
            ArtifactLink::Library(file) => {
                entry.set_attribute("type", "module-library");
                entry.remove_children("library");
                let library = entry.create_child("library");
                library.set_attribute("name", identity);

                let classes_urls = overridden.map(|o| o.classes_urls()).unwrap_or_default();
                let classes = library.create_child("CLASSES");
                if classes_urls.is_empty() {
                    classes.create_child("root").set_attribute("url", jar_url(&file));
                } else {
                    for classes_url in &classes_urls {
                        macros.scan(classes_url);
                        classes.create_child("root").set_attribute("url", classes_url);
                    }
                }

                let sources_urls = overridden.map(|o| o.sources_urls()).unwrap_or_default();
                let sources_overridden = !sources_urls.is_empty();
                if sources_overridden {
                    let sources = library.create_child("SOURCES");
                    for sources_url in &sources_urls {
                        macros.scan(sources_url);
                        sources.create_child("root").set_attribute("url", sources_url);
                    }
                }

                if settings.use_classifiers {
                    let javadoc = library.create_child("JAVADOC");
                    attach_classifier(javadoc, artifact, &settings.javadoc_classifier, cache);
                    if !sources_overridden {
                        let sources = library.create_child("SOURCES");
                        attach_classifier(sources, artifact, &settings.source_classifier, cache);
                    }
                }
            }
            // Entry exists (or was just created) but there is nothing to
            // point it at; leave it as found.
            ArtifactLink::Unresolved => {}
        }
    }
}

/// Append the module-library entry exposing a resource directory on the
/// classpath.
pub fn add_resource_entry(component: &mut Element, url: &str) {
    let entry = component.create_child("orderEntry");
    entry.set_attribute("type", "module-library");
    let library = entry.create_child("library");
    library.set_attribute("name", "resources");
    library
        .create_child("CLASSES")
        .create_child("root")
        .set_attribute("url", url);
    library.create_child("JAVADOC");
    library.create_child("SOURCES");
}

fn purge_library_entries(component: &mut Element) {
    component.retain_children(|child| {
        !(child.name() == "orderEntry" && child.attribute("type") == Some("module-library"))
    });
}

fn entry_position(component: &Element, identity: &str) -> Option<usize> {
    component.children().iter().position(|entry| {
        if entry.name() != "orderEntry" {
            return false;
        }
        match entry.attribute("type") {
            Some("module") => entry.attribute("module-name") == Some(identity),
            Some("module-library") => {
                entry.child("library").and_then(|l| l.attribute("name")) == Some(identity)
            }
            _ => false,
        }
    })
}

fn attach_classifier(
    container: &mut Element,
    artifact: &ResolvedArtifact,
    classifier: &str,
    cache: &ClassifierCache,
) {
    if let Some(path) = cache.resolve(artifact, classifier) {
        let url = jar_url(Path::new(&path));
        tracing::debug!("Setting {} for {} to {}", classifier, artifact, url);
        container.create_child("root").set_attribute("url", url);
    }
}
