//! Web module facets.
//!
//! War modules carry two extra components: the exploded-output location and
//! the deployment properties, whose container elements mirror the
//! dependency closure so the IDE packs the right jars (or sibling module
//! outputs) into `WEB-INF`.

use crate::core::{ModuleModel, ProjectModel, SyncSettings};
use crate::descriptor::element::Element;
use crate::layout::module_file_url;
use crate::reconcile::{classify, ArtifactLink};

/// Rewrite the web facets of a war module's descriptor.
pub fn add_web_facets(
    root: &mut Element,
    module: &ModuleModel,
    model: &ProjectModel,
    settings: &SyncSettings,
) {
    root.set_attribute("type", "J2EE_WEB_MODULE");

    let base = &module.base_dir;
    root.find_component("WebModuleBuildComponent")
        .find_setting("EXPLODED_URL")
        .set_attribute("value", module_file_url(base, &module.war_webapp_dir()));

    let properties = root.find_component("WebModuleProperties");
    properties.remove_children("containerElement");
    for artifact in &module.artifacts {
        match classify(artifact, model, settings.link_modules) {
            ArtifactLink::Module => {
                let container = properties.create_child("containerElement");
                container.set_attribute("type", "module");
                container.set_attribute("name", &artifact.artifact);
                add_attribute(container, "method", "5");
                add_attribute(container, "URI", "/WEB-INF/classes");
            }
            ArtifactLink::Library(file) => {
                let jar_name = file
                    .file_name()
                    .unwrap_or(file.as_os_str())
                    .to_string_lossy();
                let container = properties.create_child("containerElement");
                container.set_attribute("type", "library");
                container.set_attribute("level", "module");
                container.set_attribute("name", &artifact.artifact);
                add_attribute(container, "method", "1");
                add_attribute(container, "URI", format!("/WEB-INF/lib/{}", jar_name));
            }
            ArtifactLink::Unresolved => {}
        }
    }

    let descriptor = properties.find_element("deploymentDescriptor");
    if descriptor.attribute("name").is_none() {
        descriptor.set_attribute("name", "web.xml");
    }
    descriptor.set_attribute("url", module_file_url(base, &module.web_xml()));

    let webroots = properties.find_element("webroots");
    webroots.remove_children("root");
    let webroot = webroots.create_child("root");
    webroot.set_attribute("relative", "/");
    webroot.set_attribute("url", module_file_url(base, &module.web_source_dir()));
}

fn add_attribute(container: &mut Element, name: &str, value: impl Into<String>) {
    let attribute = container.create_child("attribute");
    attribute.set_attribute("name", name);
    attribute.set_attribute("value", value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{artifact_with_file, bare_artifact, model_with_modules};
    use std::path::Path;

    fn war_model() -> (ProjectModel, ModuleModel) {
        let mut model = model_with_modules(&["core", "webapp"]);
        model.modules[1].packaging = crate::core::Packaging::War;
        let mut module = model.module("webapp").unwrap().clone();
        module.artifacts.push(bare_artifact("com.example", "core"));
        module.artifacts.push(artifact_with_file(
            "com.x",
            "lib",
            Path::new("/repo/lib-1.0.jar"),
        ));
        module.artifacts.push(bare_artifact("com.x", "phantom"));
        (model, module)
    }

    #[test]
    fn test_exploded_output_and_module_type() {
        let (model, module) = war_model();
        let mut root = Element::new("module");
        add_web_facets(&mut root, &module, &model, &SyncSettings::default());

        assert_eq!(root.attribute("type"), Some("J2EE_WEB_MODULE"));
        let build = root.find_component("WebModuleBuildComponent");
        assert_eq!(
            build.find_setting("EXPLODED_URL").attribute("value"),
            Some("file://$MODULE_DIR$/target/webapp")
        );
    }

    #[test]
    fn test_container_elements_mirror_the_closure() {
        let (model, module) = war_model();
        let mut root = Element::new("module");
        add_web_facets(&mut root, &module, &model, &SyncSettings::default());

        let properties = root.find_component("WebModuleProperties");
        let containers: Vec<_> = properties.children_named("containerElement").collect();
        // The unresolved artifact contributes nothing
        assert_eq!(containers.len(), 2);

        assert_eq!(containers[0].attribute("type"), Some("module"));
        assert_eq!(containers[0].attribute("name"), Some("core"));
        let attrs: Vec<_> = containers[0]
            .children_named("attribute")
            .map(|a| (a.attribute("name").unwrap(), a.attribute("value").unwrap()))
            .collect();
        assert_eq!(attrs, [("method", "5"), ("URI", "/WEB-INF/classes")]);

        assert_eq!(containers[1].attribute("type"), Some("library"));
        assert_eq!(containers[1].attribute("level"), Some("module"));
        let attrs: Vec<_> = containers[1]
            .children_named("attribute")
            .map(|a| (a.attribute("name").unwrap(), a.attribute("value").unwrap()))
            .collect();
        assert_eq!(attrs, [("method", "1"), ("URI", "/WEB-INF/lib/lib-1.0.jar")]);
    }

    #[test]
    fn test_deployment_descriptor_and_webroot() {
        let (model, module) = war_model();
        let mut root = Element::new("module");
        add_web_facets(&mut root, &module, &model, &SyncSettings::default());

        let properties = root.find_component("WebModuleProperties");
        let descriptor = properties.find_element("deploymentDescriptor");
        assert_eq!(descriptor.attribute("name"), Some("web.xml"));
        assert_eq!(
            descriptor.attribute("url"),
            Some("file://$MODULE_DIR$/src/main/webapp/WEB-INF/web.xml")
        );

        let webroots = properties.find_element("webroots");
        let roots: Vec<_> = webroots.children_named("root").collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].attribute("relative"), Some("/"));
        assert_eq!(
            roots[0].attribute("url"),
            Some("file://$MODULE_DIR$/src/main/webapp")
        );
    }

    #[test]
    fn test_custom_descriptor_name_is_kept() {
        let (model, module) = war_model();
        let mut root = Element::new("module");
        root.find_component("WebModuleProperties")
            .find_element("deploymentDescriptor")
            .set_attribute("name", "my-web.xml");

        add_web_facets(&mut root, &module, &model, &SyncSettings::default());

        let properties = root.find_component("WebModuleProperties");
        assert_eq!(
            properties
                .find_element("deploymentDescriptor")
                .attribute("name"),
            Some("my-web.xml")
        );
    }

    #[test]
    fn test_rerun_replaces_containers_without_duplicating() {
        let (model, module) = war_model();
        let mut root = Element::new("module");
        add_web_facets(&mut root, &module, &model, &SyncSettings::default());
        add_web_facets(&mut root, &module, &model, &SyncSettings::default());

        let properties = root.find_component("WebModuleProperties");
        assert_eq!(properties.children_named("containerElement").count(), 2);
        assert_eq!(properties.children_named("webroots").count(), 1);
    }
}
