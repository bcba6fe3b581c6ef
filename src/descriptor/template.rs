//! Built-in blank module descriptor.

use crate::descriptor::element::Element;
use crate::descriptor::reader::parse_document;

const TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<module version="4" relativePaths="false" type="JAVA_MODULE">
  <component name="NewModuleRootManager">
    <output />
    <output-test />
    <content url="file://$MODULE_DIR$" />
    <orderEntry type="inheritedJdk" />
    <orderEntry type="sourceFolder" forTests="false" />
  </component>
</module>
"#;

/// The descriptor every module starts from when no file exists yet, or when
/// overwrite is requested.
pub fn blank_module() -> Element {
    parse_document(TEMPLATE).unwrap()
}
