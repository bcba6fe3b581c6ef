//! Ordered element tree for module descriptors.
//!
//! The descriptor schema is a small closed vocabulary, so the tree is a plain
//! recursive struct rather than a general DOM: named elements with ordered
//! attributes and ordered children, plus optional text content for leaves.
//! Elements berth does not know about (user customizations) ride along
//! untouched and are written back verbatim.

/// A single element in a module descriptor.
///
/// Attributes and children keep insertion order; setting an existing
/// attribute updates it in place so merged documents stay stable across
/// runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Get the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            attr.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Get the attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Get the text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Get the children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Get the children for in-place mutation.
    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    /// Iterate over children with the given element name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Get the first child with the given element name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Append a new empty child and return it for population.
    pub fn create_child(&mut self, name: impl Into<String>) -> &mut Element {
        self.children.push(Element::new(name));
        self.children.last_mut().unwrap()
    }

    /// Append an already-built child.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find the first child with the given name, creating and appending an
    /// empty one when absent.
    ///
    /// This is the lookup-or-create primitive behind every structural
    /// "locate or create" step of a merge.
    pub fn find_element(&mut self, name: &str) -> &mut Element {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(Element::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Find the `component` child whose `name` attribute matches, creating
    /// one when absent.
    pub fn find_component(&mut self, component_name: &str) -> &mut Element {
        self.find_child_by_attribute("component", "name", component_name)
    }

    /// Find the `setting` child whose `name` attribute matches, creating one
    /// when absent.
    pub fn find_setting(&mut self, setting_name: &str) -> &mut Element {
        self.find_child_by_attribute("setting", "name", setting_name)
    }

    fn find_child_by_attribute(&mut self, element: &str, attr: &str, value: &str) -> &mut Element {
        let idx = match self
            .children
            .iter()
            .position(|c| c.name == element && c.attribute(attr) == Some(value))
        {
            Some(idx) => idx,
            None => {
                let mut child = Element::new(element);
                child.set_attribute(attr, value);
                self.children.push(child);
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Remove every child with the given element name.
    pub fn remove_children(&mut self, name: &str) {
        self.children.retain(|c| c.name != name);
    }

    /// Remove every child matching the predicate.
    pub fn retain_children<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Element) -> bool,
    {
        self.children.retain(|c| keep(c));
    }
}
