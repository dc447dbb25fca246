//! Build descriptor tree model.
//!
//! A pom is held as a plain tree of named nodes with an optional text
//! value, ordered attributes, and ordered children — enough structure to
//! locate and patch one plugin block while round-tripping everything
//! else untouched. The tree is a value type with no ties to any
//! build-tool object model, so the patch logic stays pure and testable.

mod parser;
mod patch;
mod writer;

pub use parser::{parse_file, parse_str};
pub use patch::{
    JAVAFX_PLUGIN_ARTIFACT_ID, JAVAFX_PLUGIN_GROUP_ID, PatchOutcome, agent_option,
    find_javafx_plugin_mut, patch_configuration, patch_descriptor,
};
pub use writer::to_xml;

/// One element of a build descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name. Lookup by name is exact; only plugin identifier
    /// *values* are matched case-insensitively.
    pub name: String,
    /// Text content, trimmed. None for container elements.
    pub value: Option<String>,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a text value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable first child with the given name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// First child with the given name, created on demand.
    pub fn ensure_child(&mut self, name: &str) -> &mut XmlNode {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(XmlNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Text value of the first child with the given name.
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.value.as_deref())
    }

    /// Set the text value of the named child, creating it if absent.
    /// Never duplicates the child.
    pub fn set_child_value(&mut self, name: &str, value: impl Into<String>) {
        self.ensure_child(name).value = Some(value.into());
    }

    /// Text content, empty for container elements.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}
