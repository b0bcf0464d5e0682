//! Generic tag tree for scene description documents
//!
//! Scene files for both renderers are XML dialects where every value lives
//! in attributes; element order carries meaning (a camera's transform ops,
//! a sampler's count child). This module is the shared in-memory shape for
//! both dialects: a named node with ordered attributes and ordered children.

use quick_xml::events::{BytesDecl, Event};
use quick_xml::Writer;

use super::SceneResult;

/// One element of a scene description document.
///
/// Attributes keep insertion order so that serialization is deterministic.
/// Children are an ordered sequence; there is no uniqueness constraint on
/// child names.
#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<TagNode>,
}

impl TagNode {
    /// Create a leaf node with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder-style attribute append, for chained construction.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute, replacing the value in place if the key exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn add_child(&mut self, child: TagNode) {
        self.children.push(child);
    }

    /// Remove the first child whose name matches. Returns whether a child
    /// was removed. Callers that need "replace the unique child of this
    /// name" pair this with an immediate `add_child`.
    pub fn remove_child(&mut self, name: &str) -> bool {
        if let Some(index) = self.children.iter().position(|c| c.name == name) {
            self.children.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&TagNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut TagNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    pub fn children(&self) -> &[TagNode] {
        &self.children
    }

    fn write_into<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
    ) -> Result<(), quick_xml::Error> {
        let element = writer
            .create_element(self.name.as_str())
            .with_attributes(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if self.children.is_empty() {
            element.write_empty()?;
        } else {
            element.write_inner_content(|writer| -> Result<(), quick_xml::Error> {
                for child in &self.children {
                    child.write_into(writer)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

/// Serialize a tag tree as a complete document: XML declaration followed by
/// a tab-indented tree, leaf elements self-closed, no blank lines.
pub fn serialize_document(root: &TagNode) -> SceneResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    root.write_into(&mut writer)?;
    let bytes = writer.into_inner();
    // The writer only ever emits UTF-8.
    Ok(String::from_utf8(bytes).expect("serialized document is valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler() -> TagNode {
        let mut sampler = TagNode::new("sampler").with_attr("type", "independent");
        sampler.add_child(
            TagNode::new("integer")
                .with_attr("name", "sampleCount")
                .with_attr("value", "32"),
        );
        sampler
    }

    #[test]
    fn test_remove_child_removes_first_match_only() {
        let mut node = TagNode::new("mesh");
        node.add_child(TagNode::new("bsdf").with_attr("type", "diffuse"));
        node.add_child(TagNode::new("bsdf").with_attr("type", "mirror"));

        assert!(node.remove_child("bsdf"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].attr("type"), Some("mirror"));

        assert!(node.remove_child("bsdf"));
        assert!(!node.remove_child("bsdf"));
        assert!(!node.contains_child("bsdf"));
    }

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut node = TagNode::new("integer")
            .with_attr("name", "width")
            .with_attr("value", "512");
        node.set_attr("value", "1024");

        assert_eq!(node.attr("value"), Some("1024"));
        // Insertion order is untouched by the replacement.
        assert_eq!(node.attributes()[0].0, "name");
        assert_eq!(node.attributes()[1].0, "value");
    }

    #[test]
    fn test_serialize_self_closes_leaves() {
        let mut root = TagNode::new("scene");
        root.add_child(TagNode::new("integrator").with_attr("type", "path_mis"));
        root.add_child(sampler());

        let xml = serialize_document(&root).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\"?>"));
        assert!(xml.contains("\n\t<integrator type=\"path_mis\"/>"));
        assert!(xml.contains("\n\t<sampler type=\"independent\">"));
        assert!(xml.contains("\n\t\t<integer name=\"sampleCount\" value=\"32\"/>"));
        assert!(xml.contains("\n\t</sampler>"));
        assert!(!xml.contains("\n\n"));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = sampler();
        let mut copy = original.clone();
        copy.child_mut("integer").unwrap().set_attr("value", "1024");

        assert_eq!(original.child("integer").unwrap().attr("value"), Some("32"));
        assert_eq!(copy.child("integer").unwrap().attr("value"), Some("1024"));
    }
}
