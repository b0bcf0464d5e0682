//! Typed BSDF parameter construction

use super::tag::TagNode;

/// A single shader parameter value. The variant decides the element name
/// the parameter serializes under (`float`, `color`, `bool`).
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValue {
    Float(f64),
    Color([f64; 3]),
    Bool(bool),
}

impl MaterialValue {
    fn element_name(&self) -> &'static str {
        match self {
            MaterialValue::Float(_) => "float",
            MaterialValue::Color(_) => "color",
            MaterialValue::Bool(_) => "bool",
        }
    }

    fn format_value(&self) -> String {
        match self {
            MaterialValue::Float(v) => v.to_string(),
            MaterialValue::Color([r, g, b]) => format!("{} {} {}", r, g, b),
            MaterialValue::Bool(true) => "true".to_string(),
            MaterialValue::Bool(false) => "false".to_string(),
        }
    }
}

impl From<f64> for MaterialValue {
    fn from(value: f64) -> Self {
        MaterialValue::Float(value)
    }
}

impl From<[f64; 3]> for MaterialValue {
    fn from(value: [f64; 3]) -> Self {
        MaterialValue::Color(value)
    }
}

impl From<bool> for MaterialValue {
    fn from(value: bool) -> Self {
        MaterialValue::Bool(value)
    }
}

/// Build a `bsdf` subtree for the given shader kind, with one typed child
/// per parameter. Parameter order is preserved in the output.
pub fn make_material(shader: &str, params: &[(&str, MaterialValue)]) -> TagNode {
    let mut bsdf = TagNode::new("bsdf").with_attr("type", shader);
    for (name, value) in params {
        bsdf.add_child(
            TagNode::new(value.element_name())
                .with_attr("name", *name)
                .with_attr("value", value.format_value()),
        );
    }
    bsdf
}
