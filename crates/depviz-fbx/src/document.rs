//! Generic node tree of an FBX ASCII document.
//!
//! An FBX document is a forest of named nodes. Each node carries a list of
//! attributes and an optional block of child nodes:
//!
//! ```text
//! Model: 150000, "Model::Cube", "Mesh" {
//!     Version: 232
//! }
//! ```

use depviz_core::PropertyValue;

use crate::span::Span;

/// A single attribute value of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    String(String),
    /// Bare word such as `T`, `Y` or `W`.
    Word(String),
    /// Array length marker `*N` preceding an inline array block.
    ArrayLength(usize),
}

impl AttributeValue {
    /// Returns the value as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text of a string or bare word.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(text) | AttributeValue::Word(text) => Some(text),
            _ => None,
        }
    }

    /// Converts the attribute into a property value.
    ///
    /// The bare words `T`/`Y` and `F`/`N` are FBX booleans.
    /// Array markers carry no value and yield `None`.
    pub fn to_property_value(&self) -> Option<PropertyValue> {
        match self {
            AttributeValue::Integer(value) => Some(PropertyValue::Integer(*value)),
            AttributeValue::Float(value) => Some(PropertyValue::Float(*value)),
            AttributeValue::String(text) => Some(PropertyValue::Text(text.clone())),
            AttributeValue::Word(word) => Some(match word.as_str() {
                "T" | "Y" => PropertyValue::Bool(true),
                "F" | "N" => PropertyValue::Bool(false),
                _ => PropertyValue::Text(word.clone()),
            }),
            AttributeValue::ArrayLength(_) => None,
        }
    }
}

/// An attribute together with its location in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub value: AttributeValue,
    pub span: Span,
}

impl Attribute {
    pub fn new(value: AttributeValue, span: Span) -> Self {
        Self { value, span }
    }
}

/// A named node with attributes and child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct FbxNode {
    name: String,
    name_span: Span,
    span: Span,
    attributes: Vec<Attribute>,
    children: Vec<FbxNode>,
}

impl FbxNode {
    pub fn new(
        name: impl Into<String>,
        name_span: Span,
        span: Span,
        attributes: Vec<Attribute>,
        children: Vec<FbxNode>,
    ) -> Self {
        Self {
            name: name.into(),
            name_span,
            span,
            attributes,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_span(&self) -> Span {
        self.name_span
    }

    /// Span from the node name to the end of its attributes or closing brace.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn children(&self) -> &[FbxNode] {
        &self.children
    }

    /// Returns the first child with the given name.
    pub fn child(&self, name: &str) -> Option<&FbxNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns all children with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FbxNode> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// A decoded FBX ASCII document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    nodes: Vec<FbxNode>,
}

impl Document {
    pub fn new(nodes: Vec<FbxNode>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes in source order.
    pub fn nodes(&self) -> &[FbxNode] {
        &self.nodes
    }

    /// Returns the first top-level node with the given name.
    pub fn node(&self, name: &str) -> Option<&FbxNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }
}
