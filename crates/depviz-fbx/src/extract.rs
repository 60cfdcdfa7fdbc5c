//! Record extraction from a parsed FBX document.
//!
//! Objects are read from the children of the top-level `Objects` node and
//! links from the `C` entries of `Connections`. Every other top-level node
//! is ignored. Both extractions are lazy and report malformed entries as
//! [`DecodeError`]s in place.

use depviz_core::{Connection, ObjectId, ObjectRecord, Properties, PropertyValue};

use crate::{
    document::{Attribute, AttributeValue, Document, FbxNode},
    error::{DecodeError, Diagnostic, ErrorCode},
};

/// Options controlling which records are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Emit a link from each `PoseNode` member to its pose.
    pub pose_links: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { pose_links: true }
    }
}

/// Splits an object name attribute into `(class, name)`.
///
/// Accepts the ASCII form `Class::Name` and the binary form
/// `Name\0\x01Class`. Returns `None` when neither separator is present.
fn split_class_name(text: &str) -> Option<(&str, &str)> {
    if let Some((name, class)) = text.split_once("\u{0}\u{1}") {
        return Some((class, name));
    }
    text.split_once("::")
}

fn integer_id(attribute: Option<&Attribute>) -> Option<ObjectId> {
    attribute
        .and_then(|attribute| attribute.value.as_i64())
        .map(ObjectId::new)
}

/// Reads the `P` entries of a `Properties70` block.
fn read_properties(node: &FbxNode) -> Properties {
    let mut properties = Properties::new();
    let Some(block) = node.child("Properties70") else {
        return properties;
    };
    for entry in block.children_named("P") {
        let Some(name) = entry.attribute(0).and_then(|a| a.value.as_str()) else {
            continue;
        };
        // Name, type, label and flags precede the values.
        let values: Vec<PropertyValue> = entry
            .attributes()
            .iter()
            .skip(4)
            .filter_map(|attribute| attribute.value.to_property_value())
            .collect();
        if values.is_empty() {
            continue;
        }
        properties.insert(name.to_string(), PropertyValue::from_values(values));
    }
    properties
}

fn object_record(node: &FbxNode) -> Result<ObjectRecord, DecodeError> {
    let id = integer_id(node.attribute(0));
    let name_attr = node
        .attribute(1)
        .filter(|attribute| matches!(attribute.value, AttributeValue::String(_)));

    let (Some(id), Some(name_attr)) = (id, name_attr) else {
        return Err(Diagnostic::error(format!(
            "malformed `{}` declaration",
            node.name()
        ))
        .with_code(ErrorCode::E200)
        .with_label(node.span(), ErrorCode::E200.description())
        .with_help("object entries look like `Model: 100, \"Model::Cube\", \"Mesh\"`")
        .into());
    };

    let text = name_attr.value.as_str().unwrap_or_default();
    let (class, name) = split_class_name(text).unwrap_or((node.name(), text));
    let subclass = node
        .attribute(2)
        .and_then(|attribute| attribute.value.as_str())
        .unwrap_or_default();

    let mut properties = read_properties(node);
    let pose_type = node
        .child("Type")
        .filter(|_| node.name() == "Pose")
        .and_then(|type_node| type_node.attribute(0))
        .and_then(|attribute| attribute.value.as_str());
    if let Some(pose_type) = pose_type {
        properties.insert("Type".to_string(), PropertyValue::Text(pose_type.to_string()));
    }

    let record = ObjectRecord::new(id, class, subclass, name).map_err(|err| {
        Diagnostic::error(err.to_string())
            .with_code(ErrorCode::E201)
            .with_label(name_attr.span, ErrorCode::E201.description())
            .with_help("use `Class::Name`, for example `\"Model::Cube\"`")
    })?;

    Ok(record.with_properties(properties))
}

/// Links from the members of one `Pose` object to the pose itself.
fn pose_links(pose: &FbxNode) -> impl Iterator<Item = Result<Connection, DecodeError>> + '_ {
    let pose_id = integer_id(pose.attribute(0));

    pose_id
        .into_iter()
        .flat_map(move |pose_id| {
            pose.children_named("PoseNode").map(move |pose_node| {
                let member = pose_node
                    .child("Node")
                    .and_then(|node| integer_id(node.attribute(0)));
                match member {
                    Some(member) => Ok(Connection::pose_node(member, pose_id)),
                    None => Err(DecodeError::from(
                        Diagnostic::error("pose node without a member id")
                            .with_code(ErrorCode::E204)
                            .with_label(pose_node.span(), ErrorCode::E204.description())
                            .with_help("pose nodes look like `PoseNode: { Node: 100 }`"),
                    )),
                }
            })
        })
}

fn malformed_connection(node: &FbxNode, what: &str) -> DecodeError {
    Diagnostic::error(format!("malformed connection: {what}"))
        .with_code(ErrorCode::E202)
        .with_label(node.span(), ErrorCode::E202.description())
        .with_help("connections look like `C: \"OO\", 200, 100`")
        .into()
}

fn connection(node: &FbxNode) -> Result<Connection, DecodeError> {
    let code_attr = node
        .attribute(0)
        .filter(|attribute| matches!(attribute.value, AttributeValue::String(_)))
        .ok_or_else(|| malformed_connection(node, "missing type code"))?;
    let child = integer_id(node.attribute(1))
        .ok_or_else(|| malformed_connection(node, "missing child id"))?;
    let parent = integer_id(node.attribute(2))
        .ok_or_else(|| malformed_connection(node, "missing parent id"))?;
    let property_name = node.attribute(3).and_then(|attribute| attribute.value.as_str());

    let code = code_attr.value.as_str().unwrap_or_default();
    match (code, property_name) {
        ("OO", _) | ("PO" | "PP", None) => Ok(Connection::object_object(child, parent)),
        ("OP" | "PO" | "PP", Some(name)) => Ok(Connection::object_property(child, parent, name)),
        ("OP", None) => Err(malformed_connection(node, "`OP` without a property name")),
        _ => Err(Diagnostic::error(format!("unknown connection type `{code}`"))
            .with_code(ErrorCode::E203)
            .with_label(code_attr.span, ErrorCode::E203.description())
            .with_help("expected one of `OO`, `OP`, `PO` or `PP`")
            .into()),
    }
}

impl Document {
    fn section<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FbxNode> + 'a {
        self.nodes()
            .iter()
            .filter(move |node| node.name() == name)
            .flat_map(FbxNode::children)
    }

    /// Lazily yields one record per entry of the `Objects` section.
    pub fn object_records(&self) -> impl Iterator<Item = Result<ObjectRecord, DecodeError>> + '_ {
        self.section("Objects").map(object_record)
    }

    /// Lazily yields pose links (when enabled) followed by the `C` entries of
    /// the `Connections` section, in document order.
    pub fn connections(
        &self,
        options: DecodeOptions,
    ) -> impl Iterator<Item = Result<Connection, DecodeError>> + '_ {
        let poses = self
            .section("Objects")
            .filter(move |node| options.pose_links && node.name() == "Pose")
            .flat_map(pose_links);
        let links = self
            .section("Connections")
            .filter(|node| node.name() == "C")
            .map(connection);

        poses.chain(links)
    }
}
