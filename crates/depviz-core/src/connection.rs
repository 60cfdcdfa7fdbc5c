//! Directed connections between objects.
//!
//! By format convention a connection points from the owned/child object to
//! its owner/parent: `C: "OO", geometry, model` links a geometry to the model
//! that uses it. Connections reference objects by id only.

use std::fmt;

use serde::Deserialize;

use crate::identifier::ObjectId;

/// What a connection terminates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionKind {
    /// Object to object (`OO`).
    #[serde(alias = "OO")]
    ObjectObject,
    /// Object to a named property of the target object (`OP`).
    #[serde(alias = "OP")]
    ObjectProperty,
    /// Membership of an object in a bind or rest pose.
    PoseNode,
}

impl ConnectionKind {
    /// Returns the short code used in FBX `Connections` blocks, or `Pose`
    /// for pose membership links.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::ObjectObject => "OO",
            ConnectionKind::ObjectProperty => "OP",
            ConnectionKind::PoseNode => "Pose",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Connection declarations produced by a decoder are plain [`Connection`]s.
pub type ConnectionRecord = Connection;

/// A directed link between two objects.
///
/// The property name is present exactly when the kind is
/// [`ConnectionKind::ObjectProperty`]; the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    from: ObjectId,
    to: ObjectId,
    kind: ConnectionKind,
    property_name: Option<String>,
}

impl Connection {
    /// Creates an object-to-object connection.
    pub fn object_object(from: ObjectId, to: ObjectId) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::ObjectObject,
            property_name: None,
        }
    }

    /// Creates a connection that terminates at `property_name` on `to`.
    pub fn object_property(from: ObjectId, to: ObjectId, property_name: impl Into<String>) -> Self {
        Self {
            from,
            to,
            kind: ConnectionKind::ObjectProperty,
            property_name: Some(property_name.into()),
        }
    }

    /// Creates a pose membership link from a pose member to its pose.
    pub fn pose_node(member: ObjectId, pose: ObjectId) -> Self {
        Self {
            from: member,
            to: pose,
            kind: ConnectionKind::PoseNode,
            property_name: None,
        }
    }

    pub fn from_id(&self) -> ObjectId {
        self.from
    }

    pub fn to_id(&self) -> ObjectId {
        self.to
    }

    pub fn kind(&self) -> ConnectionKind {
        self.kind
    }

    pub fn property_name(&self) -> Option<&str> {
        self.property_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_property_carries_name() {
        let conn = Connection::object_property(ObjectId::new(3), ObjectId::new(1), "DiffuseColor");
        assert_eq!(conn.kind(), ConnectionKind::ObjectProperty);
        assert_eq!(conn.property_name(), Some("DiffuseColor"));
    }

    #[test]
    fn test_object_object_has_no_name() {
        let conn = Connection::object_object(ObjectId::new(2), ObjectId::new(1));
        assert_eq!(conn.from_id(), ObjectId::new(2));
        assert_eq!(conn.to_id(), ObjectId::new(1));
        assert_eq!(conn.property_name(), None);
    }

    #[test]
    fn test_kind_deserialize_with_aliases() {
        let kind: ConnectionKind = serde_json::from_str("\"object-property\"").unwrap();
        assert_eq!(kind, ConnectionKind::ObjectProperty);
        let kind: ConnectionKind = serde_json::from_str("\"OO\"").unwrap();
        assert_eq!(kind, ConnectionKind::ObjectObject);
        let kind: ConnectionKind = serde_json::from_str("\"pose-node\"").unwrap();
        assert_eq!(kind, ConnectionKind::PoseNode);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ConnectionKind::ObjectObject.to_string(), "OO");
        assert_eq!(ConnectionKind::PoseNode.to_string(), "Pose");
    }
}
