//! Scene objects.
//!
//! An [`ObjectRecord`] is what a decoder declares; an [`Object`] is the graph's
//! view of it, tagged with its [`Origin`]. Objects that are referenced by a
//! connection but never declared are synthesized with [`Object::implicit`].

use std::hash::{Hash, Hasher};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    identifier::ObjectId,
    property::{Properties, PropertyValue},
};

/// Errors raised by object model validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("object {id} has an empty class")]
    EmptyClass { id: ObjectId },
}

/// Where an object came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Declared in the source document.
    Explicit,
    /// Synthesized for a connection endpoint that was never declared.
    Implicit,
}

/// An object declaration produced by a decoder.
///
/// The class is mandatory. A subclass of `*` is the format's "no subclass"
/// marker and is stored as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    id: ObjectId,
    class: String,
    subclass: String,
    name: String,
    properties: Properties,
}

impl ObjectRecord {
    /// Creates a declaration, rejecting an empty class.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyClass`] if `class` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use depviz_core::{ObjectId, ObjectRecord};
    ///
    /// let record = ObjectRecord::new(ObjectId::new(1), "Model", "Mesh", "Cube").unwrap();
    /// assert_eq!(record.class(), "Model");
    ///
    /// assert!(ObjectRecord::new(ObjectId::new(2), "", "Mesh", "Cube").is_err());
    /// ```
    pub fn new(
        id: ObjectId,
        class: impl Into<String>,
        subclass: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let class = class.into();
        if class.is_empty() {
            return Err(ModelError::EmptyClass { id });
        }

        let mut subclass = subclass.into();
        if subclass == "*" {
            subclass.clear();
        }

        Ok(Self {
            id,
            class,
            subclass,
            name: name.into(),
            properties: Properties::new(),
        })
    }

    /// Adds a display property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Replaces all display properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn subclass(&self) -> &str {
        &self.subclass
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// A node of the scene dependency graph.
///
/// Objects compare and hash by id only.
#[derive(Debug, Clone)]
pub struct Object {
    id: ObjectId,
    class: String,
    subclass: String,
    name: String,
    origin: Origin,
    properties: Properties,
}

impl Object {
    /// Creates an explicit object from a decoder declaration.
    pub fn explicit(record: ObjectRecord) -> Self {
        let ObjectRecord {
            id,
            class,
            subclass,
            name,
            properties,
        } = record;
        Self {
            id,
            class,
            subclass,
            name,
            origin: Origin::Explicit,
            properties,
        }
    }

    /// Creates a placeholder for an id that a connection references but no
    /// declaration provides. Class, subclass and name are empty.
    pub fn implicit(id: ObjectId) -> Self {
        Self {
            id,
            class: String::new(),
            subclass: String::new(),
            name: String::new(),
            origin: Origin::Implicit,
            properties: Properties::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Top-level category such as `Model` or `Geometry`. Empty for implicit objects.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Refinement of the class such as `Mesh` or `LimbNode`. Empty when absent.
    pub fn subclass(&self) -> &str {
        &self.subclass
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_implicit(&self) -> bool {
        self.origin == Origin::Implicit
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Returns `true` if `record` declares the same class and subclass.
    pub fn same_kind(&self, record: &ObjectRecord) -> bool {
        self.class == record.class && self.subclass == record.subclass
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
