//! The built object graph.

use indexmap::IndexMap;

use depviz_core::{Connection, Object, ObjectId};

/// A directed multigraph of scene objects.
///
/// Objects are kept in insertion order: explicit objects in declaration
/// order, implicit objects where they were first referenced. Connections
/// keep document order. Cycles and parallel edges are allowed.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    objects: IndexMap<ObjectId, Object>,
    connections: Vec<Connection>,
}

impl Graph {
    pub(super) fn new(
        name: String,
        objects: IndexMap<ObjectId, Object>,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            name,
            objects,
            connections,
        }
    }

    /// Name of the source document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the object with the given id.
    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Returns all objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Returns all connections in document order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Returns the objects synthesized for undeclared connection endpoints.
    pub fn implicit_objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values().filter(|object| object.is_implicit())
    }

    /// Returns the targets of connections leaving `id`, once per connection.
    ///
    /// By format convention these are the objects owning `id`.
    pub fn parents(&self, id: ObjectId) -> impl Iterator<Item = &Object> {
        self.connections
            .iter()
            .filter(move |connection| connection.from_id() == id)
            .filter_map(move |connection| self.object(connection.to_id()))
    }

    /// Returns the sources of connections arriving at `id`, once per connection.
    pub fn children(&self, id: ObjectId) -> impl Iterator<Item = &Object> {
        self.connections
            .iter()
            .filter(move |connection| connection.to_id() == id)
            .filter_map(move |connection| self.object(connection.from_id()))
    }
}
