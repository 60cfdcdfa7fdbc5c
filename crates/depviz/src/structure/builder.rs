//! Graph construction from decoder records.

use std::fmt;

use indexmap::{IndexMap, map::Entry};
use log::{debug, info, trace, warn};
use thiserror::Error;

use depviz_core::{Connection, Object, ObjectId, ObjectRecord};

use super::Graph;

/// An id was declared twice with a different class or subclass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "object {id} is declared as `{class}:{subclass}` but was already declared as `{existing_class}:{existing_subclass}`"
)]
pub struct DuplicateObjectError {
    pub id: ObjectId,
    pub existing_class: String,
    pub existing_subclass: String,
    pub class: String,
    pub subclass: String,
}

/// Errors raised while building a graph from a decoder's record streams.
///
/// `E` is the decoder's error type; decoder failures pass through unchanged.
#[derive(Debug)]
pub enum BuildError<E> {
    Decode(E),
    DuplicateObject(DuplicateObjectError),
}

impl<E: fmt::Display> fmt::Display for BuildError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => err.fmt(f),
            Self::DuplicateObject(err) => err.fmt(f),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BuildError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::DuplicateObject(err) => Some(err),
        }
    }
}

impl<E> From<DuplicateObjectError> for BuildError<E> {
    fn from(err: DuplicateObjectError) -> Self {
        Self::DuplicateObject(err)
    }
}

/// Incremental graph builder.
///
/// Declare objects with [`declare`](Self::declare), link them with
/// [`connect`](Self::connect) and call [`finish`](Self::finish). A connection
/// endpoint that was never declared is synthesized as an implicit object the
/// moment it is first referenced. A later declaration of that id replaces
/// the placeholder in place.
///
/// # Examples
///
/// ```
/// use depviz::structure::GraphBuilder;
/// use depviz_core::{Connection, ObjectId, ObjectRecord};
///
/// let mut builder = GraphBuilder::new("scene");
/// builder
///     .declare(ObjectRecord::new(ObjectId::new(1), "Model", "Mesh", "Cube").unwrap())
///     .unwrap();
/// builder.connect(Connection::object_object(ObjectId::new(2), ObjectId::new(1)));
///
/// let graph = builder.finish();
/// assert_eq!(graph.object_count(), 2);
/// assert_eq!(graph.implicit_objects().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    name: String,
    objects: IndexMap<ObjectId, Object>,
    connections: Vec<Connection>,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: IndexMap::new(),
            connections: Vec::new(),
        }
    }

    /// Declares an explicit object.
    ///
    /// Re-declaring an id with the same class and subclass is ignored; the
    /// first declaration is kept.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateObjectError`] if the id is already declared with a
    /// different class or subclass.
    pub fn declare(&mut self, record: ObjectRecord) -> Result<(), DuplicateObjectError> {
        match self.objects.entry(record.id()) {
            Entry::Vacant(entry) => {
                trace!(id:% = record.id(), class = record.class(); "Declared object");
                entry.insert(Object::explicit(record));
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get();
                if existing.is_implicit() {
                    debug!(id:% = record.id(); "Declaration replaces implicit object");
                    entry.insert(Object::explicit(record));
                } else if existing.same_kind(&record) {
                    debug!(id:% = record.id(); "Ignoring repeated declaration");
                } else {
                    return Err(DuplicateObjectError {
                        id: record.id(),
                        existing_class: existing.class().to_string(),
                        existing_subclass: existing.subclass().to_string(),
                        class: record.class().to_string(),
                        subclass: record.subclass().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Appends a connection, synthesizing implicit objects for unknown endpoints.
    pub fn connect(&mut self, connection: Connection) {
        self.ensure_object(connection.from_id());
        self.ensure_object(connection.to_id());
        self.connections.push(connection);
    }

    fn ensure_object(&mut self, id: ObjectId) {
        if !self.objects.contains_key(&id) {
            warn!(id:%; "Connection references an undeclared object, synthesizing an implicit one");
            self.objects.insert(id, Object::implicit(id));
        }
    }

    pub fn finish(self) -> Graph {
        Graph::new(self.name, self.objects, self.connections)
    }
}

/// Builds a graph from lazy record and connection streams.
///
/// All records are consumed before any connection, so connections may
/// reference objects declared anywhere in the document. Connection order is
/// preserved exactly.
///
/// # Errors
///
/// Stops at the first decoder error ([`BuildError::Decode`]) or conflicting
/// declaration ([`BuildError::DuplicateObject`]).
pub fn build<E, R, C>(
    name: impl Into<String>,
    records: R,
    connections: C,
) -> Result<Graph, BuildError<E>>
where
    R: IntoIterator<Item = Result<ObjectRecord, E>>,
    C: IntoIterator<Item = Result<Connection, E>>,
{
    let mut builder = GraphBuilder::new(name);
    info!(name = builder.name.as_str(); "Building object graph");

    for record in records {
        builder.declare(record.map_err(BuildError::Decode)?)?;
    }
    let declared = builder.objects.len();

    for connection in connections {
        builder.connect(connection.map_err(BuildError::Decode)?);
    }

    let graph = builder.finish();
    debug!(
        objects = graph.object_count(),
        declared,
        implicit = graph.object_count() - declared,
        connections = graph.connection_count();
        "Object graph built"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use depviz_core::Origin;
    use proptest::prelude::*;

    use super::*;

    fn id(value: i64) -> ObjectId {
        ObjectId::new(value)
    }

    fn record(value: i64, class: &str, subclass: &str) -> ObjectRecord {
        ObjectRecord::new(id(value), class, subclass, "").unwrap()
    }

    fn build_ok(
        records: Vec<ObjectRecord>,
        connections: Vec<Connection>,
    ) -> Result<Graph, BuildError<Infallible>> {
        build(
            "test",
            records.into_iter().map(Ok),
            connections.into_iter().map(Ok),
        )
    }

    #[test]
    fn test_identical_redeclaration_is_tolerated() {
        let graph = build_ok(
            vec![record(1, "Model", "Mesh"), record(1, "Model", "Mesh")],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(graph.object_count(), 1);
    }

    #[test]
    fn test_conflicting_redeclaration_fails() {
        let err = build_ok(
            vec![record(1, "Model", "Mesh"), record(1, "Model", "Null")],
            Vec::new(),
        )
        .unwrap_err();
        let err = match err {
            BuildError::DuplicateObject(err) => err,
            BuildError::Decode(never) => match never {},
        };
        assert_eq!(err.id, id(1));
        assert_eq!(err.existing_subclass, "Mesh");
        assert_eq!(err.subclass, "Null");
        assert_eq!(
            err.to_string(),
            "object 1 is declared as `Model:Null` but was already declared as `Model:Mesh`"
        );
    }

    #[test]
    fn test_dangling_reference_synthesizes_implicit_object() {
        let graph = build_ok(
            vec![record(1, "Model", "Mesh")],
            vec![Connection::object_object(id(42), id(1))],
        )
        .unwrap();

        let implicit = graph.object(id(42)).unwrap();
        assert_eq!(implicit.origin(), Origin::Implicit);
        assert_eq!(implicit.class(), "");
        assert_eq!(implicit.subclass(), "");
        assert_eq!(implicit.name(), "");
    }

    #[test]
    fn test_declaration_after_reference_replaces_placeholder() {
        let mut builder = GraphBuilder::new("test");
        builder.connect(Connection::object_object(id(2), id(1)));
        builder.declare(record(1, "Model", "Null")).unwrap();
        let graph = builder.finish();

        let ids: Vec<i64> = graph.objects().map(|o| o.id().value()).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(graph.object(id(1)).unwrap().origin(), Origin::Explicit);
        assert_eq!(graph.object(id(2)).unwrap().origin(), Origin::Implicit);
    }

    #[test]
    fn test_cycles_and_self_loops_are_kept() {
        let graph = build_ok(
            vec![record(1, "Model", ""), record(2, "Model", "")],
            vec![
                Connection::object_object(id(1), id(2)),
                Connection::object_object(id(2), id(1)),
                Connection::object_object(id(1), id(1)),
            ],
        )
        .unwrap();
        assert_eq!(graph.connection_count(), 3);
        assert_eq!(graph.implicit_objects().count(), 0);
    }

    #[test]
    fn test_decoder_error_passes_through() {
        let records: Vec<Result<ObjectRecord, String>> =
            vec![Ok(record(1, "Model", "")), Err("bad record".to_string())];
        let err = build("test", records, Vec::new()).unwrap_err();
        assert!(matches!(err, BuildError::Decode(ref message) if message == "bad record"));
    }

    fn arb_records() -> impl Strategy<Value = Vec<ObjectRecord>> {
        prop::collection::vec((0i64..20, prop::sample::select(vec!["Model", "Geometry"])), 0..15)
            .prop_map(|pairs| {
                let mut seen = std::collections::HashSet::new();
                pairs
                    .into_iter()
                    .filter(|(value, _)| seen.insert(*value))
                    .map(|(value, class)| record(value, class, ""))
                    .collect()
            })
    }

    fn arb_connections() -> impl Strategy<Value = Vec<Connection>> {
        prop::collection::vec((0i64..30, 0i64..30, any::<bool>()), 0..30).prop_map(|triples| {
            triples
                .into_iter()
                .map(|(from, to, property)| {
                    if property {
                        Connection::object_property(id(from), id(to), "Prop")
                    } else {
                        Connection::object_object(id(from), id(to))
                    }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_referential_closure(records in arb_records(), connections in arb_connections()) {
            let graph = build_ok(records, connections.clone()).unwrap();

            for connection in graph.connections() {
                prop_assert!(graph.object(connection.from_id()).is_some());
                prop_assert!(graph.object(connection.to_id()).is_some());
            }
            prop_assert_eq!(graph.connections(), connections.as_slice());
        }

        #[test]
        fn test_rebuild_is_identical(records in arb_records(), connections in arb_connections()) {
            let first = build_ok(records.clone(), connections.clone()).unwrap();
            let second = build_ok(records, connections).unwrap();

            let order = |graph: &Graph| graph.objects().map(Object::id).collect::<Vec<_>>();
            prop_assert_eq!(order(&first), order(&second));
            prop_assert_eq!(
                first.implicit_objects().count(),
                second.implicit_objects().count()
            );
            prop_assert_eq!(first.connections(), second.connections());
        }
    }
}
