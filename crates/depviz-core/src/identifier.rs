//! Object identifiers.
//!
//! FBX documents key every object by a signed 64-bit unique id. The same id
//! is used by connections to reference their endpoints, so the id is the only
//! notion of identity in the graph.

use std::fmt;

/// Unique identifier of a scene object within one source document.
///
/// Ids are assigned by the decoder from the document, or taken from a
/// dangling connection endpoint when an implicit object is synthesized.
///
/// # Examples
///
/// ```
/// use depviz_core::identifier::ObjectId;
///
/// let id = ObjectId::new(140_000);
/// assert_eq!(id.value(), 140_000);
/// assert_eq!(id.to_string(), "140000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(i64);

impl ObjectId {
    /// Creates an id from its raw value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ObjectId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
