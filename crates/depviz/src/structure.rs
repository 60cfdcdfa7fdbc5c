//! Object graph construction and queries.
//!
//! This module turns the decoder's object and connection records into a
//! [`Graph`]:
//! - **Graph**: objects keyed by id plus connections in document order [`Graph`]
//! - **Builder**: incremental construction with duplicate detection and
//!   implicit object synthesis [`GraphBuilder`], [`build`]
//! - **Errors**: [`DuplicateObjectError`], [`BuildError`]
//!
//! The builder guarantees referential closure: every connection endpoint
//! resolves to an object in the same graph. It performs no cycle detection.

mod builder;
mod graph;

pub use builder::{BuildError, DuplicateObjectError, GraphBuilder, build};
pub use graph::Graph;
