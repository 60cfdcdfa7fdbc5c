//! Depviz Core Types and Definitions
//!
//! This crate provides the object model shared by the decoder and the graph
//! pipeline. It includes:
//!
//! - **Identifiers**: Document-stable 64-bit object ids ([`identifier::ObjectId`])
//! - **Objects**: Scene objects and decoder declarations ([`object`] module)
//! - **Connections**: Directed links between objects ([`connection`] module)
//! - **Properties**: Display-only tagged property values ([`property`] module)

pub mod connection;
pub mod identifier;
pub mod object;
pub mod property;

pub use connection::{Connection, ConnectionKind, ConnectionRecord};
pub use identifier::ObjectId;
pub use object::{ModelError, Object, ObjectRecord, Origin};
pub use property::{Properties, PropertyValue};
