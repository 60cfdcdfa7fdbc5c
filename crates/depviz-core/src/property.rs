//! Display-only object properties.
//!
//! FBX objects carry an open-ended `Properties70` block whose entries differ
//! per class and per exporter version. They are kept as a tagged-value map and
//! never take part in graph topology.

use std::{collections::BTreeMap, fmt};

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Array(Vec<PropertyValue>),
}

/// Property name to value mapping, iterated in name order.
pub type Properties = BTreeMap<String, PropertyValue>;

impl PropertyValue {
    /// Collapses a list of values: a single value is returned as-is, anything
    /// else becomes an [`PropertyValue::Array`].
    pub fn from_values(mut values: Vec<PropertyValue>) -> Self {
        if values.len() == 1 {
            values.remove(0)
        } else {
            PropertyValue::Array(values)
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(value) => write!(f, "{value}"),
            PropertyValue::Integer(value) => write!(f, "{value}"),
            PropertyValue::Float(value) => write!(f, "{value}"),
            PropertyValue::Text(value) => write!(f, "{value}"),
            PropertyValue::Array(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
        }
    }
}
