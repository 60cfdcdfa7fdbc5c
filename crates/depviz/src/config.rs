//! Configuration types for depviz graph rendering.
//!
//! This module provides the configuration that controls decoding, filtering
//! and styling. All types implement [`serde::Deserialize`] for loading from
//! external documents; unknown fields are rejected.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining decode and filter settings.
//! - [`DecodeConfig`] - Options passed to the FBX decoder.
//! - [`FilterConfig`] - Patterns, implicit-object visibility, global DOT
//!   attributes and ordered [`StyleRuleConfig`]s.
//!
//! # Example
//!
//! ```
//! # use depviz::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.filter().class_pattern(), ".*");
//! assert!(!config.filter().show_implicit_nodes());
//! assert!(config.decode().pose_links());
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use depviz_core::{ConnectionKind, Origin};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Decoder section.
    #[serde(default)]
    decode: DecodeConfig,

    /// Filter and style section.
    #[serde(default)]
    filter: FilterConfig,
}

impl AppConfig {
    pub fn new(decode: DecodeConfig, filter: FilterConfig) -> Self {
        Self { decode, filter }
    }

    /// Returns the decoder configuration.
    pub fn decode(&self) -> &DecodeConfig {
        &self.decode
    }

    /// Returns the filter configuration.
    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }
}

/// Options for the FBX decoder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeConfig {
    /// Link every pose member to its `Pose` object.
    pose_links: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { pose_links: true }
    }
}

impl DecodeConfig {
    pub fn new(pose_links: bool) -> Self {
        Self { pose_links }
    }

    pub fn pose_links(&self) -> bool {
        self.pose_links
    }
}

/// A style attribute value: string, integer, float or boolean.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(value) => write!(f, "{value}"),
            StyleValue::Integer(value) => write!(f, "{value}"),
            StyleValue::Float(value) => write!(f, "{value}"),
            StyleValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Integer(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Float(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

/// Ordered DOT attributes as written in the configuration document.
pub type Attributes = IndexMap<String, StyleValue>;

/// Which graph elements a style rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTarget {
    Node,
    Edge,
}

/// Conditions of a style rule.
///
/// Node rules use `class`, `subclass`, `name`, `id` and `origin`. Edge rules
/// use `kind`, `property_name` and the endpoint predicates `from` and `to`,
/// which themselves accept node fields only. String fields are regular
/// expressions matched against the whole value. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredicateConfig {
    pub class: Option<String>,
    pub subclass: Option<String>,
    pub name: Option<String>,
    /// Pattern over the decimal object id.
    pub id: Option<String>,
    pub origin: Option<Origin>,
    pub kind: Option<ConnectionKind>,
    pub property_name: Option<String>,
    pub from: Option<Box<PredicateConfig>>,
    pub to: Option<Box<PredicateConfig>>,
}

impl PredicateConfig {
    /// Names of the node fields that are set.
    pub(crate) fn node_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.class.is_some() {
            fields.push("class");
        }
        if self.subclass.is_some() {
            fields.push("subclass");
        }
        if self.name.is_some() {
            fields.push("name");
        }
        if self.id.is_some() {
            fields.push("id");
        }
        if self.origin.is_some() {
            fields.push("origin");
        }
        fields
    }

    /// Names of the edge fields that are set.
    pub(crate) fn edge_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.kind.is_some() {
            fields.push("kind");
        }
        if self.property_name.is_some() {
            fields.push("property_name");
        }
        if self.from.is_some() {
            fields.push("from");
        }
        if self.to.is_some() {
            fields.push("to");
        }
        fields
    }
}

/// One entry of the ordered style rule list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleRuleConfig {
    pub applies_to: RuleTarget,
    #[serde(default)]
    pub when: PredicateConfig,
    #[serde(default)]
    pub attributes: Attributes,
}

impl StyleRuleConfig {
    /// Creates a node rule with no attributes.
    pub fn node(when: PredicateConfig) -> Self {
        Self {
            applies_to: RuleTarget::Node,
            when,
            attributes: Attributes::new(),
        }
    }

    /// Creates an edge rule with no attributes.
    pub fn edge(when: PredicateConfig) -> Self {
        Self {
            applies_to: RuleTarget::Edge,
            when,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Filter and style configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Anchored pattern objects' class must match.
    class_pattern: String,
    /// Anchored pattern objects' subclass must match; absent subclass is empty.
    subclass_pattern: String,
    show_implicit_nodes: bool,
    /// Add a `tooltip` listing each visible object's properties.
    show_properties: bool,
    graph_attributes: Attributes,
    node_attributes: Attributes,
    edge_attributes: Attributes,
    style_rules: Vec<StyleRuleConfig>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            class_pattern: ".*".to_string(),
            subclass_pattern: ".*".to_string(),
            show_implicit_nodes: false,
            show_properties: false,
            graph_attributes: Attributes::new(),
            node_attributes: Attributes::new(),
            edge_attributes: Attributes::new(),
            style_rules: Vec::new(),
        }
    }
}

impl FilterConfig {
    pub fn class_pattern(&self) -> &str {
        &self.class_pattern
    }

    pub fn subclass_pattern(&self) -> &str {
        &self.subclass_pattern
    }

    pub fn show_implicit_nodes(&self) -> bool {
        self.show_implicit_nodes
    }

    pub fn show_properties(&self) -> bool {
        self.show_properties
    }

    /// Attributes for the `graph [...]` statement.
    pub fn graph_attributes(&self) -> &Attributes {
        &self.graph_attributes
    }

    /// Attributes for the `node [...]` statement.
    pub fn node_attributes(&self) -> &Attributes {
        &self.node_attributes
    }

    /// Attributes for the `edge [...]` statement.
    pub fn edge_attributes(&self) -> &Attributes {
        &self.edge_attributes
    }

    pub fn style_rules(&self) -> &[StyleRuleConfig] {
        &self.style_rules
    }

    pub fn with_class_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.class_pattern = pattern.into();
        self
    }

    pub fn with_subclass_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.subclass_pattern = pattern.into();
        self
    }

    pub fn with_show_implicit_nodes(mut self, show: bool) -> Self {
        self.show_implicit_nodes = show;
        self
    }

    pub fn with_show_properties(mut self, show: bool) -> Self {
        self.show_properties = show;
        self
    }

    pub fn with_graph_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Self {
        self.graph_attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_node_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Self {
        self.node_attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_edge_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Self {
        self.edge_attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a style rule; earlier rules take precedence.
    pub fn with_style_rule(mut self, rule: StyleRuleConfig) -> Self {
        self.style_rules.push(rule);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.filter().class_pattern(), ".*");
        assert_eq!(config.filter().subclass_pattern(), ".*");
        assert!(!config.filter().show_implicit_nodes());
        assert!(!config.filter().show_properties());
        assert!(config.filter().style_rules().is_empty());
        assert!(config.decode().pose_links());
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r#"
[decode]
pose_links = false

[filter]
class_pattern = "^Model$|^Geometry$"
show_implicit_nodes = true

[filter.graph_attributes]
rankdir = "LR"

[[filter.style_rules]]
applies_to = "node"
when = { class = "Model", origin = "explicit" }
attributes = { color = "blue", penwidth = 2, bold = true, weight = 1.5 }

[[filter.style_rules]]
applies_to = "edge"
when = { kind = "OP", from = { class = "Texture" } }
"#,
        )
        .unwrap();

        assert!(!config.decode().pose_links());
        let filter = config.filter();
        assert_eq!(filter.class_pattern(), "^Model$|^Geometry$");
        assert_eq!(filter.subclass_pattern(), ".*");
        assert!(filter.show_implicit_nodes());
        assert_eq!(
            filter.graph_attributes().get("rankdir"),
            Some(&StyleValue::Text("LR".to_string()))
        );

        let rules = filter.style_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].applies_to, RuleTarget::Node);
        assert_eq!(rules[0].when.origin, Some(Origin::Explicit));
        assert_eq!(rules[0].attributes.get("penwidth"), Some(&StyleValue::Integer(2)));
        assert_eq!(rules[0].attributes.get("bold"), Some(&StyleValue::Bool(true)));
        assert_eq!(rules[0].attributes.get("weight"), Some(&StyleValue::Float(1.5)));

        assert_eq!(rules[1].when.kind, Some(ConnectionKind::ObjectProperty));
        assert_eq!(
            rules[1].when.from.as_ref().and_then(|from| from.class.as_deref()),
            Some("Texture")
        );
        assert!(rules[1].attributes.is_empty());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(toml::from_str::<AppConfig>("[filter]\nclass = \"Model\"").is_err());
        assert!(toml::from_str::<AppConfig>("[layout]\n").is_err());
        assert!(
            toml::from_str::<AppConfig>(
                "[[filter.style_rules]]\napplies_to = \"node\"\nwhen = { colour = \"x\" }"
            )
            .is_err()
        );
    }

    #[test]
    fn test_style_value_display() {
        assert_eq!(StyleValue::from("box").to_string(), "box");
        assert_eq!(StyleValue::from(2).to_string(), "2");
        assert_eq!(StyleValue::from(1.5).to_string(), "1.5");
        assert_eq!(StyleValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_predicate_field_lists() {
        let predicate = PredicateConfig {
            class: Some("Model".to_string()),
            kind: Some(ConnectionKind::ObjectObject),
            ..PredicateConfig::default()
        };
        assert_eq!(predicate.node_fields(), vec!["class"]);
        assert_eq!(predicate.edge_fields(), vec!["kind"]);
    }
}
