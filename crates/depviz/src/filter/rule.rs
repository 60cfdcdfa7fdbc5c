//! Compiled style rule predicates.

use depviz_core::{Connection, ConnectionKind, Object, ObjectId, Origin};

use super::{FilterError, pattern::Pattern};
use crate::{
    config::{PredicateConfig, RuleTarget, StyleRuleConfig},
    filter::decision::Style,
    structure::Graph,
};

fn compile_pattern(
    prefix: &str,
    field: &str,
    pattern: Option<&String>,
) -> Result<Option<Pattern>, FilterError> {
    pattern
        .map(|pattern| Pattern::new(format!("{prefix}.{field}"), pattern))
        .transpose()
}

/// Conditions over an object's attributes. Every set condition must hold.
#[derive(Debug, Clone, Default)]
pub struct NodePredicate {
    class: Option<Pattern>,
    subclass: Option<Pattern>,
    name: Option<Pattern>,
    id: Option<Pattern>,
    origin: Option<Origin>,
}

impl NodePredicate {
    /// Compiles a node predicate; `prefix` names it in error messages.
    fn compile(rule: usize, prefix: &str, config: &PredicateConfig) -> Result<Self, FilterError> {
        if let Some(field) = config.edge_fields().first() {
            return Err(FilterError::Predicate {
                rule,
                message: format!("`{prefix}` accepts node fields only, found edge field `{field}`"),
            });
        }

        Ok(Self {
            class: compile_pattern(prefix, "class", config.class.as_ref())?,
            subclass: compile_pattern(prefix, "subclass", config.subclass.as_ref())?,
            name: compile_pattern(prefix, "name", config.name.as_ref())?,
            id: compile_pattern(prefix, "id", config.id.as_ref())?,
            origin: config.origin,
        })
    }

    pub fn matches(&self, object: &Object) -> bool {
        let matches = |pattern: &Option<Pattern>, value: &str| {
            pattern.as_ref().is_none_or(|pattern| pattern.is_match(value))
        };

        matches(&self.class, object.class())
            && matches(&self.subclass, object.subclass())
            && matches(&self.name, object.name())
            && self
                .id
                .as_ref()
                .is_none_or(|pattern| pattern.is_match(&object.id().to_string()))
            && self.origin.is_none_or(|origin| origin == object.origin())
    }
}

/// Conditions over a connection and its endpoint objects.
#[derive(Debug, Clone, Default)]
pub struct EdgePredicate {
    kind: Option<ConnectionKind>,
    property_name: Option<Pattern>,
    from: Option<NodePredicate>,
    to: Option<NodePredicate>,
}

impl EdgePredicate {
    fn compile(rule: usize, prefix: &str, config: &PredicateConfig) -> Result<Self, FilterError> {
        if let Some(field) = config.node_fields().first() {
            return Err(FilterError::Predicate {
                rule,
                message: format!(
                    "edge rules cannot use node field `{field}` directly, use `from` or `to`"
                ),
            });
        }

        let endpoint = |name: &str, config: Option<&PredicateConfig>| {
            config
                .map(|config| NodePredicate::compile(rule, &format!("{prefix}.{name}"), config))
                .transpose()
        };

        Ok(Self {
            kind: config.kind,
            property_name: compile_pattern(prefix, "property_name", config.property_name.as_ref())?,
            from: endpoint("from", config.from.as_deref())?,
            to: endpoint("to", config.to.as_deref())?,
        })
    }

    /// Returns `true` if the connection satisfies every set condition.
    ///
    /// A `property_name` condition never matches a connection without a
    /// property name.
    pub fn matches(&self, connection: &Connection, graph: &Graph) -> bool {
        let endpoint_matches = |predicate: &Option<NodePredicate>, id: ObjectId| {
            predicate.as_ref().is_none_or(|predicate| {
                graph
                    .object(id)
                    .is_some_and(|object| predicate.matches(object))
            })
        };

        self.kind.is_none_or(|kind| kind == connection.kind())
            && self.property_name.as_ref().is_none_or(|pattern| {
                connection
                    .property_name()
                    .is_some_and(|name| pattern.is_match(name))
            })
            && endpoint_matches(&self.from, connection.from_id())
            && endpoint_matches(&self.to, connection.to_id())
    }
}

/// A compiled style rule: a predicate and the style it applies.
#[derive(Debug, Clone)]
pub struct StyleRule<P> {
    predicate: P,
    style: Style,
}

impl<P> StyleRule<P> {
    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

pub type NodeRule = StyleRule<NodePredicate>;
pub type EdgeRule = StyleRule<EdgePredicate>;

/// Compiles the ordered rule list, splitting it by target.
///
/// Relative order is kept within each target.
pub(super) fn compile_rules(
    rules: &[StyleRuleConfig],
) -> Result<(Vec<NodeRule>, Vec<EdgeRule>), FilterError> {
    let mut node_rules = Vec::new();
    let mut edge_rules = Vec::new();

    for (index, rule) in rules.iter().enumerate() {
        let prefix = format!("style_rules[{index}].when");
        let style = Style::from_attributes(&rule.attributes);
        match rule.applies_to {
            RuleTarget::Node => node_rules.push(StyleRule {
                predicate: NodePredicate::compile(index, &prefix, &rule.when)?,
                style,
            }),
            RuleTarget::Edge => edge_rules.push(StyleRule {
                predicate: EdgePredicate::compile(index, &prefix, &rule.when)?,
                style,
            }),
        }
    }

    Ok((node_rules, edge_rules))
}
