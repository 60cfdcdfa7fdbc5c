//! Filter engine.
//!
//! A [`Filter`] is compiled once from a [`FilterConfig`] and evaluated
//! against a [`Graph`] to produce [`RenderDecisions`]: one [`Decision`] per
//! object and per connection. The graph is never modified, and a filter holds
//! no state between evaluations, so the same graph can be evaluated with any
//! number of filters.
//!
//! # Node decisions
//!
//! An object is hidden when it is implicit and implicit objects are not
//! shown, or when its class or subclass does not match the anchored patterns.
//! Otherwise it is visible with the style of the first matching node rule.
//!
//! # Edge decisions
//!
//! A connection is visible exactly when both endpoints are visible. Edge
//! rules only choose its style.

mod decision;
mod pattern;
mod rule;

use std::collections::HashMap;

use log::{debug, info, trace};
use thiserror::Error;

use depviz_core::{Object, ObjectId};

use crate::{config::FilterConfig, structure::Graph};

pub use decision::{Decision, RenderDecisions, Style};
pub use pattern::Pattern;
pub use rule::{EdgePredicate, EdgeRule, NodePredicate, NodeRule, StyleRule};

/// Invalid filter configuration.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid pattern `{pattern}` for `{field}`: {source}")]
    Pattern {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid predicate in style rule {rule}: {message}")]
    Predicate { rule: usize, message: String },
}

/// A compiled filter configuration.
#[derive(Debug, Clone)]
pub struct Filter {
    class_pattern: Pattern,
    subclass_pattern: Pattern,
    show_implicit_nodes: bool,
    show_properties: bool,
    graph_style: Style,
    node_style: Style,
    edge_style: Style,
    node_rules: Vec<NodeRule>,
    edge_rules: Vec<EdgeRule>,
}

impl Filter {
    /// Compiles every pattern and predicate of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first pattern that does not compile or
    /// the first rule whose predicate uses fields of the wrong target.
    pub fn compile(config: &FilterConfig) -> Result<Self, FilterError> {
        let (node_rules, edge_rules) = rule::compile_rules(config.style_rules())?;

        let filter = Self {
            class_pattern: Pattern::new("class_pattern", config.class_pattern())?,
            subclass_pattern: Pattern::new("subclass_pattern", config.subclass_pattern())?,
            show_implicit_nodes: config.show_implicit_nodes(),
            show_properties: config.show_properties(),
            graph_style: Style::from_attributes(config.graph_attributes()),
            node_style: Style::from_attributes(config.node_attributes()),
            edge_style: Style::from_attributes(config.edge_attributes()),
            node_rules,
            edge_rules,
        };
        debug!(
            class_pattern = filter.class_pattern.as_str(),
            subclass_pattern = filter.subclass_pattern.as_str(),
            node_rules = filter.node_rules.len(),
            edge_rules = filter.edge_rules.len();
            "Filter compiled"
        );
        Ok(filter)
    }

    fn is_selected(&self, object: &Object) -> bool {
        if object.is_implicit() && !self.show_implicit_nodes {
            return false;
        }
        self.class_pattern.is_match(object.class())
            && self.subclass_pattern.is_match(object.subclass())
    }

    fn node_decision(&self, object: &Object) -> Decision {
        if !self.is_selected(object) {
            return Decision::Hidden;
        }

        let mut style = self
            .node_rules
            .iter()
            .find(|rule| rule.predicate().matches(object))
            .map(|rule| rule.style().clone())
            .unwrap_or_default();

        if self.show_properties && !object.properties().is_empty() && !style.contains("tooltip") {
            let tooltip = object
                .properties()
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join("\n");
            style.insert("tooltip", tooltip);
        }

        Decision::Visible(style)
    }

    /// Decides the visibility and style of every object and connection.
    pub fn evaluate(&self, graph: &Graph) -> RenderDecisions {
        info!(graph = graph.name(); "Evaluating filter");

        let nodes: HashMap<_, _> = graph
            .objects()
            .map(|object| {
                let decision = self.node_decision(object);
                trace!(id:% = object.id(), visible = decision.is_visible(); "Node decision");
                (object.id(), decision)
            })
            .collect();

        let is_visible = |id: ObjectId| nodes.get(&id).is_some_and(Decision::is_visible);
        let edges: Vec<Decision> = graph
            .connections()
            .iter()
            .map(|connection| {
                if !(is_visible(connection.from_id()) && is_visible(connection.to_id())) {
                    return Decision::Hidden;
                }
                let style = self
                    .edge_rules
                    .iter()
                    .find(|rule| rule.predicate().matches(connection, graph))
                    .map(|rule| rule.style().clone())
                    .unwrap_or_default();
                Decision::Visible(style)
            })
            .collect();

        let decisions = RenderDecisions::new(
            nodes,
            edges,
            self.graph_style.clone(),
            self.node_style.clone(),
            self.edge_style.clone(),
        );
        debug!(
            visible_nodes = decisions.visible_node_count(),
            hidden_nodes = graph.object_count() - decisions.visible_node_count(),
            visible_edges = decisions.visible_edge_count(),
            hidden_edges = graph.connection_count() - decisions.visible_edge_count();
            "Filter evaluated"
        );
        decisions
    }
}

/// Compiles `config` and evaluates it against `graph`.
///
/// # Errors
///
/// Returns [`FilterError`] if the configuration is invalid; no graph work is
/// done in that case.
pub fn evaluate(graph: &Graph, config: &FilterConfig) -> Result<RenderDecisions, FilterError> {
    Ok(Filter::compile(config)?.evaluate(graph))
}
