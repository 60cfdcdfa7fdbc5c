//! Render decisions produced by the filter engine.

use std::collections::HashMap;

use indexmap::IndexMap;

use depviz_core::ObjectId;

use crate::config::Attributes;

/// Resolved DOT attributes of one element, in the order they are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    attributes: IndexMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }
}

/// Outcome of filtering one node or edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Hidden,
    Visible(Style),
}

impl Decision {
    pub fn is_visible(&self) -> bool {
        matches!(self, Decision::Visible(_))
    }

    /// Returns the style of a visible element.
    pub fn style(&self) -> Option<&Style> {
        match self {
            Decision::Visible(style) => Some(style),
            Decision::Hidden => None,
        }
    }
}

/// Decisions for every object of a graph and every connection by index.
///
/// Produced by [`Filter::evaluate`](super::Filter::evaluate); the graph itself
/// is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDecisions {
    nodes: HashMap<ObjectId, Decision>,
    edges: Vec<Decision>,
    graph_style: Style,
    node_style: Style,
    edge_style: Style,
}

impl RenderDecisions {
    pub(crate) fn new(
        nodes: HashMap<ObjectId, Decision>,
        edges: Vec<Decision>,
        graph_style: Style,
        node_style: Style,
        edge_style: Style,
    ) -> Self {
        Self {
            nodes,
            edges,
            graph_style,
            node_style,
            edge_style,
        }
    }

    /// Decision for the object with the given id.
    pub fn node(&self, id: ObjectId) -> Option<&Decision> {
        self.nodes.get(&id)
    }

    /// Decision for the connection at `index` in graph order.
    pub fn edge(&self, index: usize) -> Option<&Decision> {
        self.edges.get(index)
    }

    pub fn is_node_visible(&self, id: ObjectId) -> bool {
        self.node(id).is_some_and(Decision::is_visible)
    }

    pub fn is_edge_visible(&self, index: usize) -> bool {
        self.edge(index).is_some_and(Decision::is_visible)
    }

    pub fn visible_node_count(&self) -> usize {
        self.nodes.values().filter(|d| d.is_visible()).count()
    }

    pub fn visible_edge_count(&self) -> usize {
        self.edges.iter().filter(|d| d.is_visible()).count()
    }

    /// Attributes of the `graph [...]` statement.
    pub fn graph_style(&self) -> &Style {
        &self.graph_style
    }

    /// Attributes of the `node [...]` statement.
    pub fn node_style(&self) -> &Style {
        &self.node_style
    }

    /// Attributes of the `edge [...]` statement.
    pub fn edge_style(&self) -> &Style {
        &self.edge_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StyleValue;

    #[test]
    fn test_style_from_attributes_keeps_order() {
        let mut attributes = Attributes::new();
        attributes.insert("shape".to_string(), StyleValue::from("box"));
        attributes.insert("penwidth".to_string(), StyleValue::from(2));
        attributes.insert("filled".to_string(), StyleValue::from(true));

        let style = Style::from_attributes(&attributes);
        let pairs: Vec<_> = style.iter().collect();
        assert_eq!(
            pairs,
            vec![("shape", "box"), ("penwidth", "2"), ("filled", "true")]
        );
        assert!(style.contains("shape"));
        assert_eq!(style.get("penwidth"), Some("2"));
    }

    #[test]
    fn test_decision_queries() {
        let mut nodes = HashMap::new();
        nodes.insert(ObjectId::new(1), Decision::Visible(Style::new()));
        nodes.insert(ObjectId::new(2), Decision::Hidden);
        let decisions = RenderDecisions::new(
            nodes,
            vec![Decision::Hidden],
            Style::new(),
            Style::new(),
            Style::new(),
        );

        assert!(decisions.is_node_visible(ObjectId::new(1)));
        assert!(!decisions.is_node_visible(ObjectId::new(2)));
        assert!(!decisions.is_node_visible(ObjectId::new(3)));
        assert!(!decisions.is_edge_visible(0));
        assert!(!decisions.is_edge_visible(1));
        assert_eq!(decisions.visible_node_count(), 1);
        assert_eq!(decisions.visible_edge_count(), 0);
        assert_eq!(decisions.node(ObjectId::new(2)).and_then(Decision::style), None);
    }
}
