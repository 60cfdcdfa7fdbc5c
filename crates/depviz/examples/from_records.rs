//! Builds a graph from hand-written records and prints it as DOT.
//!
//! Run with `cargo run -p depviz --example from_records`.

use std::{convert::Infallible, io};

use depviz::{
    config::{FilterConfig, PredicateConfig, StyleRuleConfig},
    export::{Exporter, dot::DotExporter},
    filter::Filter,
    structure::build,
};
use depviz_core::{Connection, ObjectId, ObjectRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = vec![
        ObjectRecord::new(ObjectId::new(100), "Model", "Mesh", "Cube")?,
        ObjectRecord::new(ObjectId::new(200), "Geometry", "Mesh", "Cube")?,
        ObjectRecord::new(ObjectId::new(300), "Material", "", "Red")?,
        ObjectRecord::new(ObjectId::new(400), "Texture", "", "Wood")?,
    ];
    let connections = vec![
        Connection::object_object(ObjectId::new(100), ObjectId::new(0)),
        Connection::object_object(ObjectId::new(200), ObjectId::new(100)),
        Connection::object_object(ObjectId::new(300), ObjectId::new(100)),
        Connection::object_property(ObjectId::new(400), ObjectId::new(300), "DiffuseColor"),
    ];

    let graph = build::<Infallible, _, _>(
        "from_records",
        records.into_iter().map(Ok),
        connections.into_iter().map(Ok),
    )?;

    let config = FilterConfig::default()
        .with_show_implicit_nodes(true)
        .with_graph_attribute("rankdir", "LR")
        .with_style_rule(
            StyleRuleConfig::node(PredicateConfig {
                class: Some("Model".to_string()),
                ..PredicateConfig::default()
            })
            .with_attribute("shape", "box"),
        )
        .with_style_rule(
            StyleRuleConfig::edge(PredicateConfig {
                property_name: Some(".*".to_string()),
                ..PredicateConfig::default()
            })
            .with_attribute("style", "dashed"),
        );

    let decisions = Filter::compile(&config)?.evaluate(&graph);
    DotExporter::new(io::stdout().lock()).export_graph(&graph, &decisions)?;
    Ok(())
}
