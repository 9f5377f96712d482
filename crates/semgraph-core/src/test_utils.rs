//! Test utilities for Semgraph

use crate::graph::Graph;
use crate::model::{GraphEdge, GraphNode, NodeId};

/// Build a node with the given id and type in a `module` partition.
pub fn node(id: &str, node_type: &str, filename: &str) -> GraphNode {
    GraphNode {
        id: NodeId::new(id),
        name: id.to_string(),
        node_type: node_type.to_string(),
        filename: filename.to_string(),
        place_type: "module".to_string(),
        description: None,
    }
}

/// Same as [`node`] with a description attached.
pub fn described(id: &str, node_type: &str, filename: &str, description: &str) -> GraphNode {
    GraphNode {
        description: Some(description.to_string()),
        ..node(id, node_type, filename)
    }
}

pub fn edge(from: &str, to: &str, kind: &str) -> GraphEdge {
    GraphEdge::new(from, to, kind)
}

pub fn graph(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Graph {
    Graph::build(nodes, edges).unwrap()
}

/// A small express-style application spread over three files.
///
/// ```text
/// src/db.js      pool (GlobalVariable) <-uses- runQuery
/// src/users.js   config (GlobalVariable) <-uses- getUser -imported-> runQuery
///                UserRoutes -own-> getUser
/// src/app.js     app -imported-> UserRoutes
/// ```
pub fn sample_graph_json() -> &'static str {
    r#"{
  "nodes": [
    { "id": "runQuery", "name": "runQuery", "type": "Function", "filename": "src/db.js", "placeType": "module", "description": "Run a SQL query on the pool" },
    { "id": "pool", "name": "pool", "type": "GlobalVariable", "filename": "src/db.js", "placeType": "module", "description": "mysql connection pool" },
    { "id": "getUser", "name": "getUser", "type": "Function", "filename": "src/users.js", "placeType": "module", "description": "Load one user by id\nReturns null when missing" },
    { "id": "UserRoutes", "name": "UserRoutes", "type": "Router", "filename": "src/users.js", "placeType": "module" },
    { "id": "config", "name": "config", "type": "GlobalVariable", "filename": "src/users.js", "placeType": "module", "description": "users table name" },
    { "id": "app", "name": "app", "type": "GlobalVariable", "filename": "src/app.js", "placeType": "entry", "description": "express application" }
  ],
  "edges": [
    { "from": { "id": "runQuery" }, "to": { "id": "pool" }, "type": "uses" },
    { "from": { "id": "getUser" }, "to": { "id": "runQuery" }, "type": "imported" },
    { "from": { "id": "getUser" }, "to": { "id": "config" }, "type": "uses" },
    { "from": { "id": "UserRoutes" }, "to": { "id": "getUser" }, "type": "own" },
    { "from": { "id": "app" }, "to": { "id": "UserRoutes" }, "type": "imported" }
  ]
}"#
}

pub fn sample_graph() -> Graph {
    Graph::from_json(sample_graph_json()).unwrap()
}

/// Ids of the given nodes, in order.
pub fn ids(nodes: &[&GraphNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id.to_string()).collect()
}
