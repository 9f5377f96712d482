//! Global graph model: id lookup plus outgoing adjacency in input order

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::*;

/// One outgoing relation as seen from its source node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjacent {
    pub to: NodeId,
    pub kind: EdgeKind,
}

/// The read-only semantic graph a run works against.
///
/// Rendering always consults this global view; ordering only ever sees the
/// partition-scoped edges produced by [`crate::partition::partition`].
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    index: HashMap<NodeId, usize>,
    adjacency: HashMap<NodeId, Vec<Adjacent>>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.nodes.len())
            .field("edge_count", &self.edges.len())
            .finish()
    }
}

impl Graph {
    /// Build lookup tables from parsed nodes and edges.
    ///
    /// Every node gets an adjacency entry, even with no outgoing edges. Edges
    /// whose endpoints are unknown are kept; the source still receives an
    /// entry and the target resolves to nothing at render time.
    pub fn build(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut adjacency: HashMap<NodeId, Vec<Adjacent>> = HashMap::with_capacity(nodes.len());

        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), pos).is_some() {
                return Err(Error::DuplicateNodeId { id: node.id.clone() });
            }
            adjacency.insert(node.id.clone(), Vec::new());
        }

        for edge in &edges {
            adjacency
                .entry(edge.source().clone())
                .or_default()
                .push(Adjacent {
                    to: edge.target().clone(),
                    kind: edge.kind.clone(),
                });
        }

        Ok(Graph {
            nodes,
            edges,
            index,
            adjacency,
        })
    }

    pub fn from_document(doc: GraphDocument) -> Result<Self> {
        Self::build(doc.nodes, doc.edges)
    }

    /// Parse a graph from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read and parse a graph file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let graph = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded {} nodes, {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(graph)
    }

    /// Get a node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&pos| &self.nodes[pos])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Outgoing relations of a node, in input order. Empty for unknown ids.
    pub fn edges_from(&self, source: &NodeId) -> &[Adjacent] {
        self.adjacency.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in input order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges in input order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Edges with at least one endpoint missing from the node set.
    pub fn dangling_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges
            .iter()
            .filter(move |e| !self.contains(e.source()) || !self.contains(e.target()))
    }
}
