//! Split the whole-program graph into `(filename, placeType)` partitions

use std::collections::HashMap;

use crate::graph::Graph;
use crate::model::{GraphEdge, GraphNode, NodeId, PartitionKey};

/// Nodes sharing one origin file and placement category, plus the edges
/// whose endpoints both live here.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'g> {
    pub key: PartitionKey,
    pub nodes: Vec<&'g GraphNode>,
    pub edges: Vec<&'g GraphEdge>,
}

/// Group nodes by partition key, in first-observed order.
///
/// An edge is retained only when both endpoints map to the same partition;
/// edges crossing partitions or touching unknown ids are dropped here but
/// remain visible through the global [`Graph`].
pub fn partition<'g>(nodes: &'g [GraphNode], edges: &'g [GraphEdge]) -> Vec<Partition<'g>> {
    let mut parts: Vec<Partition<'g>> = Vec::new();
    let mut slot_of_key: HashMap<PartitionKey, usize> = HashMap::new();
    let mut slot_of_node: HashMap<&'g NodeId, usize> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        let key = node.partition_key();
        let slot = match slot_of_key.get(&key) {
            Some(&slot) => slot,
            None => {
                parts.push(Partition {
                    key: key.clone(),
                    nodes: Vec::new(),
                    edges: Vec::new(),
                });
                slot_of_key.insert(key, parts.len() - 1);
                parts.len() - 1
            }
        };
        parts[slot].nodes.push(node);
        slot_of_node.insert(&node.id, slot);
    }

    for edge in edges {
        let from = slot_of_node.get(edge.source());
        let to = slot_of_node.get(edge.target());
        if let (Some(&from), Some(&to)) = (from, to) {
            if from == to {
                parts[from].edges.push(edge);
            }
        }
    }

    tracing::debug!(
        "Partitioned {} nodes into {} partitions",
        nodes.len(),
        parts.len()
    );
    parts
}

/// Partition a loaded graph.
pub fn partition_graph(graph: &Graph) -> Vec<Partition<'_>> {
    partition(graph.nodes(), graph.edges())
}
