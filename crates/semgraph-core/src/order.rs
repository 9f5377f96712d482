//! Deterministic reverse-dependency ordering inside one partition
//!
//! Every retained edge `from -> to` means "`from` depends on `to`", so the
//! order is Kahn's algorithm over the reversed arcs `to -> from`: producers
//! come out first, consumers after everything they use.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::model::{GraphNode, NodeId, PartitionKey};
use crate::partition::{Partition, partition_graph};

/// A partition together with its build order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPartition<'g> {
    pub key: PartitionKey,
    pub nodes: Vec<&'g GraphNode>,
}

/// Ready nodes keyed by `(tier, arrival)`: `GlobalVariable` nodes sit in tier
/// 0 and always leave before tier 1; within a tier, first in is first out.
struct ReadyQueue {
    heap: BinaryHeap<Reverse<(u8, u64, NodeIndex)>>,
    arrivals: u64,
}

impl ReadyQueue {
    fn new() -> Self {
        ReadyQueue {
            heap: BinaryHeap::new(),
            arrivals: 0,
        }
    }

    fn push(&mut self, node: &GraphNode, idx: NodeIndex) {
        let tier = if node.is_global_variable() { 0 } else { 1 };
        self.heap.push(Reverse((tier, self.arrivals, idx)));
        self.arrivals += 1;
    }

    fn pop(&mut self) -> Option<NodeIndex> {
        self.heap.pop().map(|Reverse((_, _, idx))| idx)
    }
}

/// Order one partition so that for every retained edge `(from, to)`, `from`
/// appears strictly after `to`.
///
/// Fails with [`Error::CycleDetected`] when the retained edges contain a
/// cycle; no partial order is returned.
pub fn reverse_topological_order<'g>(part: &Partition<'g>) -> Result<Vec<&'g GraphNode>> {
    let mut dag: DiGraph<&'g GraphNode, ()> =
        DiGraph::with_capacity(part.nodes.len(), part.edges.len());
    let mut slot: HashMap<&NodeId, NodeIndex> = HashMap::with_capacity(part.nodes.len());
    for &node in &part.nodes {
        let idx = dag.add_node(node);
        slot.insert(&node.id, idx);
    }
    for edge in &part.edges {
        if let (Some(&to), Some(&from)) = (slot.get(edge.target()), slot.get(edge.source())) {
            dag.add_edge(to, from, ());
        }
    }

    let mut in_degree: Vec<usize> = dag
        .node_indices()
        .map(|idx| dag.edges_directed(idx, Direction::Incoming).count())
        .collect();

    let mut ready = ReadyQueue::new();
    for idx in dag.node_indices() {
        if in_degree[idx.index()] == 0 {
            ready.push(dag[idx], idx);
        }
    }

    let mut order = Vec::with_capacity(part.nodes.len());
    while let Some(current) = ready.pop() {
        order.push(dag[current]);

        // Relax in edge insertion order so ties stay reproducible.
        let mut successors: Vec<(EdgeIndex, NodeIndex)> = dag
            .edges_directed(current, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        successors.sort_unstable_by_key(|&(edge, _)| edge);

        for (_, next) in successors {
            let degree = &mut in_degree[next.index()];
            *degree -= 1;
            if *degree == 0 {
                ready.push(dag[next], next);
            }
        }
    }

    if order.len() < part.nodes.len() {
        return Err(Error::CycleDetected {
            partition: part.key.clone(),
            involved: cycle_members(&dag, &in_degree),
        });
    }

    Ok(order)
}

/// Node ids of one strongly-connected component blocking the order, in
/// partition order. Falls back to every node left unprocessed.
fn cycle_members(dag: &DiGraph<&GraphNode, ()>, in_degree: &[usize]) -> Vec<NodeId> {
    let mut members = tarjan_scc(dag)
        .into_iter()
        .find(|scc| scc.len() > 1 || dag.contains_edge(scc[0], scc[0]))
        .unwrap_or_else(|| {
            dag.node_indices()
                .filter(|idx| in_degree[idx.index()] > 0)
                .collect()
        });
    members.sort_unstable();
    members.into_iter().map(|idx| dag[idx].id.clone()).collect()
}

/// Partition a graph and order every partition, failing on the first cycle.
pub fn order_partitions(graph: &Graph) -> Result<Vec<OrderedPartition<'_>>> {
    partition_graph(graph)
        .into_iter()
        .map(|part| {
            let nodes = reverse_topological_order(&part)?;
            tracing::debug!("Ordered {} nodes for {}", nodes.len(), part.key);
            Ok(OrderedPartition {
                key: part.key,
                nodes,
            })
        })
        .collect()
}
