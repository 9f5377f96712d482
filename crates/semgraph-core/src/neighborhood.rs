//! Bounded, cycle-safe view of what a node points to
//!
//! The walk is depth-first over outgoing edges of the *global* graph.
//! `imported` and `own` edges are free; every other edge consumes one unit of
//! the distance budget. A node already on the current root-to-leaf path, an
//! unknown id, or a node past the budget ends its branch silently. Sibling
//! branches do not share visited state, so a node may appear under several
//! of them.

use std::collections::HashSet;
use std::fmt::Write;

use crate::graph::Graph;
use crate::model::{EdgeKind, GraphNode, NodeId};

pub const DEFAULT_MAX_DIST: u32 = 1;

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Maximum accumulated distance from the root.
    pub max_dist: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            max_dist: DEFAULT_MAX_DIST,
        }
    }
}

/// One node reached from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborEntry<'g> {
    /// 1 for direct targets of the root.
    pub depth: usize,
    /// Accumulated distance, counting free edges as 0.
    pub distance: u32,
    /// Edge kind used to reach this node from its parent.
    pub via: &'g EdgeKind,
    pub node: &'g GraphNode,
}

impl NeighborEntry<'_> {
    /// Direct targets are unlabeled; deeper entries say how they were reached.
    pub fn label(&self) -> Option<&str> {
        (self.depth > 1).then(|| self.via.label())
    }
}

/// A node whose outgoing edges are being expanded.
struct Frame<'g> {
    id: &'g NodeId,
    next_edge: usize,
    depth: usize,
    distance: u32,
}

pub struct NeighborhoodRenderer<'g> {
    graph: &'g Graph,
    options: RenderOptions,
}

impl<'g> NeighborhoodRenderer<'g> {
    pub fn new(graph: &'g Graph, options: RenderOptions) -> Self {
        NeighborhoodRenderer { graph, options }
    }

    /// Entries reachable from `root` in depth-first pre-order. The root itself
    /// is never included. Unknown roots yield nothing.
    ///
    /// The walk keeps its own stack of frames so arbitrarily long chains of
    /// free edges do not grow the call stack.
    pub fn walk(&self, root: &NodeId) -> Vec<NeighborEntry<'g>> {
        let mut entries = Vec::new();
        let Some(root) = self.graph.node(root) else {
            return entries;
        };
        let mut on_path: HashSet<&'g NodeId> = HashSet::new();
        on_path.insert(&root.id);
        let mut stack = vec![Frame {
            id: &root.id,
            next_edge: 0,
            depth: 0,
            distance: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let edges = self.graph.edges_from(frame.id);
            let Some(edge) = edges.get(frame.next_edge) else {
                on_path.remove(frame.id);
                stack.pop();
                continue;
            };
            frame.next_edge += 1;

            let from = frame.id;
            let depth = frame.depth + 1;
            let distance = frame.distance + edge.kind.cost();
            if distance > self.options.max_dist || on_path.contains(&edge.to) {
                continue;
            }
            let Some(node) = self.graph.node(&edge.to) else {
                tracing::trace!("Not expanding unknown node {} from {}", edge.to, from);
                continue;
            };

            entries.push(NeighborEntry {
                depth,
                distance,
                via: &edge.kind,
                node,
            });
            on_path.insert(&node.id);
            stack.push(Frame {
                id: &node.id,
                next_edge: 0,
                depth,
                distance,
            });
        }
        entries
    }

    /// Render the neighborhood of `root` as an indented tree:
    ///
    /// ```text
    ///   - name (Type) in file.js
    ///     Description:
    ///       first line
    /// ```
    pub fn render(&self, root: &NodeId) -> String {
        let mut out = String::new();
        for entry in self.walk(root) {
            write_entry(&mut out, &entry);
        }
        out
    }
}

fn write_entry(out: &mut String, entry: &NeighborEntry<'_>) {
    let node = entry.node;
    let pad = INDENT.repeat(entry.depth);

    // Writing into a String cannot fail.
    let _ = match entry.label() {
        Some(label) => writeln!(
            out,
            "{pad}- {label} {} ({}) in {}",
            node.name, node.node_type, node.filename
        ),
        None => writeln!(out, "{pad}- {} ({}) in {}", node.name, node.node_type, node.filename),
    };
    let _ = writeln!(out, "{pad}{INDENT}Description:");

    let body_pad = INDENT.repeat(entry.depth + 2);
    for line in node.description_or_placeholder().split('\n') {
        let _ = writeln!(out, "{body_pad}{line}");
    }
}
