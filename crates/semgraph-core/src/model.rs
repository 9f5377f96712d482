//! Core data structures for the semantic graph

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Node type that is always scheduled ahead of its ready siblings.
pub const GLOBAL_VARIABLE: &str = "GlobalVariable";

/// Rendered in place of a missing or empty description.
pub const NO_DESCRIPTION: &str = "[no description]";

/// Unique, stable identifier for a node.
///
/// Graph files use either strings or integers for ids; both normalize to the
/// textual form so `7` and `"7"` refer to the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => NodeId(s),
            RawId::Number(n) => NodeId(n.to_string()),
        })
    }
}

/// One code component of the semantic graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Origin file the component is generated into.
    pub filename: String,
    #[serde(rename = "placeType", default)]
    pub place_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl GraphNode {
    /// Description text, or [`NO_DESCRIPTION`] when absent or empty.
    pub fn description_or_placeholder(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION)
    }

    pub fn is_global_variable(&self) -> bool {
        self.node_type == GLOBAL_VARIABLE
    }

    /// The `(filename, placeType)` partition this node belongs to.
    pub fn partition_key(&self) -> PartitionKey {
        PartitionKey {
            filename: self.filename.clone(),
            place_type: self.place_type.clone(),
        }
    }
}

/// What kind of relationship this edge represents.
///
/// `imported` and `own` are distinguished because they cost nothing while
/// walking a neighborhood; every other relation is an ordinary use that keeps
/// its literal type name for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Imported,
    Own,
    Uses(String),
}

impl EdgeKind {
    /// Distance consumed by following an edge of this kind.
    pub fn cost(&self) -> u32 {
        match self {
            EdgeKind::Imported | EdgeKind::Own => 0,
            EdgeKind::Uses(_) => 1,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EdgeKind::Imported => "imported",
            EdgeKind::Own => "own",
            EdgeKind::Uses(kind) => kind,
        }
    }

    /// Label shown in front of a descendant reached through this edge.
    pub fn label(&self) -> &str {
        match self {
            EdgeKind::Imported => "import from",
            EdgeKind::Own => "own",
            EdgeKind::Uses(kind) => kind,
        }
    }
}

impl From<String> for EdgeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "imported" => EdgeKind::Imported,
            "own" => EdgeKind::Own,
            _ => EdgeKind::Uses(kind),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EdgeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(EdgeKind::from)
    }
}

/// `{ "id": ... }` wrapper used for edge endpoints in graph files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EdgeEndpoint {
    pub id: NodeId,
}

/// A directed, typed relation between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphEdge {
    pub from: EdgeEndpoint,
    pub to: EdgeEndpoint,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

impl GraphEdge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        GraphEdge {
            from: EdgeEndpoint { id: from.into() },
            to: EdgeEndpoint { id: to.into() },
            kind: EdgeKind::from(kind.into()),
        }
    }

    pub fn source(&self) -> &NodeId {
        &self.from.id
    }

    pub fn target(&self) -> &NodeId {
        &self.to.id
    }
}

/// The whole input document: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Identity of a partition: origin file plus placement category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey {
    pub filename: String,
    pub place_type: String,
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.filename, self.place_type)
    }
}
