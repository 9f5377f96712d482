//! Error taxonomy for graph loading and ordering

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{NodeId, PartitionKey};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The document is not valid JSON or lacks required collections/fields.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("malformed input: duplicate node id `{id}`")]
    DuplicateNodeId { id: NodeId },

    /// The retained edges of a partition form a cycle.
    #[error("cycle detected in partition {partition}: nodes [{}] depend on each other", join_ids(.involved))]
    CycleDetected {
        partition: PartitionKey,
        involved: Vec<NodeId>,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
