//! Semgraph Core — graph model, partitioning, build ordering, and
//! neighborhood rendering for prompt compilation

pub mod error;
pub mod graph;
pub mod model;
pub mod neighborhood;
pub mod order;
pub mod partition;


#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use graph::{Adjacent, Graph};
pub use model::{
    EdgeEndpoint, EdgeKind, GLOBAL_VARIABLE, GraphDocument, GraphEdge, GraphNode, NO_DESCRIPTION, NodeId,
    PartitionKey,
};
pub use neighborhood::{DEFAULT_MAX_DIST, NeighborEntry, NeighborhoodRenderer, RenderOptions};
pub use order::{OrderedPartition, order_partitions, reverse_topological_order};
pub use partition::{Partition, partition, partition_graph};
