//! Directed edges between workflow nodes.

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// A directed edge from one node to another.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the node the edge leaves.
    pub source: NodeId,
    /// Id of the node the edge enters.
    pub target: NodeId,
}

impl Edge {
    /// Creates an edge between two nodes.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
