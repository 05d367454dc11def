//! Serializable workflow definition.

use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::{Node, NodeId, NodeKind};
use crate::validate::{self, ValidationReport};

/// A workflow definition: ordered nodes and edges.
///
/// Order is preserved from the input: the validator emits its report
/// entries in node/edge order, so two identical definitions always
/// produce byte-identical reports.
#[derive(Default, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Nodes in the workflow.
    pub nodes: Vec<Node>,
    /// Edges connecting nodes.
    pub edges: Vec<Edge>,
}

impl WorkflowDefinition {
    /// Creates a definition from nodes and edges.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the definition has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Returns the first node of the given kind, in input order.
    pub fn find_node(&self, kind: NodeKind) -> Option<&Node> {
        self.nodes.iter().find(|node| node.kind() == kind)
    }

    /// Validates this definition's semantic rules.
    ///
    /// Structural checks on raw JSON belong to
    /// [`validate::validate_graph`]; a typed definition is already
    /// structurally sound.
    pub fn validate(&self) -> ValidationReport {
        validate::validate_definition(self)
    }
}
