use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum GraphError {
    #[error("Node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },
    #[error("Edge {0} - {1} has an invalid distance: {2}")]
    InvalidDistance(NodeId, NodeId, f64),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum RoutingError {
    #[error("Center {center} is out of range for a graph of {node_count} nodes")]
    CenterOutOfRange { center: NodeId, node_count: usize },
    #[error("Center {0} is listed more than once")]
    DuplicateCenter(NodeId),
    #[error("Average speed must be finite and positive, got {0}")]
    InvalidSpeed(f64),
}
