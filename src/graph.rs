use tracing::trace;

use crate::{Distance, GraphError, NodeId};

/// Undirected road network.
/// Exposes the behavior the planner needs to run shortest path searches.
/// Should be implemented by the graph that represents the map the planner runs on; the network
/// is only ever read, possibly from several threads at once.
pub trait RoadNetwork: Sync {
    /// Gets the number of nodes, node IDs are dense in `[0, node_count)`.
    fn node_count(&self) -> usize;

    /// Gets an iterator over all the edges leaving the given node.
    /// For each edge returns the neighbor node and the edge distance.
    /// Returns an empty iterator if the node doesn't belong to the network.
    /// Neighbors are expected to belong to the network, the ones that don't are never reached.
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Distance)>;

    /// Returns true if the node belongs to the network.
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }
}

/// Adjacency list graph, built once and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<(NodeId, Distance)>>,
}

impl Graph {
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![vec![]; node_count],
        }
    }

    /// Builds a graph from a list of undirected edges `(u, v, distance)`.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize, f64)>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new(node_count);
        for (u, v, distance) in edges {
            graph.add_edge(NodeId(u), NodeId(v), distance)?;
        }
        Ok(graph)
    }

    /// Adds the undirected edge u - v by inserting both u -> v and v -> u.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, distance: f64) -> Result<(), GraphError> {
        let node_count = self.node_count();

        for node in [u, v] {
            if node.index() >= node_count {
                return Err(GraphError::NodeOutOfRange { node, node_count });
            }
        }

        if !distance.is_finite() || distance < 0.0 {
            return Err(GraphError::InvalidDistance(u, v, distance));
        }

        trace!("Adding edge {u} - {v} ({distance})");
        let distance = Distance::new(distance);
        self.adjacency[u.index()].push((v, distance));
        self.adjacency[v.index()].push((u, distance));

        Ok(())
    }

    /// Number of directed adjacency entries, that is twice the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

impl RoadNetwork for Graph {
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, Distance)> {
        self.adjacency.get(node.index()).into_iter().flatten().copied()
    }
}

pub mod cache;
pub mod dijkstra;
