use rustc_hash::FxHashMap;
use tracing::trace;

use crate::graph::dijkstra::{DistanceVector, shortest_distances};
use crate::{Distance, NodeId, RoadNetwork};

/// Memoizes single-source distance vectors over an immutable network.
///
/// Entries are never invalidated: the network cannot change while it is borrowed.
#[derive(Debug)]
pub struct DistanceCache<'g, G> {
    graph: &'g G,
    vectors: FxHashMap<NodeId, DistanceVector>,
}

impl<'g, G: RoadNetwork> DistanceCache<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            vectors: FxHashMap::default(),
        }
    }

    /// Seeds the cache with a vector that was already computed, replacing any previous entry
    /// for the same source.
    pub fn with_vector(mut self, vector: DistanceVector) -> Self {
        self.vectors.insert(vector.source(), vector);
        self
    }

    pub const fn graph(&self) -> &'g G {
        self.graph
    }

    /// Gets the distance vector of the source, computing it on first use.
    pub fn vector(&mut self, source: NodeId) -> &DistanceVector {
        let graph = self.graph;
        self.vectors.entry(source).or_insert_with(|| {
            trace!("Distance cache miss for {source}");
            shortest_distances(graph, source)
        })
    }

    /// Gets the shortest distance between two nodes.
    pub fn distance(&mut self, from: NodeId, to: NodeId) -> Distance {
        self.vector(from).distance(to)
    }

    /// Number of sources that have a cached vector.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
