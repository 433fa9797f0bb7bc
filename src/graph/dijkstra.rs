use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::{Distance, NodeId, RoadNetwork};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapElement {
    /// Current shortest distance from the source to this node.
    distance: Distance,
    node: NodeId,
}

// The priority queue depends on the implementation of the Ord trait.
// By default std::BinaryHeap is a max heap.
// Explicitly implement the trait so the queue becomes a min heap.
impl Ord for HeapElement {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            // breaking ties in a deterministic way
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest distances from a single source to every node of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceVector {
    source: NodeId,
    distances: Vec<Distance>,
}

impl DistanceVector {
    pub const fn source(&self) -> NodeId {
        self.source
    }

    /// Gets the shortest distance from the source to the node.
    /// Nodes that are unreachable, or that don't belong to the network, are at infinity.
    pub fn distance(&self, node: NodeId) -> Distance {
        self.distances
            .get(node.index())
            .copied()
            .unwrap_or(Distance::INFINITY)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Gets an iterator over all the nodes with their distance from the source.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Distance)> {
        self.distances
            .iter()
            .enumerate()
            .map(|(i, &d)| (NodeId(i), d))
    }
}

/// Computes the shortest distances from the source to all the nodes of the network.
///
/// All edge distances must be non-negative. If the source doesn't belong to the network every
/// node is at infinity. Neighbors that don't belong to the network are ignored.
pub fn shortest_distances<G: RoadNetwork>(graph: &G, source: NodeId) -> DistanceVector {
    debug!("Computing shortest distances from {source}");

    let mut distances = vec![Distance::INFINITY; graph.node_count()];

    let Some(origin) = distances.get_mut(source.index()) else {
        return DistanceVector { source, distances };
    };
    *origin = Distance::ZERO;

    // priority queue of discovered nodes that may need to be visited
    let mut frontier = BinaryHeap::from([HeapElement {
        distance: Distance::ZERO,
        node: source,
    }]);

    while let Some(element) = frontier.pop() {
        // check if we already know a cheaper way to get to this node from the source
        if element.distance > distances[element.node.index()] {
            continue;
        }

        for (neighbor, length) in graph.neighbors(element.node) {
            let distance = element.distance + length;

            // neighbors out of the network are never reached
            let Some(known) = distances.get_mut(neighbor.index()) else {
                continue;
            };

            // check if we can follow the current path to reach the neighbor in a cheaper way
            if distance < *known {
                // Relax: we have now found a better way that we are going to explore
                *known = distance;
                frontier.push(HeapElement {
                    distance,
                    node: neighbor,
                });
            }
        }
    }

    DistanceVector { source, distances }
}
