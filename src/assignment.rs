use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::graph::dijkstra::{DistanceVector, shortest_distances};
use crate::{Delivery, Diagnostic, DiagnosticSink, Distance, NodeId, RoadNetwork, RoutingError};

/// Deliveries grouped by the center that serves them.
#[derive(Debug, Clone, PartialEq)]
pub struct CenterAssignment {
    /// Centers in the order they were given, with their distance vector and backlog.
    centers: Vec<AssignedCenter>,
    index: FxHashMap<NodeId, usize>,
}

#[derive(Debug, Clone, PartialEq)]
struct AssignedCenter {
    distances: DistanceVector,
    backlog: Vec<Delivery>,
}

impl CenterAssignment {
    /// Gets the centers in their original order.
    pub fn centers(&self) -> impl ExactSizeIterator<Item = NodeId> {
        self.centers.iter().map(|c| c.distances.source())
    }

    /// Gets the deliveries assigned to the center, in input order.
    /// Returns an empty slice if the node is not a center.
    pub fn backlog(&self, center: NodeId) -> &[Delivery] {
        self.get(center)
            .map(|c| c.backlog.as_slice())
            .unwrap_or_default()
    }

    /// Gets the shortest distances from the center to every node.
    pub fn distances(&self, center: NodeId) -> Option<&DistanceVector> {
        self.get(center).map(|c| &c.distances)
    }

    /// Total number of deliveries that were assigned to a center.
    pub fn assigned_count(&self) -> usize {
        self.centers.iter().map(|c| c.backlog.len()).sum()
    }

    /// Consumes the assignment, yielding per center (in original order) its distance vector
    /// and its backlog.
    pub fn into_backlogs(self) -> impl Iterator<Item = (DistanceVector, Vec<Delivery>)> {
        self.centers
            .into_iter()
            .map(|c| (c.distances, c.backlog))
    }

    fn get(&self, center: NodeId) -> Option<&AssignedCenter> {
        self.index.get(&center).map(|&i| &self.centers[i])
    }
}

/// Assigns each delivery to the center with the shortest distance to its destination.
///
/// Ties are broken by center order: the first center at the minimum distance wins.
/// Deliveries whose destination is out of the network, or that no center can reach, are left
/// out and reported to the sink, as are deliveries whose weight is negative or not finite.
///
/// Every center must belong to the network and appear only once, otherwise nothing is assigned.
pub fn assign_deliveries<G: RoadNetwork>(
    graph: &G,
    deliveries: &[Delivery],
    centers: &[NodeId],
    sink: &mut impl DiagnosticSink,
) -> Result<CenterAssignment, RoutingError> {
    ensure_centers_are_valid(graph, centers)?;

    info!(
        "Assigning {} deliveries to {} centers",
        deliveries.len(),
        centers.len()
    );

    let mut assigned: Vec<AssignedCenter> = center_distances(graph, centers)
        .into_iter()
        .map(|distances| AssignedCenter {
            distances,
            backlog: vec![],
        })
        .collect();

    for delivery in deliveries {
        if !delivery.weight.is_finite() || delivery.weight < 0.0 {
            sink.report(Diagnostic::InvalidWeight {
                delivery: delivery.id,
                weight: delivery.weight,
            });
            continue;
        }

        if !graph.contains(delivery.destination) {
            sink.report(Diagnostic::OutOfRangeDestination {
                delivery: delivery.id,
                destination: delivery.destination,
            });
            continue;
        }

        let mut best: Option<(usize, Distance)> = None;
        for (i, center) in assigned.iter().enumerate() {
            let distance = center.distances.distance(delivery.destination);
            // strictly smaller: the first center at the minimum distance is kept
            if best.is_none_or(|(_, shortest)| distance < shortest) {
                best = Some((i, distance));
            }
        }

        match best {
            Some((i, distance)) if distance.is_finite() => {
                debug!(
                    "Delivery {} assigned to center {} at distance {distance}",
                    delivery.id,
                    assigned[i].distances.source()
                );
                assigned[i].backlog.push(delivery.clone());
            }
            _ => sink.report(Diagnostic::UnreachableDestination {
                delivery: delivery.id,
                destination: delivery.destination,
            }),
        }
    }

    let index = centers.iter().enumerate().map(|(i, &c)| (c, i)).collect();

    Ok(CenterAssignment {
        centers: assigned,
        index,
    })
}

fn ensure_centers_are_valid<G: RoadNetwork>(
    graph: &G,
    centers: &[NodeId],
) -> Result<(), RoutingError> {
    let mut seen = FxHashSet::default();

    for &center in centers {
        if !graph.contains(center) {
            return Err(RoutingError::CenterOutOfRange {
                center,
                node_count: graph.node_count(),
            });
        }

        if !seen.insert(center) {
            return Err(RoutingError::DuplicateCenter(center));
        }
    }

    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn center_distances<G: RoadNetwork>(graph: &G, centers: &[NodeId]) -> Vec<DistanceVector> {
    centers
        .iter()
        .map(|&center| shortest_distances(graph, center))
        .collect()
}

#[cfg(feature = "parallel")]
fn center_distances<G: RoadNetwork>(graph: &G, centers: &[NodeId]) -> Vec<DistanceVector> {
    use rayon::prelude::*;

    // collecting an indexed parallel iterator preserves the center order
    centers
        .par_iter()
        .map(|&center| shortest_distances(graph, center))
        .collect()
}
