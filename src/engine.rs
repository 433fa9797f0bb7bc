//! The engine plans the routes of a fleet of vehicles stationed at centers (depots).
//!
//! 1. Check the config.
//! 2. Assign each delivery to its nearest reachable center, once the centers are known to be
//!    valid nodes of the network.
//! 3. Group the vehicles by their home center.
//! 4. For each center pack its backlog into routes served by its vehicles.
//! 5. Concatenate the routes following the order of the centers.

use rustc_hash::FxHashMap;
use tracing::info;

use crate::graph::cache::DistanceCache;
use crate::graph::dijkstra::DistanceVector;
use crate::{
    Delivery, Diagnostic, DiagnosticSink, NodeId, RoadNetwork, Route, RoutePlan, RoutingConfig,
    RoutingError, Vehicle, assign_deliveries, build_routes,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingEngine {
    config: RoutingConfig,
}

impl RoutingEngine {
    pub const fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Plans the routes serving the deliveries, see [`plan_routes`].
    pub fn plan<G: RoadNetwork>(
        &self,
        graph: &G,
        deliveries: &[Delivery],
        vehicles: &[Vehicle],
        centers: &[NodeId],
        sink: &mut impl DiagnosticSink,
    ) -> Result<RoutePlan, RoutingError> {
        plan_routes(&self.config, graph, deliveries, vehicles, centers, sink)
    }
}

/// Work of a single center, independent of every other center.
struct CenterPlan<'a> {
    center: NodeId,
    distances: DistanceVector,
    backlog: Vec<Delivery>,
    vehicles: Vec<&'a Vehicle>,
}

/// Plans the routes serving the deliveries with the vehicles of each center.
///
/// Deliveries that cannot be served are left out of the plan and reported to the sink, which
/// never stops the planning. An invalid average speed or invalid centers (out of the network or
/// listed twice) are an error and nothing is planned.
///
/// Routes are grouped by center, following the order of the given centers, and running the
/// planner twice on the same inputs yields the same plan.
pub fn plan_routes<G: RoadNetwork>(
    config: &RoutingConfig,
    graph: &G,
    deliveries: &[Delivery],
    vehicles: &[Vehicle],
    centers: &[NodeId],
    sink: &mut impl DiagnosticSink,
) -> Result<RoutePlan, RoutingError> {
    info!(
        "Planning {} deliveries with {} vehicles from {} centers",
        deliveries.len(),
        vehicles.len(),
        centers.len()
    );

    // Step – 1 Check the config
    config.validate()?;

    // Step – 2 Assign each delivery to its nearest reachable center
    let assignment = assign_deliveries(graph, deliveries, centers, sink)?;
    info!(
        "{} of {} deliveries assigned to a center",
        assignment.assigned_count(),
        deliveries.len()
    );

    // Step – 3 Group the vehicles by their home center
    let mut rosters = group_vehicles(vehicles, centers, sink);

    let work: Vec<CenterPlan> = assignment
        .into_backlogs()
        .map(|(distances, backlog)| {
            let center = distances.source();
            CenterPlan {
                center,
                distances,
                backlog,
                vehicles: rosters.remove(&center).unwrap_or_default(),
            }
        })
        .collect();

    // Step – 4 For each center pack its backlog into routes
    // Step – 5 Concatenate the routes following the order of the centers
    let mut routes = vec![];
    for (center_routes, diagnostics) in plan_centers(config, graph, work) {
        routes.extend(center_routes);
        for diagnostic in diagnostics {
            sink.report(diagnostic);
        }
    }

    info!("Planned {} routes", routes.len());
    Ok(routes.into())
}

/// Groups the vehicles by home center, keeping their original order.
/// Vehicles that are not based at any of the centers are reported and left out.
fn group_vehicles<'a>(
    vehicles: &'a [Vehicle],
    centers: &[NodeId],
    sink: &mut impl DiagnosticSink,
) -> FxHashMap<NodeId, Vec<&'a Vehicle>> {
    let mut rosters: FxHashMap<NodeId, Vec<&Vehicle>> =
        centers.iter().map(|&c| (c, vec![])).collect();

    for vehicle in vehicles {
        match rosters.get_mut(&vehicle.home_center) {
            Some(roster) => roster.push(vehicle),
            None => sink.report(Diagnostic::UnknownHomeCenter {
                vehicle: vehicle.id,
                home_center: vehicle.home_center,
            }),
        }
    }

    rosters
}

fn plan_center<G: RoadNetwork>(
    config: &RoutingConfig,
    graph: &G,
    work: CenterPlan,
) -> (Vec<Route>, Vec<Diagnostic>) {
    let CenterPlan {
        center,
        distances,
        backlog,
        vehicles,
    } = work;

    let mut diagnostics = vec![];
    let mut cache = DistanceCache::new(graph).with_vector(distances);
    let routes = build_routes(
        config,
        &mut cache,
        center,
        &backlog,
        &vehicles,
        &mut diagnostics,
    );

    (routes, diagnostics)
}

#[cfg(not(feature = "parallel"))]
fn plan_centers<G: RoadNetwork>(
    config: &RoutingConfig,
    graph: &G,
    work: Vec<CenterPlan>,
) -> Vec<(Vec<Route>, Vec<Diagnostic>)> {
    work.into_iter()
        .map(|w| plan_center(config, graph, w))
        .collect()
}

#[cfg(feature = "parallel")]
fn plan_centers<G: RoadNetwork>(
    config: &RoutingConfig,
    graph: &G,
    work: Vec<CenterPlan>,
) -> Vec<(Vec<Route>, Vec<Diagnostic>)> {
    use rayon::prelude::*;

    // collecting an indexed parallel iterator preserves the center order
    work.into_par_iter()
        .map(|w| plan_center(config, graph, w))
        .collect()
}
