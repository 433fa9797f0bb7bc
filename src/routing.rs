//! Greedy route construction for a single center.
//!
//! The center backlog is sorted by destination and consumed in that order. Each delivery either
//! joins the route being filled, or closes it and moves on to the next vehicle of the center.
//! Accepted deliveries are never reordered nor reconsidered.

mod route;

use std::mem;

use tracing::{debug, info};

use crate::graph::cache::DistanceCache;
use crate::{
    Delivery, DeliveryId, Diagnostic, DiagnosticSink, Distance, NodeId, RoadNetwork,
    RoutingError, Vehicle,
};

pub use route::{Route, RoutePlan};

/// What happens to the delivery that starts a route on a fresh vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreshRoutePolicy {
    /// The delivery that could not join the previous route always becomes the first stop of the
    /// next vehicle, even if it exceeds that vehicle limits.
    #[default]
    Unchecked,
    /// The delivery that could not join the previous route becomes the first stop of the next
    /// vehicle only if it fits its limits, otherwise it is dropped.
    Validated,
}

#[derive(Debug, Clone, Copy)]
pub struct RoutingConfig {
    /// Average travel speed in distance units per hour, used to turn distances into hours.
    pub average_speed: f64,
    pub fresh_route_policy: FreshRoutePolicy,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            average_speed: 60.0,
            fresh_route_policy: FreshRoutePolicy::Unchecked,
        }
    }
}

impl RoutingConfig {
    /// Checks that the average speed is finite and strictly positive.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.average_speed.is_finite() && self.average_speed > 0.0 {
            Ok(())
        } else {
            Err(RoutingError::InvalidSpeed(self.average_speed))
        }
    }
}

/// Route being filled by the current vehicle.
#[derive(Debug, Default)]
struct OpenRoute {
    deliveries: Vec<DeliveryId>,
    destinations: Vec<NodeId>,
    payload: f64,
    /// Distance from the center through all the destinations, without the way back.
    outbound: Distance,
}

impl OpenRoute {
    fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    fn last_node(&self, center: NodeId) -> NodeId {
        self.destinations.last().copied().unwrap_or(center)
    }

    /// Length of the closed tour if the destination was visited last.
    fn tour_through<G: RoadNetwork>(
        &self,
        cache: &mut DistanceCache<G>,
        center: NodeId,
        destination: NodeId,
    ) -> Distance {
        let mut distance = self.outbound;
        distance += cache.distance(self.last_node(center), destination);
        distance += cache.distance(destination, center);
        distance
    }

    fn push<G: RoadNetwork>(
        &mut self,
        cache: &mut DistanceCache<G>,
        center: NodeId,
        delivery: &Delivery,
    ) {
        self.outbound += cache.distance(self.last_node(center), delivery.destination);
        self.deliveries.push(delivery.id);
        self.destinations.push(delivery.destination);
        self.payload += delivery.weight;
    }

    /// Closes the tour back to the center, returns None if nothing was loaded.
    fn close<G: RoadNetwork>(
        self,
        cache: &mut DistanceCache<G>,
        config: &RoutingConfig,
        center: NodeId,
        vehicle: &Vehicle,
    ) -> Option<Route> {
        if self.is_empty() {
            return None;
        }

        let mut total_distance = self.outbound;
        total_distance += cache.distance(self.last_node(center), center);

        let mut path = Vec::with_capacity(self.destinations.len() + 2);
        path.push(center);
        path.extend(self.destinations);
        path.push(center);

        let route = Route {
            vehicle_id: vehicle.id,
            center,
            deliveries: self.deliveries,
            path,
            total_distance,
            total_time_hours: total_distance.hours_at(config.average_speed),
            payload: self.payload,
        };

        info!(
            "Vehicle {} leaves center {center} with {} deliveries: {total_distance} in {:.2}h",
            vehicle.id,
            route.deliveries.len(),
            route.total_time_hours
        );

        Some(route)
    }
}

/// Packs the center backlog into routes served by the center vehicles.
///
/// The backlog is sorted by destination node (stable for equal destinations) and the vehicles
/// are used in the given order, each for a single route. A delivery joins the current route if
/// both the payload and the duration of the closed tour, visiting the destinations in the order
/// they were accepted, stay within the vehicle limits. Otherwise the current route is closed and
/// the next vehicle starts a new route with the delivery (see [`FreshRoutePolicy`]).
///
/// When the vehicles run out the rest of the backlog is dropped and reported to the sink.
///
/// The config must be valid (see [`RoutingConfig::validate`]) and every delivery weight finite
/// and non-negative, as checked by [`plan_routes`](crate::plan_routes).
pub fn build_routes<G: RoadNetwork>(
    config: &RoutingConfig,
    cache: &mut DistanceCache<G>,
    center: NodeId,
    backlog: &[Delivery],
    vehicles: &[&Vehicle],
    sink: &mut impl DiagnosticSink,
) -> Vec<Route> {
    debug!(
        "Building routes at center {center}: {} deliveries, {} vehicles",
        backlog.len(),
        vehicles.len()
    );

    let mut backlog: Vec<&Delivery> = backlog.iter().collect();
    backlog.sort_by_key(|d| d.destination);

    let mut vehicles = vehicles.iter().copied();
    let Some(mut vehicle) = vehicles.next() else {
        if !backlog.is_empty() {
            sink.report(Diagnostic::NoVehiclesAtCenter {
                center,
                deliveries: backlog.iter().map(|d| d.id).collect(),
            });
        }
        return vec![];
    };

    let mut routes = vec![];
    let mut current = OpenRoute::default();

    for (position, &delivery) in backlog.iter().enumerate() {
        let distance = current.tour_through(cache, center, delivery.destination);
        let hours = distance.hours_at(config.average_speed);

        if vehicle.admits(current.payload + delivery.weight, hours) {
            debug!(
                "Delivery {} joins vehicle {} ({distance}, {hours:.2}h)",
                delivery.id, vehicle.id
            );
            current.push(cache, center, delivery);
            continue;
        }

        debug!(
            "Delivery {} rejected by vehicle {} ({distance}, {hours:.2}h)",
            delivery.id, vehicle.id
        );

        if let Some(route) = mem::take(&mut current).close(cache, config, center, vehicle) {
            routes.push(route);
        }

        let Some(next) = vehicles.next() else {
            sink.report(Diagnostic::VehicleExhaustion {
                center,
                unserved: backlog[position..].iter().map(|d| d.id).collect(),
            });
            return routes;
        };
        vehicle = next;

        match config.fresh_route_policy {
            FreshRoutePolicy::Unchecked => current.push(cache, center, delivery),
            FreshRoutePolicy::Validated => {
                let distance = current.tour_through(cache, center, delivery.destination);
                let hours = distance.hours_at(config.average_speed);

                if vehicle.admits(delivery.weight, hours) {
                    current.push(cache, center, delivery);
                } else {
                    sink.report(Diagnostic::OversizedDelivery {
                        center,
                        vehicle: vehicle.id,
                        delivery: delivery.id,
                    });
                }
            }
        }
    }

    if let Some(route) = current.close(cache, config, center, vehicle) {
        routes.push(route);
    }

    routes
}
