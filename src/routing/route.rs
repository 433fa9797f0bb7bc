use std::ops::Deref;

use crate::{DeliveryId, Distance, NodeId, VehicleId};

/// A closed route served by a single vehicle, starting and ending at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub vehicle_id: VehicleId,
    pub center: NodeId,
    /// Deliveries in the order they are visited.
    pub deliveries: Vec<DeliveryId>,
    /// The center, the delivery destinations in visiting order, and the center again.
    pub path: Vec<NodeId>,
    pub total_distance: Distance,
    pub total_time_hours: f64,
    /// Sum of the delivery weights carried by the vehicle.
    pub payload: f64,
}

impl Route {
    /// Gets the destinations visited between leaving and returning to the center.
    pub fn stops(&self) -> &[NodeId] {
        self.path
            .get(1..self.path.len().saturating_sub(1))
            .unwrap_or_default()
    }
}

/// All the routes produced by a planner run, grouped by center in the order the centers were
/// given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan(Vec<Route>);

impl From<Vec<Route>> for RoutePlan {
    fn from(routes: Vec<Route>) -> Self {
        Self(routes)
    }
}

impl Deref for RoutePlan {
    type Target = [Route];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for RoutePlan {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl RoutePlan {
    pub fn into_routes(self) -> Vec<Route> {
        self.0
    }

    /// Gets all the served deliveries, route after route.
    pub fn served_deliveries(&self) -> impl Iterator<Item = DeliveryId> {
        self.0.iter().flat_map(|r| &r.deliveries).copied()
    }

    pub fn total_distance(&self) -> Distance {
        self.0.iter().map(|r| r.total_distance).sum()
    }

    /// Gets the routes that leave from the given center.
    pub fn center_routes(&self, center: NodeId) -> impl Iterator<Item = &Route> {
        self.0.iter().filter(move |r| r.center == center)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn route(vehicle: u64, center: usize, deliveries: &[u64], stops: &[usize]) -> Route {
        let path = std::iter::once(center)
            .chain(stops.iter().copied())
            .chain(std::iter::once(center))
            .map(NodeId)
            .collect();

        Route {
            vehicle_id: VehicleId(vehicle),
            center: NodeId(center),
            deliveries: deliveries.iter().copied().map(DeliveryId).collect(),
            path,
            total_distance: Distance::new(10.0),
            total_time_hours: 10.0 / 60.0,
            payload: 1.0,
        }
    }

    #[test]
    fn route_plan_001() {
        let plan = RoutePlan::from(vec![
            route(1, 0, &[1, 2], &[4, 5]),
            route(2, 0, &[3], &[6]),
            route(3, 1, &[4], &[7]),
        ]);

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan.served_deliveries().collect::<Vec<_>>(),
            vec![DeliveryId(1), DeliveryId(2), DeliveryId(3), DeliveryId(4)]
        );
        assert_eq!(plan.total_distance(), Distance::new(30.0));
        assert_eq!(plan.center_routes(NodeId(0)).count(), 2);
        assert_eq!(plan[0].stops(), &[NodeId(4), NodeId(5)]);
    }

    #[test]
    fn route_stops_001() {
        let mut route = route(1, 0, &[], &[]);
        assert!(route.stops().is_empty());

        route.path.clear();
        assert!(route.stops().is_empty());
    }
}
