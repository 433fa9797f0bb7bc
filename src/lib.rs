#![doc = include_str!("../README.md")]

mod assignment;
mod diagnostic;
mod engine;
mod error;
mod graph;
mod model;
mod routing;

pub use assignment::{CenterAssignment, assign_deliveries};
pub use diagnostic::{Diagnostic, DiagnosticSink, DiscardDiagnostics, LogDiagnostics};
pub use engine::{RoutingEngine, plan_routes};
pub use error::{GraphError, RoutingError};
pub use graph::cache::DistanceCache;
pub use graph::dijkstra::{DistanceVector, shortest_distances};
pub use graph::{Graph, RoadNetwork};
pub use model::{Delivery, DeliveryId, Distance, NodeId, Vehicle, VehicleId};
pub use routing::{FreshRoutePolicy, Route, RoutePlan, RoutingConfig, build_routes};
