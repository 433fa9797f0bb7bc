use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use ordered_float::OrderedFloat;

/// Dense index of a node in the road network, in `[0, node_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeliveryId(pub u64);

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Road distance in network units (the travel speed is expressed in units per hour).
/// Totally ordered so it can key the Dijkstra frontier; unreachable nodes are at
/// [`Distance::INFINITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Distance(OrderedFloat<f64>);

impl Distance {
    pub const ZERO: Self = Self(OrderedFloat(0.0));
    pub const INFINITY: Self = Self(OrderedFloat(f64::INFINITY));

    pub const fn new(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    pub const fn value(&self) -> f64 {
        self.0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Hours needed to drive this distance at the given average speed (units per hour).
    pub fn hours_at(&self, speed: f64) -> f64 {
        self.value() / speed
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value())
    }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, d| acc + d)
    }
}

/// A delivery request bound to a destination node of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub id: DeliveryId,
    pub destination: NodeId,
    /// Payload units, finite and non-negative; other weights are dropped by the planner.
    pub weight: f64,
    /// Requested deadline (timestamp). Carried along but never enforced by the planner.
    pub deadline: i64,
}

impl Delivery {
    pub const fn new(id: u64, destination: usize, weight: f64, deadline: i64) -> Self {
        Self {
            id: DeliveryId(id),
            destination: NodeId(destination),
            weight,
            deadline,
        }
    }
}

/// A vehicle stationed at a center (its home), usable for a single route per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub home_center: NodeId,
    pub max_payload: f64,
    pub max_operating_hours: f64,
}

impl Vehicle {
    pub const fn new(
        id: u64,
        home_center: usize,
        max_payload: f64,
        max_operating_hours: f64,
    ) -> Self {
        Self {
            id: VehicleId(id),
            home_center: NodeId(home_center),
            max_payload,
            max_operating_hours,
        }
    }

    /// Returns true if a route carrying `payload` and lasting `hours` fits this vehicle.
    pub fn admits(&self, payload: f64, hours: f64) -> bool {
        payload <= self.max_payload && hours <= self.max_operating_hours
    }
}
