//! Recoverable conditions met while planning.
//!
//! None of them stops the planner: the affected deliveries are left out of the plan and the
//! condition is handed to a [`DiagnosticSink`] chosen by the caller.

use strum::IntoStaticStr;
use thiserror::Error;
use tracing::warn;

use crate::{DeliveryId, NodeId, VehicleId};

#[derive(Error, Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Diagnostic {
    #[error("Delivery {delivery} has destination {destination} out of the graph range")]
    OutOfRangeDestination {
        delivery: DeliveryId,
        destination: NodeId,
    },
    #[error("Delivery {delivery} has an invalid weight: {weight}")]
    InvalidWeight { delivery: DeliveryId, weight: f64 },
    #[error("Delivery {delivery} (destination {destination}) is unreachable from all centers")]
    UnreachableDestination {
        delivery: DeliveryId,
        destination: NodeId,
    },
    #[error("No vehicles at center {center}, {} deliveries cannot be served", .deliveries.len())]
    NoVehiclesAtCenter {
        center: NodeId,
        deliveries: Vec<DeliveryId>,
    },
    #[error(
        "Insufficient vehicles at center {center}, {} remaining deliveries unserved",
        .unserved.len()
    )]
    VehicleExhaustion {
        center: NodeId,
        unserved: Vec<DeliveryId>,
    },
    #[error("Delivery {delivery} does not fit on its own in vehicle {vehicle} at center {center}")]
    OversizedDelivery {
        center: NodeId,
        vehicle: VehicleId,
        delivery: DeliveryId,
    },
    #[error("Vehicle {vehicle} is based at {home_center} which is not a center")]
    UnknownHomeCenter {
        vehicle: VehicleId,
        home_center: NodeId,
    },
}

impl Diagnostic {
    /// Short name of the condition, stable across releases.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Gets the deliveries dropped because of this condition.
    pub fn dropped_deliveries(&self) -> &[DeliveryId] {
        match self {
            Self::OutOfRangeDestination { delivery, .. }
            | Self::InvalidWeight { delivery, .. }
            | Self::UnreachableDestination { delivery, .. }
            | Self::OversizedDelivery { delivery, .. } => std::slice::from_ref(delivery),
            Self::NoVehiclesAtCenter { deliveries, .. } => deliveries,
            Self::VehicleExhaustion { unserved, .. } => unserved,
            Self::UnknownHomeCenter { .. } => &[],
        }
    }
}

/// Receives the diagnostics produced by the planner.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects every diagnostic.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Logs every diagnostic as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(kind = diagnostic.kind(), "{diagnostic}");
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardDiagnostics;

impl DiagnosticSink for DiscardDiagnostics {
    fn report(&mut self, _: Diagnostic) {}
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn diagnostic_message_001() {
        let diagnostic = Diagnostic::OutOfRangeDestination {
            delivery: DeliveryId(7),
            destination: NodeId(99),
        };

        assert_eq!(diagnostic.kind(), "OutOfRangeDestination");
        assert_eq!(
            diagnostic.to_string(),
            "Delivery 7 has destination 99 out of the graph range"
        );
        assert_eq!(diagnostic.dropped_deliveries(), &[DeliveryId(7)]);
    }

    #[test]
    fn diagnostic_message_002() {
        let diagnostic = Diagnostic::VehicleExhaustion {
            center: NodeId(0),
            unserved: vec![DeliveryId(1), DeliveryId(2)],
        };

        assert_eq!(diagnostic.kind(), "VehicleExhaustion");
        assert_eq!(
            diagnostic.to_string(),
            "Insufficient vehicles at center 0, 2 remaining deliveries unserved"
        );
    }

    #[test]
    fn diagnostic_message_003() {
        let diagnostic = Diagnostic::InvalidWeight {
            delivery: DeliveryId(4),
            weight: -2.5,
        };

        assert_eq!(diagnostic.kind(), "InvalidWeight");
        assert_eq!(diagnostic.to_string(), "Delivery 4 has an invalid weight: -2.5");
        assert_eq!(diagnostic.dropped_deliveries(), &[DeliveryId(4)]);
    }

    #[test]
    fn diagnostic_sink_001() {
        let mut diagnostics: Vec<Diagnostic> = vec![];

        diagnostics.report(Diagnostic::UnknownHomeCenter {
            vehicle: VehicleId(3),
            home_center: NodeId(8),
        });
        LogDiagnostics.report(diagnostics[0].clone());
        DiscardDiagnostics.report(diagnostics[0].clone());

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].dropped_deliveries().is_empty());
    }
}
