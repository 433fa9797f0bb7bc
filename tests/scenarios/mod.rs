use fleetroute::{Delivery, Graph, NodeId, Vehicle};

pub struct Scenario {
    pub graph: Graph,
    pub deliveries: Vec<Delivery>,
    pub vehicles: Vec<Vehicle>,
    pub centers: Vec<NodeId>,
}

const CENTERS: [NodeId; 4] = [NodeId(0), NodeId(1), NodeId(2), NodeId(3)];
const FIRST_DEADLINE: i64 = 1_625_000_000;

/// Adds the edges `i - i+1` for every i in the range.
fn add_chain(graph: &mut Graph, nodes: std::ops::Range<usize>, distance: f64) {
    for i in nodes {
        graph.add_edge(NodeId(i), NodeId(i + 1), distance).unwrap();
    }
}

/// 4 centers (0 to 3), each one connected to two destinations, 2 vehicles per center.
///
/// ```text
/// 0 --50-- 4      1 --70-- 6 --60-- 13
/// 0 --60-- 5 --50-- 12      1 --80-- 7
/// 2 --90-- 8      3 --110-- 10
/// 2 --100-- 9     3 --120-- 11
/// ```
pub fn small() -> Scenario {
    let graph = Graph::from_edges(
        14,
        [
            (0, 4, 50.0),
            (0, 5, 60.0),
            (1, 6, 70.0),
            (1, 7, 80.0),
            (2, 8, 90.0),
            (2, 9, 100.0),
            (3, 10, 110.0),
            (3, 11, 120.0),
            (5, 12, 50.0),
            (6, 13, 60.0),
        ],
    )
    .unwrap();

    let deliveries = vec![
        Delivery::new(1, 4, 100.0, 1_625_000_000),
        Delivery::new(2, 5, 100.0, 1_625_100_000),
        Delivery::new(3, 6, 50.0, 1_625_200_000),
        Delivery::new(4, 7, 80.0, 1_625_300_000),
        Delivery::new(5, 8, 90.0, 1_625_400_000),
        Delivery::new(6, 9, 70.0, 1_625_500_000),
        Delivery::new(7, 10, 60.0, 1_625_600_000),
        Delivery::new(8, 11, 50.0, 1_625_700_000),
        Delivery::new(9, 12, 40.0, 1_625_800_000),
        Delivery::new(10, 13, 30.0, 1_625_900_000),
    ];

    let vehicles = (0..8)
        .map(|i| Vehicle::new(i + 1, (i / 2) as usize, 1000.0, 8.0))
        .collect();

    Scenario {
        graph,
        deliveries,
        vehicles,
        centers: CENTERS.to_vec(),
    }
}

/// 200 nodes, each center leads to its own chain of nodes, 100 deliveries, 5 vehicles per
/// center.
pub fn medium() -> Scenario {
    let mut graph = Graph::new(200);

    graph.add_edge(NodeId(0), NodeId(4), 20.0).unwrap();
    add_chain(&mut graph, 4..50, 10.0);
    graph.add_edge(NodeId(1), NodeId(60), 20.0).unwrap();
    add_chain(&mut graph, 60..100, 15.0);
    graph.add_edge(NodeId(2), NodeId(110), 25.0).unwrap();
    add_chain(&mut graph, 110..140, 10.0);
    graph.add_edge(NodeId(3), NodeId(150), 20.0).unwrap();
    add_chain(&mut graph, 150..180, 12.0);

    let deliveries = (1..=100u64)
        .map(|i| {
            let destination = match i {
                1..=25 => 4 + i % 46,
                26..=50 => 60 + i % 41,
                51..=75 => 110 + i % 31,
                _ => 150 + i % 31,
            };
            let weight = 50 + i % 20;
            let deadline = FIRST_DEADLINE + i as i64 * 1000;
            Delivery::new(i, destination as usize, weight as f64, deadline)
        })
        .collect();

    let vehicles = fleet(5, |k| (500.0 + k as f64 * 50.0, 8.0));

    Scenario {
        graph,
        deliveries,
        vehicles,
        centers: CENTERS.to_vec(),
    }
}

/// 1000 nodes, 4 chains (one per center) linked by a few corridors, 500 deliveries, 10 vehicles
/// per center.
pub fn large() -> Scenario {
    let mut graph = Graph::new(1000);

    graph.add_edge(NodeId(0), NodeId(4), 30.0).unwrap();
    add_chain(&mut graph, 4..199, 10.0);
    graph.add_edge(NodeId(1), NodeId(201), 25.0).unwrap();
    add_chain(&mut graph, 201..400, 10.0);
    graph.add_edge(NodeId(2), NodeId(401), 25.0).unwrap();
    add_chain(&mut graph, 401..600, 11.0);
    graph.add_edge(NodeId(3), NodeId(601), 25.0).unwrap();
    add_chain(&mut graph, 601..800, 12.0);

    // corridors between the regions
    graph.add_edge(NodeId(100), NodeId(300), 50.0).unwrap();
    graph.add_edge(NodeId(200), NodeId(500), 60.0).unwrap();
    graph.add_edge(NodeId(400), NodeId(700), 70.0).unwrap();

    let deliveries = (1..=500u64)
        .map(|i| {
            let destination = 4 + i % 796;
            let weight = 50 + i % 100;
            let deadline = FIRST_DEADLINE + i as i64 * 1000;
            Delivery::new(i, destination as usize, weight as f64, deadline)
        })
        .collect();

    let vehicles = fleet(10, |k| {
        let hours = if k < 5 { 8.0 } else { 10.0 };
        (300.0 + k as f64 * 50.0, hours)
    });

    Scenario {
        graph,
        deliveries,
        vehicles,
        centers: CENTERS.to_vec(),
    }
}

/// Vehicles numbered from 1, `per_center` vehicles for each center, the k-th vehicle of a center
/// gets the `(max_payload, max_operating_hours)` returned by `limits(k)`.
fn fleet(per_center: u64, limits: impl Fn(u64) -> (f64, f64)) -> Vec<Vehicle> {
    CENTERS
        .iter()
        .flat_map(|center| (0..per_center).map(move |k| (center.index(), k)))
        .enumerate()
        .map(|(i, (center, k))| {
            let (max_payload, max_operating_hours) = limits(k);
            Vehicle::new(i as u64 + 1, center, max_payload, max_operating_hours)
        })
        .collect()
}
