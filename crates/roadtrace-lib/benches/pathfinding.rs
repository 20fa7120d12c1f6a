use std::collections::HashMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use roadtrace_lib::{build_network, GeoCoordinate, NodeId, Projection, RoadNetwork, Way};

const GRID_SIZE: i64 = 80;
const SPACING_DEGREES: f64 = 0.0005;

struct GridInput {
    ways: Vec<Way>,
    coordinates: HashMap<NodeId, GeoCoordinate>,
    projection: Projection,
}

fn node_id(row: i64, col: i64) -> NodeId {
    row * GRID_SIZE + col
}

static GRID: Lazy<GridInput> = Lazy::new(|| {
    let origin = GeoCoordinate::new(48.0, 11.0);
    let mut coordinates = HashMap::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            // Small deterministic jitter so f-scores are not all tied.
            let jitter = ((row * 31 + col * 17) % 7) as f64 * SPACING_DEGREES * 0.05;
            coordinates.insert(
                node_id(row, col),
                GeoCoordinate::new(
                    origin.lat + row as f64 * SPACING_DEGREES + jitter,
                    origin.lon + col as f64 * SPACING_DEGREES - jitter,
                ),
            );
        }
    }

    let mut ways = Vec::new();
    for row in 0..GRID_SIZE {
        let nodes = (0..GRID_SIZE).map(|col| node_id(row, col)).collect();
        ways.push(Way::new(row, nodes));
    }
    for col in 0..GRID_SIZE {
        let nodes = (0..GRID_SIZE).map(|row| node_id(row, col)).collect();
        ways.push(Way::new(GRID_SIZE + col, nodes));
    }

    GridInput {
        ways,
        coordinates,
        projection: Projection::new(origin, 1.0),
    }
});

static NETWORK: Lazy<RoadNetwork> =
    Lazy::new(|| build_network(&GRID.ways, &GRID.coordinates, &GRID.projection));

fn benchmark_pathfinding(c: &mut Criterion) {
    let grid = &*GRID;
    let network = &*NETWORK;
    let corner = node_id(GRID_SIZE - 1, GRID_SIZE - 1);
    let middle = node_id(GRID_SIZE / 2, GRID_SIZE / 2);

    c.bench_function("build_network_grid", |b| {
        b.iter(|| {
            let network = build_network(&grid.ways, &grid.coordinates, &grid.projection);
            black_box(network.graph.edge_count())
        });
    });

    c.bench_function("astar_corner_to_corner", |b| {
        b.iter(|| {
            let outcome = network.search(0, corner).expect("valid endpoints");
            black_box(outcome.discovery_order.len())
        });
    });

    c.bench_function("astar_corner_to_middle", |b| {
        b.iter(|| {
            let outcome = network.search(0, middle).expect("valid endpoints");
            black_box(outcome.path.map(|path| path.len()))
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
