//! Common test utilities and fixture helpers.
//!
//! Provides the Overpass fixture path, a brute-force shortest distance used as
//! an oracle for the A* search, and a seeded generator for random planar graphs.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roadtrace_lib::{Graph, NodeId, PlanarPosition};

/// Path to the small Overpass fixture document.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/small_town.json")
}

/// Lowest total edge weight between `start` and `goal`, by exhaustive relaxation.
#[allow(dead_code)]
pub fn brute_force_distance(graph: &Graph, start: NodeId, goal: NodeId) -> Option<f64> {
    let mut best: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
    let mut settled: HashSet<NodeId> = HashSet::new();

    loop {
        let next = best
            .iter()
            .filter(|(node, _)| !settled.contains(*node))
            .min_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(node, distance)| (*node, *distance));
        let Some((node, distance)) = next else {
            break;
        };
        settled.insert(node);

        for edge in graph.neighbours(node) {
            let candidate = distance + edge.distance;
            let entry = best.entry(edge.target).or_insert(f64::INFINITY);
            if candidate < *entry {
                *entry = candidate;
            }
        }
    }

    best.get(&goal).copied()
}

/// Random planar graph with `nodes` positions and up to `edges` edges.
///
/// Edge weights are at least the Euclidean distance between their endpoints,
/// so the straight-line heuristic never overestimates.
#[allow(dead_code)]
pub fn random_graph(seed: u64, nodes: i64, edges: usize) -> (Graph, HashMap<NodeId, PlanarPosition>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let positions: HashMap<NodeId, PlanarPosition> = (0..nodes)
        .map(|node| {
            let position = PlanarPosition::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
            (node, position)
        })
        .collect();

    let weighted: Vec<(NodeId, NodeId, f64)> = (0..edges)
        .map(|_| {
            let a = rng.gen_range(0..nodes);
            let b = rng.gen_range(0..nodes);
            let detour: f64 = rng.gen_range(1.0..2.0);
            (a, b, positions[&a].distance_to(&positions[&b]) * detour)
        })
        .collect();

    (Graph::from_weighted_edges(weighted), positions)
}

/// Graph keys in ascending order.
#[allow(dead_code)]
pub fn sorted_nodes(graph: &Graph) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = graph.nodes().collect();
    nodes.sort_unstable();
    nodes
}
