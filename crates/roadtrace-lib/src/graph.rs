use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::geo::{GeoCoordinate, PlanarPosition, Projection};
use crate::path::{self, SearchOutcome};

/// Identifier of a road-network node (OpenStreetMap node ids are signed 64-bit).
pub type NodeId = i64;

/// Ordered sequence of node identifiers describing a connected road segment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Way {
    pub fn new(id: i64, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            nodes,
            tags: BTreeMap::new(),
        }
    }

    /// Value of the `highway` tag, if present.
    pub fn highway(&self) -> Option<&str> {
        self.tags.get("highway").map(String::as_str)
    }
}

/// Edge within the road graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub distance: f64,
}

/// Weighted undirected graph used by the search engine.
///
/// Only nodes with at least one edge are keys. Neighbour lists keep the order
/// in which edges were added, which fixes the expansion order of the search.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph from explicit weighted edges.
    ///
    /// The same rules as [`build_network`] apply: self-loops are dropped and
    /// only the first occurrence of an unordered pair is kept.
    pub fn from_weighted_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut builder = AdjacencyBuilder::default();
        for (a, b, distance) in edges {
            builder.insert(a, b, distance);
        }
        builder.finish().0
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `node` is a key of the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Weight of the edge between `a` and `b`, if one exists.
    pub fn edge_distance(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.distance)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterate over node identifiers in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }
}

/// Graph together with the planar positions and edge list produced from raw geometry.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub graph: Graph,
    pub positions: HashMap<NodeId, PlanarPosition>,
    /// Deduplicated edges in creation order.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl RoadNetwork {
    pub fn position(&self, node: NodeId) -> Option<PlanarPosition> {
        self.positions.get(&node).copied()
    }

    /// Run the traced A* search between two nodes of this network.
    pub fn search(&self, start: NodeId, goal: NodeId) -> Result<SearchOutcome> {
        path::search(&self.graph, &self.positions, start, goal)
    }
}

/// Build the road network from ways and raw coordinates.
///
/// Nodes never referenced by a way, or referenced without a coordinate, do not
/// receive a position. Consecutive pairs missing a position, self-loops, and
/// repeated unordered pairs are skipped.
pub fn build_network(
    ways: &[Way],
    coordinates: &HashMap<NodeId, GeoCoordinate>,
    projection: &Projection,
) -> RoadNetwork {
    let referenced: HashSet<NodeId> = ways
        .iter()
        .flat_map(|way| way.nodes.iter().copied())
        .collect();

    let positions: HashMap<NodeId, PlanarPosition> = referenced
        .iter()
        .filter_map(|node| {
            coordinates
                .get(node)
                .map(|coordinate| (*node, projection.project(*coordinate)))
        })
        .collect();

    let mut builder = AdjacencyBuilder::default();
    let mut skipped = 0usize;

    for way in ways {
        for pair in way.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(pos_a), Some(pos_b)) = (positions.get(&a), positions.get(&b)) else {
                skipped += 1;
                continue;
            };
            if !builder.insert(a, b, pos_a.distance_to(pos_b)) {
                skipped += 1;
            }
        }
    }

    let (graph, edges) = builder.finish();

    if skipped > 0 {
        debug!(skipped, "skipped unusable or duplicate way segments");
    }
    info!(
        ways = ways.len(),
        positioned = positions.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built road network"
    );

    RoadNetwork {
        graph,
        positions,
        edges,
    }
}

#[derive(Debug, Default)]
struct AdjacencyBuilder {
    adjacency: HashMap<NodeId, Vec<Edge>>,
    seen: HashSet<(NodeId, NodeId)>,
    edges: Vec<(NodeId, NodeId)>,
}

impl AdjacencyBuilder {
    /// Insert an undirected edge. Returns `false` when the pair was rejected.
    fn insert(&mut self, a: NodeId, b: NodeId, distance: f64) -> bool {
        if a == b {
            return false;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if !self.seen.insert(key) {
            return false;
        }

        self.edges.push((a, b));
        self.adjacency.entry(a).or_default().push(Edge {
            target: b,
            distance,
        });
        self.adjacency.entry(b).or_default().push(Edge {
            target: a,
            distance,
        });
        true
    }

    fn finish(self) -> (Graph, Vec<(NodeId, NodeId)>) {
        let graph = Graph {
            adjacency: Arc::new(self.adjacency),
            edge_count: self.edges.len(),
        };
        (graph, self.edges)
    }
}
