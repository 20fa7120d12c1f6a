//! Traced A* search over a [`Graph`].
//!
//! Besides the shortest path, the search records the discovery trace: every
//! node in the order it was first popped from the frontier. Frontier ties on
//! the estimate are broken by insertion order, so repeated searches over the same
//! graph produce identical paths and traces.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::PlanarPosition;
use crate::graph::{Graph, NodeId};

/// Result of a search whose endpoints were valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Nodes from start to goal inclusive, or `None` when the goal is unreachable.
    pub path: Option<Vec<NodeId>>,
    /// Nodes in first-pop order.
    pub discovery_order: Vec<NodeId>,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of edges on the path.
    pub fn hop_count(&self) -> Option<usize> {
        self.path
            .as_ref()
            .map(|path| path.len().saturating_sub(1))
    }

    /// Sum of edge weights along the path.
    pub fn path_distance(&self, graph: &Graph) -> Option<f64> {
        let path = self.path.as_ref()?;
        path.windows(2)
            .map(|pair| graph.edge_distance(pair[0], pair[1]))
            .sum()
    }
}

/// Euclidean distance between `node` and `goal`.
///
/// Returns infinity when either position is unknown, which keeps such nodes at
/// the back of the frontier.
pub fn heuristic(positions: &HashMap<NodeId, PlanarPosition>, node: NodeId, goal: NodeId) -> f64 {
    match (positions.get(&node), positions.get(&goal)) {
        (Some(from), Some(to)) => from.distance_to(to),
        _ => f64::INFINITY,
    }
}

/// Run A* from `start` to `goal`, recording the discovery trace.
///
/// Fails with [`Error::NodeNotInGraph`] when either endpoint is not a graph
/// key. An unreachable goal is not an error: the outcome carries no path and
/// the trace of every node reachable from `start`.
pub fn search(
    graph: &Graph,
    positions: &HashMap<NodeId, PlanarPosition>,
    start: NodeId,
    goal: NodeId,
) -> Result<SearchOutcome> {
    for node in [start, goal] {
        if !graph.contains(node) {
            warn!(node, "search endpoint is not in the graph");
            return Err(Error::NodeNotInGraph { node });
        }
    }

    let mut state = SearchState::new(positions, start, goal);

    while let Some(entry) = state.frontier.pop() {
        let current = entry.node;
        state.in_frontier.remove(&current);

        // Stale entry for a node that was already expanded.
        if !state.discovered.insert(current) {
            continue;
        }
        state.discovery_order.push(current);

        if current == goal {
            let path = state.reconstruct_path();
            debug!(
                start,
                goal,
                path_len = path.len(),
                discovered = state.discovery_order.len(),
                "path found"
            );
            return Ok(SearchOutcome {
                path: Some(path),
                discovery_order: state.discovery_order,
            });
        }

        let current_g = state.g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        for edge in graph.neighbours(current) {
            state.relax(current, edge.target, current_g + edge.distance);
        }
    }

    debug!(
        start,
        goal,
        discovered = state.discovery_order.len(),
        "no path found"
    );
    Ok(SearchOutcome {
        path: None,
        discovery_order: state.discovery_order,
    })
}

struct SearchState<'a> {
    positions: &'a HashMap<NodeId, PlanarPosition>,
    start: NodeId,
    goal: NodeId,
    g_score: HashMap<NodeId, f64>,
    came_from: HashMap<NodeId, NodeId>,
    frontier: BinaryHeap<FrontierEntry>,
    in_frontier: HashSet<NodeId>,
    discovered: HashSet<NodeId>,
    discovery_order: Vec<NodeId>,
    counter: u64,
}

impl<'a> SearchState<'a> {
    fn new(positions: &'a HashMap<NodeId, PlanarPosition>, start: NodeId, goal: NodeId) -> Self {
        let mut state = Self {
            positions,
            start,
            goal,
            g_score: HashMap::new(),
            came_from: HashMap::new(),
            frontier: BinaryHeap::new(),
            in_frontier: HashSet::new(),
            discovered: HashSet::new(),
            discovery_order: Vec::new(),
            counter: 0,
        };

        state.g_score.insert(start, 0.0);
        state.frontier.push(FrontierEntry::new(0.0, 0, start));
        state.in_frontier.insert(start);
        state
    }

    fn relax(&mut self, current: NodeId, neighbour: NodeId, tentative_g: f64) {
        let improves = self
            .g_score
            .get(&neighbour)
            .map_or(true, |known| tentative_g < *known);
        if !improves {
            return;
        }

        let estimate = tentative_g + heuristic(self.positions, neighbour, self.goal);
        self.came_from.insert(neighbour, current);
        self.g_score.insert(neighbour, tentative_g);

        // Every improvement gets its own entry. Older entries for the node stay
        // queued and are dropped once it has been discovered.
        self.counter += 1;
        self.frontier
            .push(FrontierEntry::new(estimate, self.counter, neighbour));
        self.in_frontier.insert(neighbour);
    }

    fn reconstruct_path(&self) -> Vec<NodeId> {
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while current != self.start {
            match self.came_from.get(&current) {
                Some(&previous) => {
                    path.push(previous);
                    current = previous;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    estimate: FloatOrd,
    counter: u64,
    node: NodeId,
}

impl FrontierEntry {
    fn new(estimate: f64, counter: u64, node: NodeId) -> Self {
        Self {
            estimate: FloatOrd(estimate),
            counter,
            node,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the lowest estimate, then the
        // earliest insertion.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_estimate_then_oldest() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry::new(2.0, 1, 10));
        heap.push(FrontierEntry::new(1.0, 3, 30));
        heap.push(FrontierEntry::new(1.0, 2, 20));
        heap.push(FrontierEntry::new(f64::INFINITY, 4, 40));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|entry| entry.node)).collect();
        assert_eq!(order, vec![20, 30, 10, 40]);
    }

    #[test]
    fn heuristic_is_infinite_without_positions() {
        let positions = HashMap::from([(1, PlanarPosition::new(0.0, 0.0))]);
        assert!(heuristic(&positions, 1, 2).is_infinite());
        assert!(heuristic(&positions, 2, 1).is_infinite());
        assert_eq!(heuristic(&positions, 1, 1), 0.0);
    }

    #[test]
    fn start_equal_to_goal_yields_single_node_path() {
        let graph = Graph::from_weighted_edges([(1, 2, 1.0)]);
        let positions = HashMap::from([
            (1, PlanarPosition::new(0.0, 0.0)),
            (2, PlanarPosition::new(1.0, 0.0)),
        ]);

        let outcome = search(&graph, &positions, 1, 1).expect("valid endpoints");
        assert_eq!(outcome.path, Some(vec![1]));
        assert_eq!(outcome.discovery_order, vec![1]);
        assert_eq!(outcome.path_distance(&graph), Some(0.0));
    }

    #[test]
    fn rediscovered_nodes_are_skipped_on_second_pop() {
        // The heuristic overestimates at node 2, so node 3 is expanded via the
        // long edge first and improved later, after it was already popped.
        let graph = Graph::from_weighted_edges([
            (1, 2, 1.0),
            (1, 3, 5.0),
            (2, 3, 1.0),
            (3, 4, 200.0),
        ]);
        let positions = HashMap::from([
            (1, PlanarPosition::new(0.0, 0.0)),
            (2, PlanarPosition::new(0.0, 100.0)),
            (3, PlanarPosition::new(0.0, 0.0)),
            (4, PlanarPosition::new(0.0, 0.0)),
        ]);

        let outcome = search(&graph, &positions, 1, 4).expect("valid endpoints");
        assert_eq!(outcome.discovery_order, vec![1, 3, 2, 4]);
        assert_eq!(outcome.path, Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn improved_queued_node_is_requeued_at_lower_estimate() {
        // Node 2 is queued at 10 through the direct edge, then improved to 2
        // through node 3 while still waiting. The goal must come out via 2.
        let graph = Graph::from_weighted_edges([
            (1, 2, 10.0),
            (1, 3, 1.0),
            (3, 2, 1.0),
            (2, 4, 1.0),
            (1, 4, 9.0),
        ]);
        let positions: HashMap<_, _> = (1..=4)
            .map(|node| (node, PlanarPosition::new(0.0, 0.0)))
            .collect();

        let outcome = search(&graph, &positions, 1, 4).expect("valid endpoints");
        assert_eq!(outcome.path, Some(vec![1, 3, 2, 4]));
        assert_eq!(outcome.path_distance(&graph), Some(3.0));
        assert_eq!(outcome.discovery_order, vec![1, 3, 2, 4]);
    }
}
