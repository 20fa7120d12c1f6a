//! KD-tree lookup of the graph node closest to a planar point.
//!
//! Endpoint selection usually starts from a point picked on screen or a
//! geocoded coordinate. [`NodeLocator`] maps such a point to the nearest node
//! that is a key of the graph, so the result is always a valid search endpoint.

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::PlanarPosition;
use crate::graph::{NodeId, RoadNetwork};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Nearest-node index over the positioned nodes of a road network.
pub struct NodeLocator {
    /// Item type is the index into `nodes`.
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    nodes: Vec<NodeId>,
}

impl NodeLocator {
    /// Index every graph node that has a position.
    pub fn build(network: &RoadNetwork) -> Self {
        let mut nodes: Vec<NodeId> = network
            .positions
            .keys()
            .copied()
            .filter(|node| network.graph.contains(*node))
            .collect();
        nodes.sort_unstable();

        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        for (index, node) in nodes.iter().enumerate() {
            if let Some(position) = network.positions.get(node) {
                tree.add(&[position.x, position.y], index);
            }
        }

        debug!(node_count = nodes.len(), "built node locator");

        Self { tree, nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Closest indexed node to `point` and its distance.
    pub fn nearest(&self, point: PlanarPosition) -> Result<(NodeId, f64)> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyNetwork);
        }

        let neighbour = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[point.x, point.y]);
        let node = self
            .nodes
            .get(neighbour.item)
            .copied()
            .ok_or(Error::EmptyNetwork)?;
        Ok((node, neighbour.distance.sqrt()))
    }
}
