use std::fmt;

use serde::Serialize;

use crate::graph::{NodeId, RoadNetwork};
use crate::path::SearchOutcome;
use crate::timeline::Timeline;

/// Size of a built road network.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NetworkSummary {
    pub nodes: usize,
    pub edges: usize,
    /// Nodes with a position, including ones that ended up without edges.
    pub positioned: usize,
}

impl NetworkSummary {
    pub fn from_network(network: &RoadNetwork) -> Self {
        Self {
            nodes: network.graph.node_count(),
            edges: network.graph.edge_count(),
            positioned: network.positions.len(),
        }
    }

    pub fn render_plain(&self) -> String {
        format!(
            "Network: {} nodes, {} edges ({} positioned nodes)\n",
            self.nodes, self.edges, self.positioned
        )
    }
}

/// Structured representation of a search that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchSummary {
    pub start: NodeId,
    pub goal: NodeId,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub discovered: usize,
    pub path: Vec<NodeId>,
    pub discovery_order: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

impl SearchSummary {
    pub fn from_outcome(
        network: &RoadNetwork,
        start: NodeId,
        goal: NodeId,
        outcome: &SearchOutcome,
    ) -> Self {
        Self {
            start,
            goal,
            found: outcome.found(),
            hops: outcome.hop_count(),
            distance: outcome.path_distance(&network.graph),
            discovered: outcome.discovery_order.len(),
            path: outcome.path.clone().unwrap_or_default(),
            discovery_order: outcome.discovery_order.clone(),
            timeline: None,
        }
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn render_plain(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found {
            writeln!(
                f,
                "Path: {} -> {} ({} hops, distance {:.3}, {} nodes discovered)",
                self.start,
                self.goal,
                self.hops.unwrap_or_default(),
                self.distance.unwrap_or_default(),
                self.discovered
            )?;
            let joined = self
                .path
                .iter()
                .map(NodeId::to_string)
                .collect::<Vec<_>>()
                .join(" -> ");
            writeln!(f, "{joined}")?;
        } else {
            writeln!(
                f,
                "No path: {} -> {} ({} nodes discovered)",
                self.start, self.goal, self.discovered
            )?;
        }

        if let Some(timeline) = &self.timeline {
            writeln!(
                f,
                "Timeline: {} discovery frames, {} path marks, last frame {} of {}",
                timeline.discovery.len(),
                timeline.path.len(),
                timeline.last_frame(),
                timeline.total_frames
            )?;
        }
        Ok(())
    }
}
