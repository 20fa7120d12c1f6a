//! Frame schedule derived from a search outcome.
//!
//! The renderer animates the exploration by lighting up nodes in discovery
//! order over `exploration_duration` frames, then traces the final path
//! starting at `path_reveal_start`. This module only computes the numbers; it
//! knows nothing about curves or materials.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;
use crate::path::SearchOutcome;

/// Frame budget of the exploration and path-reveal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub exploration_duration: u32,
    pub path_reveal_start: u32,
    pub path_reveal_duration: u32,
    pub total_frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            exploration_duration: 300,
            path_reveal_start: 320,
            path_reveal_duration: 100,
            total_frames: 500,
        }
    }
}

/// Frame at which a node is first discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryFrame {
    pub node: NodeId,
    pub frame: u32,
}

/// Position of a node along the final path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathMark {
    pub node: NodeId,
    /// 0.0 at the start node, 1.0 at the goal.
    pub order: f64,
    pub frame: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub total_frames: u32,
    pub discovery: Vec<DiscoveryFrame>,
    pub path: Vec<PathMark>,
}

impl Timeline {
    /// Lookup table from node to discovery frame.
    pub fn discovery_frames(&self) -> HashMap<NodeId, u32> {
        self.discovery
            .iter()
            .map(|entry| (entry.node, entry.frame))
            .collect()
    }

    /// Last frame used by either phase.
    pub fn last_frame(&self) -> u32 {
        let discovery = self.discovery.iter().map(|entry| entry.frame).max();
        let path = self.path.iter().map(|mark| mark.frame).max();
        discovery.max(path).unwrap_or(0)
    }
}

/// Compute discovery frames and path marks for `outcome`.
pub fn build_timeline(outcome: &SearchOutcome, config: &AnimationConfig) -> Timeline {
    let discovered = outcome.discovery_order.len();
    let discovery = outcome
        .discovery_order
        .iter()
        .enumerate()
        .map(|(index, node)| DiscoveryFrame {
            node: *node,
            frame: discovery_frame(index, discovered, config.exploration_duration),
        })
        .collect();

    let path = outcome
        .path
        .as_deref()
        .map(|path| {
            path.iter()
                .enumerate()
                .map(|(index, node)| {
                    let order = normalised(index, path.len());
                    let offset = (order * f64::from(config.path_reveal_duration)) as u32;
                    PathMark {
                        node: *node,
                        order,
                        frame: config.path_reveal_start.saturating_add(offset),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Timeline {
        total_frames: config.total_frames,
        discovery,
        path,
    }
}

fn normalised(index: usize, len: usize) -> f64 {
    index as f64 / len.saturating_sub(1).max(1) as f64
}

/// Linear spread over the exploration phase with a small deterministic wobble
/// so neighbouring discoveries do not land on the same frame.
fn discovery_frame(index: usize, len: usize, duration: u32) -> u32 {
    let base = (normalised(index, len) * f64::from(duration)) as i64;
    let i = index as f64;
    let variation = ((i * 0.5).sin() * 3.0 + (i * 0.3).cos() * 2.0) as i64;
    (base + variation).clamp(0, i64::from(u32::MAX)) as u32
}
