//! Caller-owned context tying a road network to endpoint selection and the
//! latest search result.

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{GeoCoordinate, Projection};
use crate::graph::{build_network, NodeId, RoadNetwork};
use crate::overpass::OsmData;
use crate::path::SearchOutcome;
use crate::spatial::NodeLocator;
use crate::timeline::{build_timeline, AnimationConfig, Timeline};

/// Road network plus the interactive state around it.
///
/// Independent sessions share nothing, so several graphs can be explored side
/// by side.
pub struct RoadSession {
    network: RoadNetwork,
    locator: NodeLocator,
    projection: Projection,
    start: Option<NodeId>,
    goal: Option<NodeId>,
    outcome: Option<SearchOutcome>,
}

impl RoadSession {
    pub fn new(network: RoadNetwork, projection: Projection) -> Self {
        let locator = NodeLocator::build(&network);
        Self {
            network,
            locator,
            projection,
            start: None,
            goal: None,
            outcome: None,
        }
    }

    /// Build the network for `data` with the projection and scale from `config`.
    pub fn from_osm(data: &OsmData, config: &Config) -> Self {
        let projection = config.projection_for(data);
        let network = build_network(&data.ways, &data.coordinates, &projection);
        Self::new(network, projection)
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn goal(&self) -> Option<NodeId> {
        self.goal
    }

    /// Outcome of the latest [`run_search`](Self::run_search).
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    pub fn select_start(&mut self, node: NodeId) -> Result<()> {
        self.start = Some(self.validate(node)?);
        Ok(())
    }

    pub fn select_goal(&mut self, node: NodeId) -> Result<()> {
        self.goal = Some(self.validate(node)?);
        Ok(())
    }

    /// Select the graph node nearest to `coordinate` as start.
    pub fn select_start_near(&mut self, coordinate: GeoCoordinate) -> Result<NodeId> {
        let node = self.nearest(coordinate)?;
        self.start = Some(node);
        Ok(node)
    }

    /// Select the graph node nearest to `coordinate` as goal.
    pub fn select_goal_near(&mut self, coordinate: GeoCoordinate) -> Result<NodeId> {
        let node = self.nearest(coordinate)?;
        self.goal = Some(node);
        Ok(node)
    }

    /// Search between the selected endpoints and keep the outcome.
    pub fn run_search(&mut self) -> Result<&SearchOutcome> {
        let start = self.start.ok_or(Error::MissingEndpoint { role: "start" })?;
        let goal = self.goal.ok_or(Error::MissingEndpoint { role: "goal" })?;

        let outcome = self.network.search(start, goal)?;
        info!(
            start,
            goal,
            found = outcome.found(),
            discovered = outcome.discovery_order.len(),
            "search finished"
        );
        Ok(&*self.outcome.insert(outcome))
    }

    /// Animation schedule for the latest outcome.
    pub fn timeline(&self, config: &AnimationConfig) -> Option<Timeline> {
        self.outcome
            .as_ref()
            .map(|outcome| build_timeline(outcome, config))
    }

    /// Forget endpoints and results, keeping the network.
    pub fn reset(&mut self) {
        self.start = None;
        self.goal = None;
        self.outcome = None;
    }

    fn validate(&self, node: NodeId) -> Result<NodeId> {
        if self.network.graph.contains(node) {
            Ok(node)
        } else {
            Err(Error::NodeNotInGraph { node })
        }
    }

    fn nearest(&self, coordinate: GeoCoordinate) -> Result<NodeId> {
        let point = self.projection.project(coordinate);
        self.locator.nearest(point).map(|(node, _)| node)
    }
}
