//! Route command handler for searching between two road-network nodes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use roadtrace_lib::{build_timeline, Config, GeoCoordinate, NodeId, RoadSession, SearchSummary};
use tracing::debug;

use crate::commands::load_input;
use crate::output::{render, OutputFormat};

/// How an endpoint is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint {
    /// Explicit node identifier.
    Node(NodeId),
    /// Graph node nearest to a coordinate.
    Near(GeoCoordinate),
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Overpass JSON document to build the network from.
    pub input: PathBuf,
    pub from: Endpoint,
    pub to: Endpoint,
    /// Attach the animation timeline to the output.
    pub timeline: bool,
}

/// Handle the route subcommand.
///
/// A missing path is reported in the output; only invalid endpoints fail.
pub fn handle_route_command(
    args: &RouteCommandArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<String> {
    let data = load_input(&args.input, config)?;
    let mut session = RoadSession::from_osm(&data, config);

    let start = select(&mut session, args.from, Role::Start)?;
    let goal = select(&mut session, args.to, Role::Goal)?;
    debug!(start, goal, "resolved endpoints");

    let outcome = session.run_search().context("search failed")?.clone();
    let mut summary = SearchSummary::from_outcome(session.network(), start, goal, &outcome);
    if args.timeline {
        summary = summary.with_timeline(build_timeline(&outcome, &config.animation));
    }

    render(format, &summary, SearchSummary::render_plain)
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Start,
    Goal,
}

fn select(session: &mut RoadSession, endpoint: Endpoint, role: Role) -> Result<NodeId> {
    let selected = match (endpoint, role) {
        (Endpoint::Node(node), Role::Start) => session.select_start(node).map(|()| node),
        (Endpoint::Node(node), Role::Goal) => session.select_goal(node).map(|()| node),
        (Endpoint::Near(coordinate), Role::Start) => session.select_start_near(coordinate),
        (Endpoint::Near(coordinate), Role::Goal) => session.select_goal_near(coordinate),
    };
    selected.with_context(|| format!("failed to select {} node", role.label()))
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::Start => "start",
            Role::Goal => "goal",
        }
    }
}
