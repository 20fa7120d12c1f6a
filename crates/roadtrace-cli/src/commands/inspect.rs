//! Inspect command handler: report the size of the built road network.

use std::path::Path;

use anyhow::Result;
use roadtrace_lib::{Config, NetworkSummary, RoadSession};

use crate::commands::load_input;
use crate::output::{render, OutputFormat};

/// Build the network for `input` and render its summary.
pub fn handle_inspect_command(input: &Path, config: &Config, format: OutputFormat) -> Result<String> {
    let data = load_input(input, config)?;
    let session = RoadSession::from_osm(&data, config);
    let summary = NetworkSummary::from_network(session.network());
    render(format, &summary, NetworkSummary::render_plain)
}
