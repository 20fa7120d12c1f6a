// Module exports for CLI subcommands
//
// Each module handles one subcommand. main.rs parses arguments and dispatches
// to these handlers.

pub mod inspect;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use roadtrace_lib::{load_osm_data, Config, OsmData};

/// Load an Overpass document with the configured highway filter.
pub(crate) fn load_input(path: &Path, config: &Config) -> Result<OsmData> {
    load_osm_data(path, &config.highway_filter)
        .with_context(|| format!("failed to load road data from {}", path.display()))
}
