//! roadtrace library entry points.
//!
//! This crate turns raw road geometry into a weighted undirected planar graph
//! and runs a deterministic A* search over it that also records the discovery
//! trace used to animate the exploration. Higher-level consumers (the CLI, a
//! renderer) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod overpass;
pub mod path;
pub mod session;
pub mod spatial;
pub mod timeline;

pub use config::Config;
pub use error::{Error, Result};
pub use geo::{GeoCoordinate, PlanarPosition, Projection, EARTH_RADIUS_METERS};
pub use graph::{build_network, Edge, Graph, NodeId, RoadNetwork, Way};
pub use output::{NetworkSummary, SearchSummary};
pub use overpass::{load_osm_data, parse_osm_data, HighwayFilter, OsmData};
pub use path::{heuristic, search, SearchOutcome};
pub use session::RoadSession;
pub use spatial::NodeLocator;
pub use timeline::{build_timeline, AnimationConfig, Timeline};
