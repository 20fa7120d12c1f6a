use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the roadtrace library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search endpoint is not a key of the graph.
    #[error("node {node} is not in the graph")]
    NodeNotInGraph { node: NodeId },

    /// Raised when a session search runs before both endpoints are selected.
    #[error("no {role} node selected")]
    MissingEndpoint { role: &'static str },

    /// Raised when a nearest-node query runs against a network without positions.
    #[error("road network has no positioned nodes")]
    EmptyNetwork,

    /// Raised when a `lat,lon` pair cannot be parsed or is out of range.
    #[error("invalid coordinate: {value}")]
    InvalidCoordinate { value: String },

    /// Raised when a geometry or config file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
