//! Geometry source backed by Overpass API JSON documents.
//!
//! The document is the `{"elements": [...]}` payload produced by an Overpass
//! query with `[out:json]`. Node elements supply raw coordinates; way elements
//! supply ordered node references and tags. Other element types are ignored.
//!
//! # Example
//!
//! ```
//! use roadtrace_lib::overpass::{parse_osm_data, HighwayFilter};
//!
//! let json = r#"{"elements": [
//!     {"type": "node", "id": 1, "lat": 0.0, "lon": 0.0},
//!     {"type": "node", "id": 2, "lat": 0.0, "lon": 0.001},
//!     {"type": "way", "id": 7, "nodes": [1, 2], "tags": {"highway": "residential"}}
//! ]}"#;
//! let data = parse_osm_data(json, &HighwayFilter::default()).unwrap();
//! assert_eq!(data.ways.len(), 1);
//! assert_eq!(data.coordinates.len(), 2);
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::GeoCoordinate;
use crate::graph::{NodeId, Way};

/// Highway values excluded by default: foot, cycle and service traffic.
pub const DEFAULT_EXCLUDED_HIGHWAYS: [&str; 6] = [
    "footway",
    "path",
    "steps",
    "pedestrian",
    "cycleway",
    "service",
];

/// Selects which ways count as drivable roads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighwayFilter {
    /// Drop ways without a `highway` tag.
    pub require_highway: bool,
    /// Patterns dropped when they occur anywhere in the `highway` value, so
    /// `path` also drops `footpath` and `service` drops `services`.
    pub excluded: Vec<String>,
}

impl Default for HighwayFilter {
    fn default() -> Self {
        Self {
            require_highway: true,
            excluded: DEFAULT_EXCLUDED_HIGHWAYS
                .iter()
                .map(|value| value.to_string())
                .collect(),
        }
    }
}

impl HighwayFilter {
    /// Filter that keeps every way.
    pub fn all() -> Self {
        Self {
            require_highway: false,
            excluded: Vec::new(),
        }
    }

    pub fn accepts(&self, way: &Way) -> bool {
        match way.highway() {
            Some(kind) => !self
                .excluded
                .iter()
                .any(|pattern| kind.contains(pattern.as_str())),
            None => !self.require_highway,
        }
    }
}

/// Ways and raw coordinates extracted from an Overpass document.
#[derive(Debug, Clone, Default)]
pub struct OsmData {
    pub coordinates: HashMap<NodeId, GeoCoordinate>,
    pub ways: Vec<Way>,
}

impl OsmData {
    /// Mean coordinate of the nodes referenced by ways.
    ///
    /// Used as projection origin when the caller has none.
    pub fn centroid(&self) -> Option<GeoCoordinate> {
        let referenced: HashSet<NodeId> = self
            .ways
            .iter()
            .flat_map(|way| way.nodes.iter().copied())
            .collect();

        let (count, lat, lon) = referenced
            .iter()
            .filter_map(|node| self.coordinates.get(node))
            .fold((0usize, 0.0, 0.0), |(count, lat, lon), coordinate| {
                (count + 1, lat + coordinate.lat, lon + coordinate.lon)
            });

        if count == 0 {
            return None;
        }
        Some(GeoCoordinate::new(lat / count as f64, lon / count as f64))
    }
}

#[derive(Debug, Deserialize)]
struct OverpassDocument {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: NodeId,
        lat: Option<f64>,
        lon: Option<f64>,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<NodeId>,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Parse an Overpass JSON document, keeping the ways accepted by `filter`.
pub fn parse_osm_data(json: &str, filter: &HighwayFilter) -> Result<OsmData> {
    let document: OverpassDocument = serde_json::from_str(json)?;

    let mut data = OsmData::default();
    let mut rejected = 0usize;

    for element in document.elements {
        match element {
            OverpassElement::Node {
                id,
                lat: Some(lat),
                lon: Some(lon),
            } => {
                data.coordinates.insert(id, GeoCoordinate::new(lat, lon));
            }
            OverpassElement::Node { .. } | OverpassElement::Other => {}
            OverpassElement::Way { id, nodes, tags } => {
                let way = Way { id, nodes, tags };
                if filter.accepts(&way) {
                    data.ways.push(way);
                } else {
                    rejected += 1;
                }
            }
        }
    }

    if rejected > 0 {
        debug!(rejected, "dropped ways rejected by highway filter");
    }
    info!(
        nodes = data.coordinates.len(),
        ways = data.ways.len(),
        "parsed overpass document"
    );

    Ok(data)
}

/// Read and parse an Overpass JSON file.
pub fn load_osm_data(path: &Path, filter: &HighwayFilter) -> Result<OsmData> {
    let json = fs::read_to_string(path).map_err(|source| Error::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_osm_data(&json, filter)
}
