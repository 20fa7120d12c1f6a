//! Runtime configuration shared by the library and the CLI.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! {
//!   "scale": 1.0,
//!   "origin": { "lat": 52.52, "lon": 13.405 },
//!   "highway_filter": { "excluded": ["service"] },
//!   "animation": { "exploration_duration": 240 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{GeoCoordinate, Projection, DEFAULT_SCALE};
use crate::overpass::{HighwayFilter, OsmData};
use crate::timeline::AnimationConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Linear factor applied after projecting to meters.
    pub scale: f64,
    /// Projection origin. Defaults to the centroid of the loaded geometry.
    pub origin: Option<GeoCoordinate>,
    pub highway_filter: HighwayFilter,
    pub animation: AnimationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            origin: None,
            highway_filter: HighwayFilter::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Projection for `data`: the configured origin, else the data centroid,
    /// else the null island.
    pub fn projection_for(&self, data: &OsmData) -> Projection {
        let origin = self
            .origin
            .or_else(|| data.centroid())
            .unwrap_or(GeoCoordinate::new(0.0, 0.0));
        Projection::new(origin, self.scale)
    }
}
