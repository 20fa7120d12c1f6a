//! Geographic and planar coordinate helpers.
//!
//! Raw geometry arrives as latitude/longitude pairs. The graph works in a
//! local planar frame obtained with an equirectangular projection centred on a
//! caller-supplied origin, followed by a linear scale factor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Mean Earth radius in meters used by the projection.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Default linear scale applied after projection (meters to display units).
pub const DEFAULT_SCALE: f64 = 0.001;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for GeoCoordinate {
    type Err = Error;

    /// Parse a `lat,lon` pair such as `48.8566,2.3522`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinate {
            value: value.to_string(),
        };

        let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(invalid());
        }

        Ok(Self { lat, lon })
    }
}

/// Point in the local projected frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPosition {
    pub x: f64,
    pub y: f64,
}

impl PlanarPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Equirectangular projection centred on `origin`, scaled by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    origin: GeoCoordinate,
    scale: f64,
    cos_origin_lat: f64,
}

impl Projection {
    pub fn new(origin: GeoCoordinate, scale: f64) -> Self {
        Self {
            origin,
            scale,
            cos_origin_lat: origin.lat.to_radians().cos(),
        }
    }

    pub fn origin(&self) -> GeoCoordinate {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Project a geographic coordinate into the local planar frame.
    pub fn project(&self, coordinate: GeoCoordinate) -> PlanarPosition {
        let d_lon = (coordinate.lon - self.origin.lon).to_radians();
        let d_lat = (coordinate.lat - self.origin.lat).to_radians();
        PlanarPosition {
            x: EARTH_RADIUS_METERS * d_lon * self.cos_origin_lat * self.scale,
            y: EARTH_RADIUS_METERS * d_lat * self.scale,
        }
    }
}
