//! Reverse geocoding.
//!
//! `Geocoder` is the seam the location form drives; `MapboxGeocoder` is the
//! production implementation. Lookups never fail loudly: any error becomes
//! `None` and the resolver falls back to a coordinate-only address.

pub mod mapbox;
pub mod parse;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::location::Coordinate;

pub use mapbox::MapboxGeocoder;
pub use parse::split_building_number;

/// Structured fields parsed from the top reverse geocode feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Full place description, e.g. "23 Setthathirath Road, Vientiane, Laos"
    pub place_name: String,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    /// District name suggested by the geocoder; not validated against any area
    pub district_hint: Option<String>,
}

pub trait Geocoder: Send + Sync {
    /// Resolve a coordinate. `None` on network failure or when nothing was found.
    fn reverse_geocode(&self, coordinate: Coordinate) -> impl Future<Output = Option<GeocodeResult>> + Send;
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Mapbox access token is not configured")]
    MissingToken,

    #[error("Geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding service returned status {0}")]
    Status(u16),

    #[error("Invalid geocoding URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid geocoding response: {0}")]
    Parse(#[from] serde_json::Error),
}
