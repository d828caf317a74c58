//! Location resolution for listing and profile forms.
//!
//! This module provides:
//! - `LocationArea` / `District`: backend areas and their closed district lists
//! - `ResolvedAddress` / `Coordinate`: the structured address handed to forms
//! - `LocationResolver`: the synchronous state machine merging dropdown,
//!   text and geocoder inputs
//! - `LocationForm`: drives the resolver with background reverse geocoding
//!
//! Manual street and building edits always win over geocoder output, and
//! only the most recent map click's geocode result is ever applied.

pub mod address;
pub mod area;
pub mod form;
pub mod resolver;

use thiserror::Error;

pub use address::{Coordinate, ResolvedAddress};
pub use area::{District, LocationArea};
pub use form::{GeocodeOutcome, LocationForm};
pub use resolver::{GeocodeTicket, LocationResolver, ResolverState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Unknown location area: {0}")]
    UnknownArea(String),

    #[error("No location area selected")]
    NoAreaSelected,

    #[error("District {district:?} is not part of area {area}")]
    DistrictNotInArea { area: String, district: String },
}
