//! Core library for houselink.
//!
//! Provides the backend API client and per-resource services, the session
//! context, cached location data, and the location resolver that turns map
//! clicks plus area/district/street selections into a structured address.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod filters;
pub mod geocode;
pub mod location;
pub mod models;
pub mod notice;
pub mod services;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use auth::{Session, SessionData};
pub use config::Config;
pub use filters::PropertyFilter;
pub use geocode::{GeocodeResult, Geocoder, MapboxGeocoder};
pub use location::{
    Coordinate, District, LocationArea, LocationError, LocationForm, LocationResolver,
    ResolvedAddress, ResolverState,
};
