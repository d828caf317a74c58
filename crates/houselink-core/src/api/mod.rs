//! REST API client module for the houselink backend.
//!
//! This module provides the `ApiClient` used by every service wrapper to
//! talk to the marketplace backend (properties, users, banks, news,
//! settings, uploads and location info).
//!
//! Requests carry a bearer token taken from the session, plus whatever
//! request interceptors the caller registers.

pub mod client;
pub mod error;

pub use client::{AcceptLanguage, ApiClient, RequestInterceptor};
pub use error::ApiError;
