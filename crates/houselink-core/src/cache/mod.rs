//! Local caching module for slowly-changing reference data.
//!
//! This module provides the `CacheManager` for storing and retrieving
//! backend data locally. Data is cached in JSON format and considered
//! stale after 60 minutes.
//!
//! Cached data types include:
//! - Location areas and their district lists
//! - Site settings

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
