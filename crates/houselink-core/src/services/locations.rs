use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::cache::CacheManager;
use crate::location::LocationArea;
use crate::models::Envelope;

/// Location areas and their district lists (`GET /location-info`)
#[derive(Debug, Clone)]
pub struct LocationService {
    api: ApiClient,
}

impl LocationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn areas(&self) -> Result<Vec<LocationArea>> {
        let response: Envelope<Vec<LocationArea>> = self
            .api
            .get("/location-info")
            .await
            .context("Failed to fetch location areas")?;
        debug!(count = response.data.len(), "Fetched location areas");
        Ok(response.data)
    }

    /// Areas from cache when fresh, otherwise fetched and cached.
    /// A failed fetch falls back to a stale copy if there is one.
    pub async fn areas_cached(&self, cache: &CacheManager, refresh: bool) -> Result<Vec<LocationArea>> {
        let cached = cache.load_location_areas().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable location area cache");
            None
        });
        if let Some(ref cached) = cached {
            if !refresh && !cached.is_stale() {
                return Ok(cached.data.clone());
            }
        }

        match self.areas().await {
            Ok(areas) => {
                if let Err(e) = cache.save_location_areas(&areas) {
                    warn!(error = %e, "Failed to cache location areas");
                }
                Ok(areas)
            }
            Err(e) => match cached {
                Some(stale) => {
                    warn!(error = %e, age = %stale.age_display(), "Using stale location areas");
                    Ok(stale.data)
                }
                None => Err(e),
            },
        }
    }
}
