use anyhow::{Context, Result};
use tracing::warn;

use crate::api::ApiClient;
use crate::cache::CacheManager;
use crate::models::{Envelope, Settings};

#[derive(Debug, Clone)]
pub struct SettingsService {
    api: ApiClient,
}

impl SettingsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get(&self) -> Result<Settings> {
        let response: Envelope<Settings> = self
            .api
            .get("/settings")
            .await
            .context("Failed to fetch settings")?;
        Ok(response.data)
    }

    pub async fn update(&self, settings: &Settings) -> Result<Settings> {
        let response: Envelope<Settings> = self
            .api
            .put("/settings", settings)
            .await
            .context("Failed to update settings")?;
        Ok(response.data)
    }

    /// Settings from cache when fresh, otherwise fetched and cached.
    /// A failed fetch falls back to a stale copy if there is one.
    pub async fn get_cached(&self, cache: &CacheManager, refresh: bool) -> Result<Settings> {
        let cached = cache.load_settings().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable settings cache");
            None
        });
        if let Some(ref cached) = cached {
            if !refresh && !cached.is_stale() {
                return Ok(cached.data.clone());
            }
        }

        match self.get().await {
            Ok(settings) => {
                if let Err(e) = cache.save_settings(&settings) {
                    warn!(error = %e, "Failed to cache settings");
                }
                Ok(settings)
            }
            Err(e) => match cached {
                Some(stale) => {
                    warn!(error = %e, age = %stale.age_display(), "Using stale settings");
                    Ok(stale.data)
                }
                None => Err(e),
            },
        }
    }
}
