use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::location::LocationArea;
use crate::models::Settings;

/// Consider cache stale after 1 hour.
const CACHE_STALE_MINUTES: i64 = 60;

const LOCATION_AREAS: &str = "location_areas";
const SETTINGS: &str = "settings";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    /// Coarse age for the status line: "just now", "12m ago", "3h ago", "2d ago"
    pub fn age_display(&self) -> String {
        match self.age_minutes() {
            m if m < 1 => "just now".to_string(),
            m if m < 60 => format!("{}m ago", m),
            m if m < 24 * 60 => format!("{}h ago", m / 60),
            m => format!("{}d ago", m / (24 * 60)),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

/// Age of each cached item, for status display
#[derive(Debug, Clone, Default)]
pub struct CacheAges {
    pub location_areas: Option<String>,
    pub settings: Option<String>,
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        debug!(name, age_minutes = cached.age_minutes(), "Loaded cache entry");
        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(self.cache_path(name), contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }

    // ===== Location areas =====

    pub fn load_location_areas(&self) -> Result<Option<CachedData<Vec<LocationArea>>>> {
        self.load(LOCATION_AREAS)
    }

    pub fn save_location_areas(&self, areas: &[LocationArea]) -> Result<()> {
        self.save(LOCATION_AREAS, &areas)
    }

    // ===== Settings =====

    pub fn load_settings(&self) -> Result<Option<CachedData<Settings>>> {
        self.load(SETTINGS)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS, settings)
    }

    pub fn ages(&self) -> CacheAges {
        CacheAges {
            location_areas: self
                .load_location_areas()
                .ok()
                .flatten()
                .map(|c| c.age_display()),
            settings: self.load_settings().ok().flatten().map(|c| c.age_display()),
        }
    }

    /// Remove every cached file
    pub fn clear(&self) -> Result<()> {
        for name in [LOCATION_AREAS, SETTINGS] {
            let path = self.cache_path(name);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache file: {}", name))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn aged<T>(data: T, minutes: i64) -> CachedData<T> {
        CachedData {
            data,
            cached_at: Utc::now() - Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_age_display() {
        assert_eq!(aged((), 0).age_display(), "just now");
        assert_eq!(aged((), -5).age_display(), "just now");
        assert_eq!(aged((), 12).age_display(), "12m ago");
        assert_eq!(aged((), 95).age_display(), "1h ago");
        assert_eq!(aged((), 150).age_display(), "2h ago");
        assert_eq!(aged((), 1440 * 2 + 60).age_display(), "2d ago");
    }

    #[test]
    fn test_staleness() {
        assert!(!aged((), 30).is_stale());
        assert!(aged((), 61).is_stale());
    }

    #[test]
    fn test_location_areas_round_trip() {
        let cache = CacheManager::new(crate::utils::test_dir("cache")).unwrap();
        assert!(cache.load_location_areas().unwrap().is_none());
        assert!(cache.ages().location_areas.is_none());

        let areas = vec![LocationArea {
            id: "vte".to_string(),
            name: "Vientiane".to_string(),
            strict: vec!["Chanthabouly".to_string(), "Sisattanak".to_string()],
        }];
        cache.save_location_areas(&areas).unwrap();

        let cached = cache.load_location_areas().unwrap().unwrap();
        assert_eq!(cached.data, areas);
        assert!(!cached.is_stale());
        assert_eq!(cache.ages().location_areas.as_deref(), Some("just now"));

        cache.clear().unwrap();
        assert!(cache.load_location_areas().unwrap().is_none());
    }
}
