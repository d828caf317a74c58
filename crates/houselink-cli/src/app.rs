//! Shared state for one command invocation.

use anyhow::{bail, Result};
use tracing::{debug, warn};

use houselink_core::api::AcceptLanguage;
use houselink_core::cache::CacheManager;
use houselink_core::{ApiClient, Config, MapboxGeocoder, Session};

pub struct App {
    pub config: Config,
    pub session: Session,
    pub cache: CacheManager,
    api: ApiClient,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let cache_dir = config.cache_dir()?;

        let mut session = Session::new(cache_dir.clone());
        match session.load() {
            Ok(true) => debug!("Restored saved session"),
            Ok(false) => debug!("No saved session"),
            Err(e) => warn!(error = %e, "Ignoring unreadable session file"),
        }

        let mut api = ApiClient::new(&config.api_base_url)?
            .with_interceptor(AcceptLanguage(config.locale.code().to_string()));
        session.apply_to(&mut api);

        Ok(Self {
            cache: CacheManager::new(cache_dir)?,
            config,
            session,
            api,
        })
    }

    /// Client carrying the current session's token
    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    /// Re-apply the session after login/logout
    pub fn sync_session(&mut self) {
        self.session.apply_to(&mut self.api);
    }

    pub fn require_session(&self) -> Result<()> {
        if !self.session.is_valid() {
            bail!("Not signed in. Run `houselink login` first.");
        }
        Ok(())
    }

    pub fn require_admin(&self) -> Result<()> {
        self.require_session()?;
        if !self.session.is_admin() {
            bail!("This command requires an admin account");
        }
        Ok(())
    }

    pub fn geocoder(&self) -> Result<MapboxGeocoder> {
        if self.config.mapbox.access_token.is_none() {
            warn!("MAPBOX_ACCESS_TOKEN is not set; addresses will fall back to coordinates");
        }
        MapboxGeocoder::new(&self.config.mapbox)
    }
}
