use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiClient;
use crate::models::User;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Assumed token lifetime when the backend does not say.
const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: User,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn new(token: String, user: User) -> Self {
        Self {
            token,
            user,
            created_at: Utc::now(),
            expires_at: None,
        }
    }

    fn expiry(&self) -> DateTime<Utc> {
        self.expires_at
            .unwrap_or(self.created_at + Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expiry()
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        (self.expiry() - Utc::now()).num_minutes().max(0)
    }
}

pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. Returns whether a valid session was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context("Failed to read session file")?;
            let data: SessionData = serde_json::from_str(&contents)
                .context("Failed to parse session file")?;

            if !data.is_expired() {
                self.data = Some(data);
                return Ok(true);
            }
            debug!("Stored session has expired");
        }
        Ok(false)
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Sign out: forget the session and remove the file
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn update(&mut self, data: SessionData) {
        self.data = Some(data);
    }

    /// Replace the cached user after a profile refresh, keeping the token
    pub fn refresh_user(&mut self, user: User) {
        if let Some(ref mut data) = self.data {
            data.user = user;
        }
    }

    /// Get the bearer token if a session exists
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    /// Check if session is valid (exists and not expired)
    pub fn is_valid(&self) -> bool {
        self.data.as_ref().is_some_and(|d| !d.is_expired())
    }

    pub fn is_admin(&self) -> bool {
        self.is_valid() && self.user().is_some_and(|u| u.role.is_admin())
    }

    /// Set or clear the client's bearer token to match this session
    pub fn apply_to(&self, api: &mut ApiClient) {
        match self.data.as_ref().filter(|d| !d.is_expired()) {
            Some(data) => api.set_token(data.token.clone()),
            None => api.clear_token(),
        }
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn user(role: UserRole) -> User {
        serde_json::from_value(serde_json::json!({
            "id": "u1",
            "name": "Admin",
            "email": "admin@example.com",
            "role": role,
        }))
        .unwrap()
    }

    #[test]
    fn test_expiry() {
        let mut data = SessionData::new("t".to_string(), user(UserRole::User));
        assert!(!data.is_expired());
        assert!(data.minutes_until_expiry() > 60 * 23);

        data.created_at = Utc::now() - Duration::hours(25);
        assert!(data.is_expired());
        assert_eq!(data.minutes_until_expiry(), 0);

        data.expires_at = Some(Utc::now() + Duration::minutes(90));
        assert!(!data.is_expired());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = crate::utils::test_dir("session");
        let mut session = Session::new(dir.clone());
        session.update(SessionData::new("tok".to_string(), user(UserRole::Admin)));
        session.save().unwrap();
        assert!(session.is_admin());

        let mut loaded = Session::new(dir.clone());
        assert!(loaded.load().unwrap());
        assert_eq!(loaded.token(), Some("tok"));
        assert_eq!(loaded.user().map(|u| u.email.as_str()), Some("admin@example.com"));

        loaded.clear().unwrap();
        assert!(!dir.join(SESSION_FILE).exists());
        assert!(!Session::new(dir).load().unwrap());
    }

    #[test]
    fn test_expired_session_not_loaded() {
        let dir = crate::utils::test_dir("session-expired");
        let mut data = SessionData::new("old".to_string(), user(UserRole::User));
        data.created_at = Utc::now() - Duration::days(3);
        let mut session = Session::new(dir.clone());
        session.update(data);
        session.save().unwrap();

        let mut loaded = Session::new(dir);
        assert!(!loaded.load().unwrap());
        assert!(!loaded.is_valid());
    }

    #[test]
    fn test_apply_to_client() {
        let mut api = ApiClient::new("http://localhost").unwrap();
        let mut session = Session::new(crate::utils::test_dir("session-apply"));
        session.update(SessionData::new("abc".to_string(), user(UserRole::Agent)));
        session.apply_to(&mut api);
        assert!(api.is_authenticated());
        assert!(!session.is_admin());

        session.data = None;
        session.apply_to(&mut api);
        assert!(!api.is_authenticated());
    }
}
