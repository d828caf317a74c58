use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiClient;
use crate::auth::SessionData;
use crate::models::{Envelope, User};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token and the signed in user
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionData> {
        let response: Envelope<LoginResponse> = self
            .api
            .post("/auth/login", &Credentials { email, password })
            .await
            .context("Login failed")?;
        let LoginResponse { token, user } = response.data;
        info!(user_id = %user.id, role = ?user.role, "Signed in");
        Ok(SessionData::new(token, user))
    }

    /// Current user for the client's token
    pub async fn me(&self) -> Result<User> {
        let response: Envelope<User> = self
            .api
            .get("/auth/me")
            .await
            .context("Failed to fetch current user")?;
        Ok(response.data)
    }
}
