use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::models::{Envelope, Page, User, UserDraft};

use super::fetch_page;

#[derive(Debug, Clone)]
pub struct UserService {
    api: ApiClient,
}

impl UserService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, keyword: Option<&str>, page: u32, per_page: u32) -> Result<Page<User>> {
        let params = keyword
            .filter(|k| !k.trim().is_empty())
            .map(|k| vec![("keyword", k.trim().to_string())])
            .unwrap_or_default();
        fetch_page(&self.api, "/users", params, page, per_page).await
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        let response: Envelope<User> = self
            .api
            .get(&format!("/users/{}", id))
            .await
            .with_context(|| format!("Failed to fetch user {}", id))?;
        Ok(response.data)
    }

    pub async fn create(&self, draft: &UserDraft) -> Result<User> {
        draft.validate()?;
        let response: Envelope<User> = self
            .api
            .post("/users", draft)
            .await
            .context("Failed to create user")?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, draft: &UserDraft) -> Result<User> {
        draft.validate()?;
        let response: Envelope<User> = self
            .api
            .put(&format!("/users/{}", id), draft)
            .await
            .with_context(|| format!("Failed to update user {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/users/{}", id))
            .await
            .with_context(|| format!("Failed to delete user {}", id))
    }
}
