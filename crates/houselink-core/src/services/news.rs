use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::models::{Envelope, News, NewsDraft, NewsType, NewsTypeDraft, Page};

use super::fetch_page;

#[derive(Debug, Clone)]
pub struct NewsService {
    api: ApiClient,
}

impl NewsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, news_type_id: Option<&str>, page: u32, per_page: u32) -> Result<Page<News>> {
        let params = news_type_id
            .map(|id| vec![("newsTypeId", id.to_string())])
            .unwrap_or_default();
        fetch_page(&self.api, "/news", params, page, per_page).await
    }

    pub async fn get(&self, id: &str) -> Result<News> {
        let response: Envelope<News> = self
            .api
            .get(&format!("/news/{}", id))
            .await
            .with_context(|| format!("Failed to fetch news {}", id))?;
        Ok(response.data)
    }

    pub async fn create(&self, draft: &NewsDraft) -> Result<News> {
        let response: Envelope<News> = self
            .api
            .post("/news", draft)
            .await
            .context("Failed to create news")?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, draft: &NewsDraft) -> Result<News> {
        let response: Envelope<News> = self
            .api
            .put(&format!("/news/{}", id), draft)
            .await
            .with_context(|| format!("Failed to update news {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/news/{}", id))
            .await
            .with_context(|| format!("Failed to delete news {}", id))
    }
}

/// News categories. The list is small and returned unpaginated.
#[derive(Debug, Clone)]
pub struct NewsTypeService {
    api: ApiClient,
}

impl NewsTypeService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<NewsType>> {
        let response: Envelope<Vec<NewsType>> = self
            .api
            .get("/news-types")
            .await
            .context("Failed to list news types")?;
        Ok(response.data)
    }

    pub async fn create(&self, name: &str) -> Result<NewsType> {
        let draft = NewsTypeDraft { name: name.to_string() };
        let response: Envelope<NewsType> = self
            .api
            .post("/news-types", &draft)
            .await
            .context("Failed to create news type")?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, name: &str) -> Result<NewsType> {
        let draft = NewsTypeDraft { name: name.to_string() };
        let response: Envelope<NewsType> = self
            .api
            .put(&format!("/news-types/{}", id), &draft)
            .await
            .with_context(|| format!("Failed to update news type {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/news-types/{}", id))
            .await
            .with_context(|| format!("Failed to delete news type {}", id))
    }
}
