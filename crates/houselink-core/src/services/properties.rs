use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::filters::PropertyFilter;
use crate::models::{Envelope, ListEnvelope, Page, Property, PropertyDraft, PropertyStatus};

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: PropertyStatus,
}

#[derive(Debug, Clone)]
pub struct PropertyService {
    api: ApiClient,
}

impl PropertyService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &PropertyFilter) -> Result<Page<Property>> {
        let params = filter.to_api_params();
        debug!(query = %filter.to_query(), "Listing properties");
        let envelope: ListEnvelope<Property> = self
            .api
            .get_with_query("/properties", &params)
            .await
            .context("Failed to list properties")?;
        Ok(envelope.into_page(filter.page, filter.per_page))
    }

    pub async fn get(&self, id: &str) -> Result<Property> {
        let response: Envelope<Property> = self
            .api
            .get(&format!("/properties/{}", id))
            .await
            .with_context(|| format!("Failed to fetch property {}", id))?;
        Ok(response.data)
    }

    /// Validate locally, then create. Validation failures never reach the backend.
    pub async fn create(&self, draft: &PropertyDraft) -> Result<Property> {
        draft.validate()?;
        let response: Envelope<Property> = self
            .api
            .post("/properties", draft)
            .await
            .context("Failed to create property")?;
        info!(id = %response.data.id, "Property created");
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, draft: &PropertyDraft) -> Result<Property> {
        draft.validate()?;
        let response: Envelope<Property> = self
            .api
            .put(&format!("/properties/{}", id), draft)
            .await
            .with_context(|| format!("Failed to update property {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/properties/{}", id))
            .await
            .with_context(|| format!("Failed to delete property {}", id))
    }

    /// Moderation: approve, reject, or mark sold/rented
    pub async fn set_status(&self, id: &str, status: PropertyStatus) -> Result<Property> {
        let response: Envelope<Property> = self
            .api
            .patch(&format!("/properties/{}/status", id), &StatusUpdate { status })
            .await
            .with_context(|| format!("Failed to set status of property {}", id))?;
        info!(id, status = %status, "Property status changed");
        Ok(response.data)
    }
}
