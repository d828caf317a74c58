use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::ApiClient;
use crate::models::{Bank, BankDraft, BankRequest, BankRequestDraft, BankRequestStatus, Envelope, Page};

use super::fetch_page;

#[derive(Debug, Clone)]
pub struct BankService {
    api: ApiClient,
}

impl BankService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: u32, per_page: u32) -> Result<Page<Bank>> {
        fetch_page(&self.api, "/banks", Vec::new(), page, per_page).await
    }

    pub async fn get(&self, id: &str) -> Result<Bank> {
        let response: Envelope<Bank> = self
            .api
            .get(&format!("/banks/{}", id))
            .await
            .with_context(|| format!("Failed to fetch bank {}", id))?;
        Ok(response.data)
    }

    pub async fn create(&self, draft: &BankDraft) -> Result<Bank> {
        let response: Envelope<Bank> = self
            .api
            .post("/banks", draft)
            .await
            .context("Failed to create bank")?;
        Ok(response.data)
    }

    pub async fn update(&self, id: &str, draft: &BankDraft) -> Result<Bank> {
        let response: Envelope<Bank> = self
            .api
            .put(&format!("/banks/{}", id), draft)
            .await
            .with_context(|| format!("Failed to update bank {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/banks/{}", id))
            .await
            .with_context(|| format!("Failed to delete bank {}", id))
    }
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: BankRequestStatus,
}

/// Financing requests users send to partner banks
#[derive(Debug, Clone)]
pub struct BankRequestService {
    api: ApiClient,
}

impl BankRequestService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, status: Option<BankRequestStatus>, page: u32, per_page: u32) -> Result<Page<BankRequest>> {
        let params = status
            .map(|s| vec![("status", s.as_str().to_string())])
            .unwrap_or_default();
        fetch_page(&self.api, "/bank-requests", params, page, per_page).await
    }

    pub async fn get(&self, id: &str) -> Result<BankRequest> {
        let response: Envelope<BankRequest> = self
            .api
            .get(&format!("/bank-requests/{}", id))
            .await
            .with_context(|| format!("Failed to fetch bank request {}", id))?;
        Ok(response.data)
    }

    pub async fn create(&self, draft: &BankRequestDraft) -> Result<BankRequest> {
        let response: Envelope<BankRequest> = self
            .api
            .post("/bank-requests", draft)
            .await
            .context("Failed to create bank request")?;
        Ok(response.data)
    }

    pub async fn set_status(&self, id: &str, status: BankRequestStatus) -> Result<BankRequest> {
        let response: Envelope<BankRequest> = self
            .api
            .patch(&format!("/bank-requests/{}/status", id), &StatusUpdate { status })
            .await
            .with_context(|| format!("Failed to set status of bank request {}", id))?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("/bank-requests/{}", id))
            .await
            .with_context(|| format!("Failed to delete bank request {}", id))
    }
}
