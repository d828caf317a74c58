//! Per-resource wrappers over `ApiClient`.
//!
//! Each service holds a clone of the client (cheap: the connection pool is
//! shared), calls one family of endpoints and unwraps the backend's response
//! envelopes into plain models and `Page`s.

pub mod auth;
pub mod banks;
pub mod locations;
pub mod news;
pub mod properties;
pub mod settings;
pub mod uploads;
pub mod users;

pub use auth::{AuthService, Credentials, LoginResponse};
pub use banks::{BankRequestService, BankService};
pub use locations::LocationService;
pub use news::{NewsService, NewsTypeService};
pub use properties::PropertyService;
pub use settings::SettingsService;
pub use uploads::UploadService;
pub use users::UserService;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::models::{ListEnvelope, Page};

/// Fetch one page of a list endpoint
async fn fetch_page<T: DeserializeOwned>(
    api: &ApiClient,
    path: &str,
    mut params: Vec<(&'static str, String)>,
    page: u32,
    per_page: u32,
) -> Result<Page<T>> {
    params.push(("page", page.to_string()));
    params.push(("perPage", per_page.to_string()));
    let envelope: ListEnvelope<T> = api
        .get_with_query(path, &params)
        .await
        .with_context(|| format!("Failed to list {}", path))?;
    Ok(envelope.into_page(page, per_page))
}
