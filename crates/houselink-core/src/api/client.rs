//! API client for communicating with the houselink REST backend.
//!
//! `ApiClient` owns request shaping only: URL building, bearer
//! authentication, interceptors and status checking. Resource-specific
//! calls and response reshaping live in `crate::services`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, multipart, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow uploads while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Hook applied to every outgoing request after authentication headers.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder;
}

/// Sends the user's preferred language so backend messages come back localized.
#[derive(Debug, Clone)]
pub struct AcceptLanguage(pub String);

impl RequestInterceptor for AcceptLanguage {
    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(header::ACCEPT_LANGUAGE, self.0.as_str())
    }
}

/// API client for the marketplace backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client for the given backend base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            interceptors: Vec::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
            interceptors: self.interceptors.clone(),
        }
    }

    /// Register an interceptor that runs on every request
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json")
            .headers(self.auth_headers()?);
        Ok(self
            .interceptors
            .iter()
            .fold(builder, |builder, interceptor| interceptor.intercept(builder)))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {}", what))?;
        let response = Self::check_response(response).await?;
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body for {}", what))?;
        debug!(request = what, bytes = text.len(), "Response received");
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON response for {}", what))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.send_json(request, &format!("GET {}", path)).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send_json(request, &format!("GET {}", path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send_json(request, &format!("POST {}", path)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send_json(request, &format!("PUT {}", path)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.send_json(request, &format!("PATCH {}", path)).await
    }

    /// DELETE a resource; the response body, if any, is ignored
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, path)?
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE {}", path))?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// POST a single file as `multipart/form-data` under the `file` field
    pub async fn post_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<T> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .with_context(|| format!("Invalid MIME type: {}", mime))?;
        let form = multipart::Form::new().part("file", part);
        let request = self.request(Method::POST, path)?.multipart(form);
        self.send_json(request, &format!("POST {}", path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("https://api.example.com/v1/").unwrap();
        assert_eq!(api.base_url(), "https://api.example.com/v1");
        assert_eq!(api.url("/properties"), "https://api.example.com/v1/properties");
    }

    #[test]
    fn test_with_token_shares_settings() {
        let api = ApiClient::new("http://localhost:3000")
            .unwrap()
            .with_interceptor(AcceptLanguage("lo".to_string()));
        assert!(!api.is_authenticated());

        let authed = api.with_token("abc".to_string());
        assert!(authed.is_authenticated());
        assert_eq!(authed.base_url(), "http://localhost:3000");
        assert_eq!(authed.interceptors.len(), 1);
    }

    #[test]
    fn test_auth_headers() {
        let mut api = ApiClient::new("http://localhost").unwrap();
        assert!(api.auth_headers().unwrap().is_empty());

        api.set_token("tok".to_string());
        let headers = api.auth_headers().unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer tok");

        api.clear_token();
        assert!(api.auth_headers().unwrap().is_empty());
    }
}
