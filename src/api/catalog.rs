//! Catalog REST client
//!
//! Thin wrapper over the `/movies` resource of the Digitalflix API.
//! One method per verb; no retries, caching or pagination.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CatalogItem, CatalogPatch};

/// Default API root used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Movie not found (404)")]
    NotFound,

    #[error("API returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl CatalogError {
    /// True for a 404 on a single-item request
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound)
    }
}

/// Catalog API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client against the default local API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (config or tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/movies/{}", self.base_url, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "application/json")
    }

    /// Fetch the whole catalog
    pub async fn list(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let response = self.send(self.request(Method::GET, &self.collection_url())).await?;
        Self::parse(response).await
    }

    /// Fetch one item by id
    pub async fn get(&self, id: u64) -> Result<CatalogItem, CatalogError> {
        let response = self.send(self.request(Method::GET, &self.item_url(id))).await?;
        Self::parse(response).await
    }

    /// Create an item; the server assigns the id
    pub async fn create(&self, item: &CatalogItem) -> Result<CatalogItem, CatalogError> {
        // Ids are server-assigned: never send one on create
        let mut body = item.clone();
        body.id = None;

        let request = self
            .request(Method::POST, &self.collection_url())
            .json(&body);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    /// Apply a partial update
    pub async fn update(&self, id: u64, patch: &CatalogPatch) -> Result<CatalogItem, CatalogError> {
        let request = self.request(Method::PUT, &self.item_url(id)).json(patch);
        let response = self.send(request).await?;
        Self::parse(response).await
    }

    /// Delete an item
    pub async fn delete(&self, id: u64) -> Result<(), CatalogError> {
        self.send(self.request(Method::DELETE, &self.item_url(id)))
            .await?;
        Ok(())
    }

    /// Send a request and map non-2xx statuses to errors
    async fn send(&self, request: RequestBuilder) -> Result<Response, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "catalog response");

        match status {
            s if s.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            s => {
                warn!(status = s.as_u16(), "catalog request failed");
                Err(CatalogError::Status(s.as_u16()))
            }
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}
