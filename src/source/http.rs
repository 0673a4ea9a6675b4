//! HTTP page source for the artworks API.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::types::{Artwork, PageData};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use super::PageSource;

/// Response body of `GET /artworks?page=N`.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: Vec<Artwork>,
    pagination: ApiPagination,
}

#[derive(Debug, Deserialize)]
struct ApiPagination {
    total: u64,
    limit: u32,
}

/// Decode a page response body into records plus pagination metadata.
pub fn decode_response(body: &[u8]) -> Result<PageData<Artwork>> {
    let payload: ApiResponse = serde_json::from_slice(body)?;
    Ok(PageData {
        records: payload.data,
        total_records: payload.pagination.total,
        page_size: payload.pagination.limit,
    })
}

/// Fetches artwork pages over HTTP.
pub struct HttpPageSource {
    client: Client,
    config: CatalogConfig,
}

impl HttpPageSource {
    /// Build a source with a client honoring the configured timeout.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| CatalogError::Config(format!("invalid base_url {}: {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// URL requested for `page`.
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let mut params = vec![("page", page.to_string())];
        if let Some(limit) = self.config.page_size {
            params.push(("limit", limit.to_string()));
        }
        if !self.config.fields.is_empty() {
            params.push(("fields", self.config.fields.join(",")));
        }

        Url::parse_with_params(&self.config.base_url, &params)
            .map_err(|e| CatalogError::Config(e.to_string()))
    }
}

impl PageSource for HttpPageSource {
    type Record = Artwork;

    async fn fetch_page(&self, page: u32) -> Result<PageData<Artwork>> {
        let url = self.page_url(page)?;
        debug!(page, %url, "requesting page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::fetch(page, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(page, %status, "page request was not successful");
            return Err(CatalogError::fetch(page, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::fetch(page, e))?;

        decode_response(&body).map_err(|e| CatalogError::fetch(page, e))
    }
}
