use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;

use crate::error::ServiceError;

use super::{ImageLookup, truncate_body};

const SERVICE: &str = "Pexels";
pub const DEFAULT_BASE_URL: &str = "https://api.pexels.com";
pub const DEFAULT_PER_PAGE: u32 = 5;

#[derive(Debug, Clone)]
pub struct PexelsImageLookup {
    api_key: String,
    base_url: String,
    per_page: u32,
    http: Client,
}

impl PexelsImageLookup {
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Pexels")?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }
}

#[derive(Debug, Deserialize)]
struct PxSource {
    medium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PxPhoto {
    src: Option<PxSource>,
}

#[derive(Debug, Deserialize)]
struct PxSearchResponse {
    #[serde(default)]
    photos: Vec<PxPhoto>,
}

/// Medium-size URLs of every photo that has one.
fn parse_photo_urls(body: &str) -> Result<Vec<String>, ServiceError> {
    let parsed: PxSearchResponse = serde_json::from_str(body).map_err(|e| ServiceError::Decode {
        service: SERVICE,
        message: e.to_string(),
    })?;

    Ok(parsed
        .photos
        .into_iter()
        .filter_map(|photo| photo.src.and_then(|src| src.medium))
        .collect())
}

#[async_trait]
impl ImageLookup for PexelsImageLookup {
    async fn search(&self, query: &str) -> Result<Vec<String>, ServiceError> {
        let url = format!("{}/v1/search", self.base_url);
        let per_page = self.per_page.to_string();

        let res = self
            .http
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .send()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ServiceError::Transport { service: SERVICE, source })?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let urls = parse_photo_urls(&body)?;
        tracing::debug!(query, found = urls.len(), "Pexels search finished");
        Ok(urls)
    }
}
