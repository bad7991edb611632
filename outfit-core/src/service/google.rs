use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::ServiceError;

use super::{Translator, truncate_body};

const SERVICE: &str = "Google Translate";
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Client for the public `translate_a/single` endpoint. Source language is
/// always auto-detected.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    base_url: String,
    http: Client,
}

impl GoogleTranslator {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for Google Translate")?;

        Ok(Self { base_url: DEFAULT_BASE_URL.to_string(), http })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

fn decode_error(message: impl Into<String>) -> ServiceError {
    ServiceError::Decode { service: SERVICE, message: message.into() }
}

/// The endpoint answers with nested arrays; the first element lists
/// `[translated, original, ...]` segments, one per sentence.
fn parse_translation(body: &str) -> Result<String, ServiceError> {
    let parsed: Value = serde_json::from_str(body).map_err(|e| decode_error(e.to_string()))?;

    let segments = parsed
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| decode_error("response has no translation segments"))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(decode_error("response contained an empty translation"));
    }

    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ServiceError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
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

        parse_translation(&body)
    }
}
