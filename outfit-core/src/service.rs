use crate::{
    Config,
    error::ServiceError,
    service::{google::GoogleTranslator, pexels::PexelsImageLookup},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc, time::Duration};

pub mod google;
pub mod pexels;

/// External collaborators the recommendation surface talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Pexels,
    GoogleTranslate,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Pexels => "pexels",
            ServiceId::GoogleTranslate => "google-translate",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Pexels, ServiceId::GoogleTranslate]
    }

    /// Whether the service refuses requests without an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, ServiceId::Pexels)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "pexels" => Ok(ServiceId::Pexels),
            "google-translate" | "google" => Ok(ServiceId::GoogleTranslate),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: pexels, google-translate."
            )),
        }
    }
}

/// Looks up pictures for a clothing item.
#[async_trait]
pub trait ImageLookup: Send + Sync + Debug {
    async fn search(&self, query: &str) -> Result<Vec<String>, ServiceError>;
}

/// Translates free text into a target language.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ServiceError>;
}

/// Stand-in used when no image service is configured. Every lookup fails,
/// which enrichment turns into empty lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredImageLookup;

#[async_trait]
impl ImageLookup for UnconfiguredImageLookup {
    async fn search(&self, _query: &str) -> Result<Vec<String>, ServiceError> {
        Err(ServiceError::MissingCredentials(ServiceId::Pexels.as_str()))
    }
}

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.request_timeout_secs())
}

/// Construct the image service from config.
pub fn image_lookup_from_config(config: &Config) -> anyhow::Result<Arc<dyn ImageLookup>> {
    let id = ServiceId::Pexels;
    let api_key = config.service_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service '{id}'.\n\
                 Hint: run `outfit configure {id}` and enter your API key."
        )
    })?;

    let mut lookup = PexelsImageLookup::new(api_key.to_owned(), request_timeout(config))?
        .with_per_page(config.images_per_item());
    if let Some(base_url) = config.service_base_url(id) {
        lookup = lookup.with_base_url(base_url);
    }

    Ok(Arc::new(lookup))
}

/// Like [`image_lookup_from_config`], but degrades to a lookup that always
/// fails instead of refusing to start.
pub fn image_lookup_or_unconfigured(config: &Config) -> Arc<dyn ImageLookup> {
    match image_lookup_from_config(config) {
        Ok(lookup) => lookup,
        Err(err) => {
            tracing::warn!("Image lookup disabled: {err}");
            Arc::new(UnconfiguredImageLookup)
        }
    }
}

/// Construct the translation service from config. No key is needed.
pub fn translator_from_config(config: &Config) -> anyhow::Result<Arc<dyn Translator>> {
    let mut translator = GoogleTranslator::new(request_timeout(config))?;
    if let Some(base_url) = config.service_base_url(ServiceId::GoogleTranslate) {
        translator = translator.with_base_url(base_url);
    }

    Ok(Arc::new(translator))
}

/// Cut long response bodies down for error messages.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
