use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::language_utils::to_provider_code;
use crate::providers::{Provider, call_client, settle, truncate_text, DEFAULT_TIMEOUT};

/// Public instances tried in order when no mirrors are configured
pub const DEFAULT_MIRRORS: &[&str] = &[
    "https://libretranslate.de",
    "https://translate.argosopentech.com",
    "https://translate.terraprint.co",
];

/// LibreTranslate translate request
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest<'a> {
    /// Text to translate
    pub q: &'a str,
    /// Source language code
    pub source: &'a str,
    /// Target language code
    pub target: &'a str,
    /// Input format, always plain text here
    pub format: &'a str,
    /// API key for instances that require one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<&'a str>,
}

/// LibreTranslate translate response
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    /// Translated text, absent on error
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
    /// Error message, present on error
    #[serde(default)]
    pub error: Option<String>,
}

/// LibreTranslate adapter over a list of mirrors
///
/// Mirrors speak the same protocol and are tried sequentially; the first one
/// that answers 200 with a `translatedText` field wins.
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    /// Base URLs, in the order they are tried
    mirrors: Vec<String>,
    /// Optional API key sent with every request
    api_key: Option<String>,
    /// Bound on each mirror attempt
    timeout: Duration,
}

impl LibreTranslate {
    /// Create an adapter over the default public mirrors
    pub fn new() -> Self {
        Self::with_mirrors(DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect())
    }

    /// Create an adapter over an explicit mirror list
    pub fn with_mirrors(mirrors: Vec<String>) -> Self {
        Self {
            mirrors,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.is_empty() { None } else { Some(api_key) };
        self
    }

    /// Set the per-mirror timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Mirrors in the order they are tried
    pub fn mirrors(&self) -> &[String] {
        &self.mirrors
    }

    async fn request(&self, text: &str, target_language: &str, source_language: &str) -> Result<String, ProviderError> {
        let client = call_client(self.timeout)?;
        let source = to_provider_code(source_language);
        let target = to_provider_code(target_language);
        let body = LibreTranslateRequest {
            q: text,
            source: &source,
            target: &target,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        for mirror in &self.mirrors {
            match self.request_mirror(&client, mirror, &body).await {
                Ok(translated) => {
                    debug!("LibreTranslate: {} answered", mirror);
                    return Ok(translated);
                }
                Err(e) => warn!("LibreTranslate mirror {} failed: {}", mirror, e),
            }
        }

        Err(ProviderError::AllMirrorsFailed(self.mirrors.len()))
    }

    async fn request_mirror(
        &self,
        client: &Client,
        mirror: &str,
        body: &LibreTranslateRequest<'_>,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/translate", mirror.trim_end_matches('/'));
        let response = client.post(&url).json(body).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate_text(&message, 200),
            });
        }

        let parsed: LibreTranslateResponse = response.json().await?;
        match parsed.translated_text {
            Some(translated) if !translated.is_empty() => Ok(translated),
            Some(_) => Err(ProviderError::EmptyTranslation),
            None => Err(ProviderError::ParseError(
                parsed.error.unwrap_or_else(|| "missing translatedText".to_string()),
            )),
        }
    }
}

impl Default for LibreTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> Option<String> {
        if text.is_empty() {
            return Some(String::new());
        }
        settle(self.name(), self.request(text, target_language, source_language).await)
    }

    fn name(&self) -> &str {
        "libretranslate"
    }
}
