use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::language_utils::to_provider_code;
use crate::providers::{Provider, call_client, settle, truncate_text, DEFAULT_TIMEOUT};

/// Public endpoint of the unauthenticated bulk-translate API
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client mode understood by the endpoint without an API key
const CLIENT_MODE: &str = "gtx";

/// Google bulk-translate adapter
///
/// One GET per call. The response is a nested array whose first element holds
/// the translated segments; each segment's first element is a piece of the
/// translation and the pieces are concatenated in order.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// Endpoint URL, query parameters are appended per request
    endpoint: String,
    /// Bound on the single network attempt
    timeout: Duration,
}

impl GoogleTranslate {
    /// Create an adapter against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create an adapter against a compatible endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint this adapter calls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, text: &str, target_language: &str, source_language: &str) -> Result<String, ProviderError> {
        let client = call_client(self.timeout)?;
        let source = to_provider_code(source_language);
        let target = to_provider_code(target_language);

        debug!("Google: '{}' ({} -> {})", truncate_text(text, 30), source, target);

        let response = client
            .get(&self.endpoint)
            .query(&[
                ("client", CLIENT_MODE),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate_text(&message, 200),
            });
        }

        let body: Value = response.json().await?;
        let translated = parse_segments(&body)?;
        if translated.is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }
        Ok(translated)
    }
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> Option<String> {
        if text.is_empty() {
            return Some(String::new());
        }
        settle(self.name(), self.request(text, target_language, source_language).await)
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Concatenate the translated segments of a bulk-translate response
pub fn parse_segments(body: &Value) -> Result<String, ProviderError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("missing segment array".to_string()))?;

    if segments.is_empty() {
        return Err(ProviderError::ParseError("empty segment array".to_string()));
    }

    let mut translated = String::new();
    for segment in segments {
        // Trailing segments may carry transliteration with a null first slot
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(piece);
        }
    }
    Ok(translated)
}
