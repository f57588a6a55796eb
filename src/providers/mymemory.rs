use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::language_utils::to_provider_code;
use crate::providers::{Provider, call_client, settle, truncate_text, DEFAULT_TIMEOUT};

/// Public endpoint of the MyMemory translation API
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Status reported in the response body on success
const STATUS_OK: u16 = 200;

/// Messages MyMemory returns in `translatedText` in place of a translation.
/// Matched case-insensitively against the start of the text.
const SENTINEL_PREFIXES: &[&str] = &[
    "NO VALID LANGUAGE PAIR",
    "INVALID LANGUAGE PAIR SPECIFIED",
    "PLEASE SELECT TWO DISTINCT LANGUAGES",
    "MYMEMORY WARNING:",
    "QUERY LENGTH LIMIT EXCEEDED",
    "NO QUERY SPECIFIED",
];

/// Tails of the templated `'<code>' IS AN INVALID ... LANGUAGE` message
const INVALID_LANGUAGE_TAILS: &[&str] = &[" IS AN INVALID SOURCE LANGUAGE", " IS AN INVALID TARGET LANGUAGE"];

/// MyMemory response payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    /// Translation data, may be null on errors
    #[serde(default)]
    pub response_data: Option<MyMemoryData>,
    /// Status code as number or numeric string
    #[serde(default)]
    pub response_status: Value,
    /// Human readable details on failure
    #[serde(default)]
    pub response_details: Option<String>,
}

/// Translation data inside a MyMemory response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    /// Translated text
    #[serde(default)]
    pub translated_text: Option<String>,
}

impl MyMemoryResponse {
    /// Status embedded in the body; the HTTP status is not authoritative here
    pub fn status(&self) -> Option<u16> {
        match &self.response_status {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Whether `text` is one of MyMemory's error messages rather than a translation
pub fn is_sentinel(text: &str) -> bool {
    let upper = text.trim().to_uppercase();
    SENTINEL_PREFIXES.iter().any(|prefix| upper.starts_with(prefix)) || is_invalid_language_message(&upper)
}

/// `'XX' IS AN INVALID TARGET LANGUAGE . EXAMPLE: ...`
fn is_invalid_language_message(upper: &str) -> bool {
    let Some(rest) = upper.strip_prefix('\'') else {
        return false;
    };
    let Some((code, tail)) = rest.split_once('\'') else {
        return false;
    };
    !code.is_empty()
        && !code.contains(char::is_whitespace)
        && INVALID_LANGUAGE_TAILS.iter().any(|expected| tail.starts_with(expected))
}

/// MyMemory key-value GET adapter
#[derive(Debug, Clone)]
pub struct MyMemory {
    /// Endpoint URL
    endpoint: String,
    /// Contact email, raises the anonymous daily quota
    email: Option<String>,
    /// Bound on the single network attempt
    timeout: Duration,
}

impl MyMemory {
    /// Create an adapter against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create an adapter against a compatible endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            email: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the contact email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.email = if email.is_empty() { None } else { Some(email) };
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request(&self, text: &str, target_language: &str, source_language: &str) -> Result<String, ProviderError> {
        let client = call_client(self.timeout)?;
        let langpair = format!("{}|{}", to_provider_code(source_language), to_provider_code(target_language));

        debug!("MyMemory: '{}' ({})", truncate_text(text, 30), langpair);

        let mut query = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.email {
            query.push(("de", email.as_str()));
        }

        let response = client.get(&self.endpoint).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate_text(&message, 200),
            });
        }

        let parsed: MyMemoryResponse = response.json().await?;
        interpret(parsed)
    }
}

/// Turn a decoded response into a translation or the reason there is none
pub fn interpret(response: MyMemoryResponse) -> Result<String, ProviderError> {
    let status = response.status();
    if status != Some(STATUS_OK) {
        return Err(ProviderError::ApiError {
            status_code: status.unwrap_or(0),
            message: response.response_details.unwrap_or_default(),
        });
    }

    let translated = response
        .response_data
        .and_then(|data| data.translated_text)
        .ok_or_else(|| ProviderError::ParseError("missing responseData.translatedText".to_string()))?;

    if translated.trim().is_empty() {
        return Err(ProviderError::EmptyTranslation);
    }
    if is_sentinel(&translated) {
        return Err(ProviderError::Rejected(translated));
    }
    Ok(translated)
}

impl Default for MyMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MyMemory {
    async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> Option<String> {
        if text.is_empty() {
            return Some(String::new());
        }
        settle(self.name(), self.request(text, target_language, source_language).await)
    }

    fn name(&self) -> &str {
        "mymemory"
    }
}
