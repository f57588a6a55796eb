/*!
 * Provider implementations for different translation services.
 *
 * This module contains adapters for the free translation endpoints the
 * pipeline falls back across:
 * - Google: bulk-translate endpoint returning nested segment arrays
 * - LibreTranslate: the same JSON protocol served by several mirrors
 * - MyMemory: key-value GET endpoint with an in-body status code
 *
 * Every adapter reports failure as `None`. Transport, protocol and semantic
 * failures are logged here and never reach the caller as errors.
 */

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Default bound on a single network attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Common trait for all translation providers
///
/// Implementations own their wire format and any provider-specific retry
/// logic. A `Some` result is a translation, `None` means this provider could
/// not produce one.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate `text` from `source_language` into `target_language`
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: &str,
    ) -> Option<String>;

    /// Short identifier used in log lines
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("provider")
    }
}

/// Build a client scoped to a single provider call
///
/// Clients are not kept between calls, so no connection pool outlives the
/// translation that opened it.
pub(crate) fn call_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("transcade/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::RequestFailed(format!("Failed to build HTTP client: {}", e)))
}

/// Collapse an adapter result into the public present/absent contract
pub(crate) fn settle(provider: &str, result: Result<String, ProviderError>) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("{} could not translate: {}", provider, e);
            None
        }
    }
}

/// Truncate text to a maximum number of characters for log output
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

pub mod google;
pub mod libretranslate;
pub mod mock;
pub mod mymemory;

pub use google::GoogleTranslate;
pub use libretranslate::LibreTranslate;
pub use mock::MockProvider;
pub use mymemory::MyMemory;
