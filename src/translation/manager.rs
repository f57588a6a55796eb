/*!
 * Translation manager: ordered fallback across providers with a run-scoped cache.
 *
 * `translate` never fails. Providers are tried strictly in order and the first
 * translation wins; when every provider comes back empty-handed the original
 * text is returned and nothing is cached, so the next call retries them all.
 */

use std::time::Duration;

use log::{debug, info, warn};

use crate::app_config::{ProviderConfig, ProviderKind, TranslationConfig};
use crate::errors::ConfigError;
use crate::providers::{GoogleTranslate, LibreTranslate, MyMemory, Provider, truncate_text};
use super::cache::TranslationCache;
use super::request::TranslationRequest;
use super::source::{Description, DescriptionSource};

/// Source language assumed when the caller does not give one
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Default pause after a provider fails, before the next one is tried
pub const DEFAULT_PROVIDER_PAUSE: Duration = Duration::from_millis(500);

/// Fallback chain of translation providers
pub struct TranslationManager {
    /// Providers in priority order; fixed after construction
    providers: Vec<Box<dyn Provider>>,

    /// Successful translations for this manager's lifetime
    cache: TranslationCache,

    /// Courtesy pause between a failed provider and the next
    pause: Duration,
}

impl TranslationManager {
    /// Create a manager over `providers`, tried in the given order
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            cache: TranslationCache::default(),
            pause: DEFAULT_PROVIDER_PAUSE,
        }
    }

    /// Build the provider chain described by a configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ConfigError> {
        config.common.validate()?;
        let timeout = config.common.timeout();
        let providers: Vec<Box<dyn Provider>> = config
            .enabled_providers()
            .map(|provider| build_provider(provider, timeout))
            .collect();

        if providers.is_empty() {
            return Err(ConfigError::NoProviders);
        }

        Ok(Self::new(providers)
            .with_pause(config.common.provider_pause())
            .with_cache(TranslationCache::new(config.common.cache_enabled)))
    }

    /// Set the pause between a failed provider and the next one
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Use an existing cache, e.g. one shared with another manager
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Provider names in fallback order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Translate `text` from `source_language` into `target_language`
    ///
    /// Always returns a string: the translation, `""` for blank input, or
    /// `text` itself when the languages match or no provider could help.
    pub async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> String {
        self.translate_request(&TranslationRequest::new(text, source_language, target_language))
            .await
    }

    /// Translate from the default source language
    pub async fn translate_default(&self, text: &str, target_language: &str) -> String {
        self.translate(text, target_language, DEFAULT_SOURCE_LANGUAGE).await
    }

    /// Translate a prepared request
    pub async fn translate_request(&self, request: &TranslationRequest) -> String {
        if request.is_blank() {
            return String::new();
        }

        if request.is_identity() {
            debug!("Source and target are both '{}', nothing to translate", request.target_language());
            return request.text().to_string();
        }

        let key = request.cache_key();
        if let Some(cached) = self.cache.get_by_key(&key) {
            debug!("Cache hit for '{}' ({} -> {})",
                   truncate_text(request.text(), 30),
                   request.source_language(),
                   request.target_language());
            return cached;
        }

        for (index, provider) in self.providers.iter().enumerate() {
            debug!("Trying {} for '{}'", provider.name(), truncate_text(request.text(), 30));

            let result = provider
                .translate(request.text(), request.target_language(), request.source_language())
                .await;

            if let Some(translated) = result {
                info!("Translated with {} ({} -> {})",
                      provider.name(),
                      request.source_language(),
                      request.target_language());
                self.cache.store_by_key(key, &translated);
                return translated;
            }

            if index + 1 < self.providers.len() && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }

        warn!("No provider could translate '{}' ({} -> {}), keeping the original text",
              truncate_text(request.text(), 30),
              request.source_language(),
              request.target_language());
        request.text().to_string()
    }

    /// Translate a collaborator-supplied description; a missing one yields `""`
    pub async fn translate_description(&self, description: Option<Description>, target_language: &str) -> String {
        match description {
            Some(description) => {
                self.translate(&description.text, target_language, &description.language)
                    .await
            }
            None => String::new(),
        }
    }

    /// Fetch from `source` and translate; a failing source counts as missing
    pub async fn translate_from(&self, source: &dyn DescriptionSource, target_language: &str) -> String {
        let description = match source.fetch().await {
            Ok(description) => description,
            Err(e) => {
                warn!("Description source failed: {}", e);
                None
            }
        };
        self.translate_description(description, target_language).await
    }
}

impl std::fmt::Debug for TranslationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationManager")
            .field("providers", &self.provider_names())
            .field("cache", &self.cache)
            .field("pause", &self.pause)
            .finish()
    }
}

/// Instantiate the adapter for one configuration entry
fn build_provider(config: &ProviderConfig, timeout: Duration) -> Box<dyn Provider> {
    match config.provider_type {
        ProviderKind::Google => Box::new(
            GoogleTranslate::with_endpoint(config.effective_endpoint()).timeout(timeout),
        ),
        ProviderKind::LibreTranslate => Box::new(
            LibreTranslate::with_mirrors(config.effective_mirrors())
                .api_key(config.api_key.clone())
                .timeout(timeout),
        ),
        ProviderKind::MyMemory => Box::new(
            MyMemory::with_endpoint(config.effective_endpoint())
                .email(config.email.clone())
                .timeout(timeout),
        ),
    }
}
