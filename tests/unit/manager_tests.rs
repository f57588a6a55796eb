/*!
 * Tests for the translation manager fallback chain
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use async_trait::async_trait;
use transcade::app_config::{ProviderConfig, ProviderKind, TranslationConfig};
use transcade::errors::ConfigError;
use transcade::providers::{MockProvider, Provider};
use transcade::translation::{
    Description, DescriptionSource, StaticDescription, TranslationManager, TranslationRequest,
};

use crate::common::manager_with;

#[tokio::test]
async fn test_translate_withSameLanguages_shouldReturnTextWithoutCalls() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    for lang in ["en", "fr", "zh-CN"] {
        let result = manager.translate("Sales Management", lang, lang).await;
        assert_eq!(result, "Sales Management");
    }

    assert_eq!(provider.call_count(), 0);
    assert!(manager.cache().is_empty());
}

#[tokio::test]
async fn test_translate_withEmptyText_shouldReturnEmptyWithoutCalls() {
    let provider = MockProvider::fixed("should not appear");
    let manager = manager_with(&[&provider]);

    assert_eq!(manager.translate("", "fr", "en").await, "");
    assert_eq!(manager.translate("   \n\t", "fr", "en").await, "");

    assert_eq!(provider.call_count(), 0);
    assert_eq!(manager.cache().stats().misses, 0);
}

#[tokio::test]
async fn test_translate_withFirstProviderSucceeding_shouldNotCallOthers() {
    let first = MockProvider::fixed("x").named("p1");
    let second = MockProvider::working().named("p2");
    let third = MockProvider::working().named("p3");
    let manager = manager_with(&[&first, &second, &third]);

    let result = manager.translate("Hello", "fr", "en").await;

    assert_eq!(result, "x");
    assert_eq!(first.call_count(), 1);
    assert_eq!(second.call_count(), 0);
    assert_eq!(third.call_count(), 0);
}

#[tokio::test]
async fn test_translate_withFirstProviderFailing_shouldFallBackToSecond() {
    let first = MockProvider::failing();
    let second = MockProvider::fixed("y");
    let third = MockProvider::working();
    let manager = manager_with(&[&first, &second, &third]);

    let result = manager.translate("Hello", "fr", "en").await;

    assert_eq!(result, "y");
    assert_eq!(first.call_count(), 1);
    assert_eq!(second.call_count(), 1);
    assert_eq!(third.call_count(), 0);
}

#[tokio::test]
async fn test_translate_withAllProvidersFailing_shouldReturnSourceText() {
    let providers = [MockProvider::failing(), MockProvider::failing(), MockProvider::failing()];
    let manager = manager_with(&[&providers[0], &providers[1], &providers[2]]);

    let result = manager.translate("Sales Management", "fr", "en").await;

    assert_eq!(result, "Sales Management");
    for provider in &providers {
        assert_eq!(provider.call_count(), 1);
    }
}

#[tokio::test]
async fn test_translate_afterTotalFailure_shouldRetryAllProviders() {
    let first = MockProvider::failing();
    let second = MockProvider::failing();
    let manager = manager_with(&[&first, &second]);

    manager.translate("Sales Management", "fr", "en").await;
    assert!(manager.cache().is_empty());

    let result = manager.translate("Sales Management", "fr", "en").await;

    assert_eq!(result, "Sales Management");
    assert_eq!(first.call_count(), 2);
    assert_eq!(second.call_count(), 2);
}

#[tokio::test]
async fn test_translate_afterProviderRecovers_shouldReturnTranslation() {
    let flaky = MockProvider::scripted(vec![None, Some("Gestion des ventes".to_string())]);
    let manager = manager_with(&[&flaky]);

    assert_eq!(manager.translate("Sales Management", "fr", "en").await, "Sales Management");
    assert_eq!(manager.translate("Sales Management", "fr", "en").await, "Gestion des ventes");
    assert_eq!(flaky.call_count(), 2);
}

#[tokio::test]
async fn test_translate_afterSuccess_shouldServeFromCache() {
    let first = MockProvider::failing();
    let second = MockProvider::fixed("Gestion des ventes");
    let manager = manager_with(&[&first, &second]);

    let initial = manager.translate("Sales Management", "fr", "en").await;
    let repeated = manager.translate("Sales Management", "fr", "en").await;

    assert_eq!(initial, "Gestion des ventes");
    assert_eq!(repeated, "Gestion des ventes");
    assert_eq!(first.call_count(), 1);
    assert_eq!(second.call_count(), 1);

    let stats = manager.cache().stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 1);
}

#[tokio::test]
async fn test_translate_withAnyFieldChanged_shouldMissCache() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    manager.translate("Hello", "fr", "en").await;
    manager.translate("Hello", "fr", "en").await;
    assert_eq!(provider.call_count(), 1);

    manager.translate("Hello ", "fr", "en").await;
    manager.translate("Hello", "de", "en").await;
    manager.translate("Hello", "fr", "es").await;

    assert_eq!(provider.call_count(), 4);
    assert_eq!(manager.cache().len(), 4);
}

#[tokio::test]
async fn test_translate_shouldPassArgumentsInProviderOrder() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    let result = manager.translate("Hello", "fr", "en").await;

    assert_eq!(result, "[fr] Hello");
    let requests = provider.requests();
    assert_eq!(requests, vec![TranslationRequest::new("Hello", "en", "fr")]);
}

#[tokio::test]
async fn test_translateDefault_shouldAssumeEnglishSource() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    manager.translate_default("Hello", "ja").await;
    assert_eq!(manager.translate_default("Hello", "en").await, "Hello");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source_language(), "en");
}

#[tokio::test]
async fn test_translate_withEmptyTranslation_shouldReturnAndCacheIt() {
    // An adapter that answers present("") is trusted like any other answer
    let provider = MockProvider::fixed("");
    let manager = manager_with(&[&provider]);

    assert_eq!(manager.translate("...", "fr", "en").await, "");
    assert_eq!(manager.translate("...", "fr", "en").await, "");
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_translate_withFailures_shouldPauseBetweenProvidersOnly() {
    let providers = [MockProvider::failing(), MockProvider::failing(), MockProvider::failing()];
    let manager = manager_with(&[&providers[0], &providers[1], &providers[2]])
        .with_pause(Duration::from_millis(40));

    let started = Instant::now();
    manager.translate("Hello", "fr", "en").await;

    // Two pauses: after the first and second providers, none after the last
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn test_translate_withSingleFailingProvider_shouldNotPause() {
    let provider = MockProvider::failing();
    let manager = manager_with(&[&provider]).with_pause(Duration::from_secs(5));

    let started = Instant::now();
    manager.translate("Hello", "fr", "en").await;

    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_translate_withSlowFirstProvider_shouldAwaitItAndSkipOthers() {
    let slow = MockProvider::slow(60);
    let backup = MockProvider::fixed("backup");
    let manager = manager_with(&[&slow, &backup]);

    let started = Instant::now();
    let result = manager.translate("Hello", "fr", "en").await;

    assert_eq!(result, "[fr] Hello");
    assert!(started.elapsed() >= Duration::from_millis(60));
    assert_eq!(slow.call_count(), 1);
    assert_eq!(backup.call_count(), 0);
}

#[tokio::test]
async fn test_translate_withConcurrentCallers_shouldShareCache() {
    let provider = MockProvider::working();
    let manager = Arc::new(manager_with(&[&provider]));

    let mut handles = Vec::new();
    for i in 0..8 {
        let manager = Arc::clone(&manager);
        handles.push(tokio::spawn(async move {
            manager.translate(&format!("text {}", i % 4), "fr", "en").await
        }));
    }

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.starts_with("[fr] text "));
    }

    assert_eq!(manager.cache().len(), 4);
    // Duplicate in-flight requests may both reach the provider
    assert!(provider.call_count() >= 4 && provider.call_count() <= 8);
}

#[tokio::test]
async fn test_translateDescription_withMissingDescription_shouldReturnEmpty() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    assert_eq!(manager.translate_description(None, "fr").await, "");

    let description = Description::new("Sales Management", "en");
    assert_eq!(
        manager.translate_description(Some(description), "fr").await,
        "[fr] Sales Management"
    );
    assert_eq!(provider.call_count(), 1);
}

struct BrokenSource;

#[async_trait]
impl DescriptionSource for BrokenSource {
    async fn fetch(&self) -> anyhow::Result<Option<Description>> {
        Err(anyhow!("metadata service unavailable"))
    }
}

#[tokio::test]
async fn test_translateFrom_withFailingSource_shouldReturnEmpty() {
    let provider = MockProvider::working();
    let manager = manager_with(&[&provider]);

    assert_eq!(manager.translate_from(&BrokenSource, "fr").await, "");
    assert_eq!(manager.translate_from(&StaticDescription::missing(), "fr").await, "");
    assert_eq!(
        manager
            .translate_from(&StaticDescription::new("Gestión de ventas", "es"), "en")
            .await,
        "[en] Gestión de ventas"
    );
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_fromConfig_withDefaults_shouldBuildChainInOrder() {
    let manager = TranslationManager::from_config(&TranslationConfig::default()).unwrap();
    assert_eq!(manager.provider_names(), vec!["google", "libretranslate", "mymemory"]);
    assert!(manager.cache().is_enabled());
}

#[test]
fn test_fromConfig_withDisabledEntries_shouldSkipThem() {
    let mut config = TranslationConfig::default();
    config.providers[0].enabled = false;
    config.providers.swap(1, 2);

    let manager = TranslationManager::from_config(&config).unwrap();
    assert_eq!(manager.provider_names(), vec!["mymemory", "libretranslate"]);
}

#[test]
fn test_fromConfig_withNoEnabledProviders_shouldFail() {
    let config = TranslationConfig {
        providers: vec![ProviderConfig {
            enabled: false,
            ..ProviderConfig::new(ProviderKind::Google)
        }],
        ..TranslationConfig::default()
    };

    let result = TranslationManager::from_config(&config);
    assert!(matches!(result, Err(ConfigError::NoProviders)));
}

#[test]
fn test_fromConfig_withZeroTimeout_shouldFail() {
    let mut config = TranslationConfig::default();
    config.common.timeout_secs = 0;

    let result = TranslationManager::from_config(&config);
    assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
}

#[test]
fn test_mockProvider_name_shouldBeUsedInChain() {
    let manager = manager_with(&[&MockProvider::failing().named("backup")]);
    assert_eq!(manager.provider_names(), vec!["backup"]);
    assert_eq!(MockProvider::working().name(), "mock-working");
}
