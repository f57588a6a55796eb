use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::errors::ConfigError;
use crate::language_utils::validate_language_code;
use crate::providers::{google, libretranslate, mymemory};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google bulk-translate endpoint
    Google,
    // @provider: LibreTranslate mirrors
    LibreTranslate,
    // @provider: MyMemory
    MyMemory,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google",
            Self::LibreTranslate => "LibreTranslate",
            Self::MyMemory => "MyMemory",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::MyMemory => "mymemory".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

/// Provider configuration entry
///
/// The position of an entry in `TranslationConfig::providers` is its
/// fallback priority.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: ProviderKind,

    // @field: Disabled entries are skipped
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: Service URL (Google, MyMemory)
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Mirror base URLs (LibreTranslate)
    #[serde(default)]
    pub mirrors: Vec<String>,

    // @field: API key (LibreTranslate)
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Contact email (MyMemory)
    #[serde(default = "String::new")]
    pub email: String,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderKind) -> Self {
        let (endpoint, mirrors) = match provider_type {
            ProviderKind::Google => (google::DEFAULT_ENDPOINT.to_string(), Vec::new()),
            ProviderKind::LibreTranslate => (
                String::new(),
                libretranslate::DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            ),
            ProviderKind::MyMemory => (mymemory::DEFAULT_ENDPOINT.to_string(), Vec::new()),
        };

        Self {
            provider_type,
            enabled: true,
            endpoint,
            mirrors,
            api_key: String::new(),
            email: String::new(),
        }
    }

    /// Endpoint with the per-kind default applied
    pub fn effective_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }
        match self.provider_type {
            ProviderKind::Google => google::DEFAULT_ENDPOINT.to_string(),
            ProviderKind::MyMemory => mymemory::DEFAULT_ENDPOINT.to_string(),
            ProviderKind::LibreTranslate => String::new(),
        }
    }

    /// Mirrors with the default list applied
    pub fn effective_mirrors(&self) -> Vec<String> {
        if self.mirrors.is_empty() {
            libretranslate::DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect()
        } else {
            self.mirrors.clone()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let urls = match self.provider_type {
            ProviderKind::LibreTranslate => self.effective_mirrors(),
            _ => vec![self.effective_endpoint()],
        };

        for url in urls {
            Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
                provider: self.provider_type.to_lowercase_string(),
                url: url.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Translation pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Providers in fallback order
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Bound on every network attempt, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between a failed provider and the next one, in milliseconds
    #[serde(default = "default_provider_pause_ms")]
    pub provider_pause_ms: u64,

    /// Whether successful translations are cached for the run
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            provider_pause_ms: default_provider_pause_ms(),
            cache_enabled: true,
        }
    }
}

impl TranslationCommonConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn provider_pause(&self) -> Duration {
        Duration::from_millis(self.provider_pause_ms)
    }

    /// Reject settings that would make every attempt fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

impl TranslationConfig {
    /// Enabled providers, in fallback order
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.provider_type == provider_type)
    }

    /// Keep only the given kinds, in the given order
    pub fn restrict_to(&mut self, kinds: &[ProviderKind]) {
        let mut selected = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let entry = self
                .get_provider_config(*kind)
                .cloned()
                .unwrap_or_else(|| ProviderConfig::new(*kind));
            selected.push(ProviderConfig { enabled: true, ..entry });
        }
        self.providers = selected;
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            common: TranslationCommonConfig::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "fr".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_provider_pause_ms() -> u64 {
    500 // courtesy pause between providers
}

fn default_true() -> bool {
    true
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ProviderKind::Google),
        ProviderConfig::new(ProviderKind::LibreTranslate),
        ProviderConfig::new(ProviderKind::MyMemory),
    ]
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for code in [&self.source_language, &self.target_language] {
            validate_language_code(code).map_err(|_| ConfigError::InvalidLanguage(code.clone()))?;
        }

        if self.translation.enabled_providers().next().is_none() {
            return Err(ConfigError::NoProviders);
        }

        self.translation.common.validate()?;

        for provider in self.translation.enabled_providers() {
            provider.validate()?;
        }

        Ok(())
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load a configuration file, writing the defaults first if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
