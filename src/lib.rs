/*!
 * # transcade - fault-tolerant short text translation
 *
 * A Rust library for translating short snippets, such as repository
 * descriptions, through a chain of free translation services.
 *
 * ## Features
 *
 * - Ordered fallback across providers, first success wins:
 *   - Google bulk-translate endpoint
 *   - LibreTranslate (several public mirrors)
 *   - MyMemory
 * - Run-scoped cache keyed on a SHA-256 digest of text and language pair
 * - Never fails: degrades to the original text when no provider answers
 * - Per-attempt timeouts and a courtesy pause between providers
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * - `app_config`: Configuration management
 * - `translation`: The fallback pipeline:
 *   - `translation::manager`: Provider chain and algorithm
 *   - `translation::cache`: Caching of successful translations
 *   - `translation::request`: Request value and cache key
 *   - `translation::source`: Text supplier interface
 * - `providers`: Adapters for each translation service
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ConfigError, ProviderError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use providers::Provider;
pub use translation::{TranslationManager, TranslationRequest};
