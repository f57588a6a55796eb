/*!
 * Translation pipeline.
 *
 * - `manager`: ordered fallback across providers, the public entry point
 * - `cache`: run-scoped cache of successful translations
 * - `request`: the (text, source, target) value and its cache key
 * - `source`: interface to whatever supplies the text
 */

// Re-export main types for easier usage
pub use self::cache::{CacheKey, CacheStats, TranslationCache};
pub use self::manager::{TranslationManager, DEFAULT_SOURCE_LANGUAGE};
pub use self::request::TranslationRequest;
pub use self::source::{Description, DescriptionSource, StaticDescription};

// Submodules
pub mod cache;
pub mod manager;
pub mod request;
pub mod source;
