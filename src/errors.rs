/*!
 * Error types for the transcade application.
 *
 * Provider errors never leave the translation pipeline: adapters log them and
 * report the provider as unable to translate. Configuration errors surface
 * when a pipeline is built.
 */

use thiserror::Error;

/// Errors that can occur while talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when building or sending a request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the per-attempt timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code (or the status embedded in the response body)
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The provider answered but produced no text for non-empty input
    #[error("Provider returned an empty translation")]
    EmptyTranslation,

    /// The provider answered with a known error message in place of a translation
    #[error("Provider rejected the request: {0}")]
    Rejected(String),

    /// Every mirror of a multi-instance provider failed
    #[error("All {0} mirrors failed")]
    AllMirrorsFailed(usize),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else if let Some(status) = error.status() {
            Self::ApiError {
                status_code: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(error.to_string())
    }
}

/// Errors raised while building a translation pipeline from configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Endpoint or mirror is not a valid absolute URL
    #[error("Invalid URL '{url}' for provider {provider}: {reason}")]
    InvalidUrl {
        /// Provider the URL belongs to
        provider: String,
        /// Offending URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// Configuration leaves nothing to call
    #[error("No enabled translation providers configured")]
    NoProviders,

    /// Language code not recognised
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// A zero timeout would fail every network attempt
    #[error("Provider timeout must be at least one second")]
    ZeroTimeout,
}
