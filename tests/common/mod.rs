/*!
 * Common test utilities for the transcade test suite
 */

use std::time::Duration;

use transcade::providers::{MockProvider, Provider};
use transcade::translation::TranslationManager;

/// Route library logs to the test harness; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a manager over clones of `mocks`, without the inter-provider pause
///
/// Clones share call counters with the originals, so the caller can keep
/// asserting on them.
pub fn manager_with(mocks: &[&MockProvider]) -> TranslationManager {
    init_logging();
    let providers: Vec<Box<dyn Provider>> = mocks
        .iter()
        .map(|mock| Box::new((*mock).clone()) as Box<dyn Provider>)
        .collect();
    TranslationManager::new(providers).with_pause(Duration::ZERO)
}

/// Short timeout for adapter tests that exercise slow endpoints
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(300);

/// Delay comfortably beyond `SHORT_TIMEOUT`
pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

/// An address nothing listens on
pub const UNREACHABLE: &str = "http://127.0.0.1:9";
