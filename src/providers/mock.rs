/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged translation
 * - `MockProvider::fixed(..)` - Always succeeds with the same text
 * - `MockProvider::failing()` - Never produces a translation
 * - `MockProvider::scripted(..)` - Plays back a sequence of results
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::providers::Provider;
use crate::translation::TranslationRequest;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns `[target] text`
    Working,
    /// Returns the given text for every request
    Fixed(String),
    /// Never produces a translation
    Failing,
    /// Plays back results in order, then fails
    Scripted,
    /// Sleeps before behaving like `Working`
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Name reported in logs
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls received, shared between clones
    calls: Arc<AtomicUsize>,
    /// Requests received, shared between clones
    requests: Arc<Mutex<Vec<TranslationRequest>>>,
    /// Pending results for `Scripted`
    script: Arc<Mutex<VecDeque<Option<String>>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new("mock-working", MockBehavior::Working)
    }

    /// Create a mock provider that always returns `text`
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new("mock-fixed", MockBehavior::Fixed(text.into()))
    }

    /// Create a failing mock provider that never translates
    pub fn failing() -> Self {
        Self::new("mock-failing", MockBehavior::Failing)
    }

    /// Create a mock that plays back `results`, one per call
    pub fn scripted(results: Vec<Option<String>>) -> Self {
        let mock = Self::new("mock-scripted", MockBehavior::Scripted);
        *mock.script.lock() = results.into();
        mock
    }

    /// Create a mock that waits `delay_ms` before answering
    pub fn slow(delay_ms: u64) -> Self {
        Self::new("mock-slow", MockBehavior::Slow { delay_ms })
    }

    /// Rename the mock
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of times `translate` was called
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.lock().clone()
    }

    fn tagged(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn translate(&self, text: &str, target_language: &str, source_language: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .push(TranslationRequest::new(text, source_language, target_language));

        if let MockBehavior::Slow { delay_ms } = &self.behavior {
            tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
        }

        match &self.behavior {
            MockBehavior::Working | MockBehavior::Slow { .. } => Some(Self::tagged(text, target_language)),
            MockBehavior::Fixed(result) => Some(result.clone()),
            MockBehavior::Failing => None,
            MockBehavior::Scripted => {
                let next = self.script.lock().pop_front();
                next.flatten()
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
