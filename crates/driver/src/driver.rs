//! The Driver capability interface
//!
//! Page objects consume browser automation exclusively through this trait.
//! The concrete implementation is [`crate::session::Page`]; tests substitute
//! recording fakes to verify dispatch without a browser.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::DriverResult;
use crate::locator::Locator;

#[async_trait]
pub trait Driver: Send + Sync {
    // Navigation

    async fn navigate(&self, url: &str) -> DriverResult<()>;

    async fn go_back(&self) -> DriverResult<()>;

    // Actions. These return once the engine confirms dispatch; UI settling
    // is the job of the assertion that follows.

    async fn fill(&self, target: &Locator, value: &str) -> DriverResult<()>;

    async fn press(&self, target: &Locator, key: &str) -> DriverResult<()>;

    async fn click(&self, target: &Locator) -> DriverResult<()>;

    async fn dblclick(&self, target: &Locator) -> DriverResult<()>;

    async fn check(&self, target: &Locator) -> DriverResult<()>;

    async fn uncheck(&self, target: &Locator) -> DriverResult<()>;

    async fn dispatch_event(&self, target: &Locator, event: &str) -> DriverResult<()>;

    // Assertions. Each polls the live page until it passes or the bounded
    // wait elapses; failures carry expected vs. actual.

    async fn expect_visible(&self, target: &Locator) -> DriverResult<()>;

    async fn expect_hidden(&self, target: &Locator) -> DriverResult<()>;

    /// Exact ordered text contents of every element the descriptor matches.
    async fn expect_text(&self, target: &Locator, expected: &[String]) -> DriverResult<()>;

    async fn expect_text_contains(&self, target: &Locator, needle: &str) -> DriverResult<()>;

    async fn expect_count(&self, target: &Locator, expected: usize) -> DriverResult<()>;

    async fn expect_class(&self, target: &Locator, class: &str, present: bool) -> DriverResult<()>;

    async fn expect_checked(&self, target: &Locator, expected: bool) -> DriverResult<()>;

    async fn expect_value(&self, target: &Locator, expected: &str) -> DriverResult<()>;

    async fn expect_title_contains(&self, needle: &str) -> DriverResult<()>;

    // Escape hatches for polling state the DOM does not expose directly
    // (e.g. the application's persisted store).

    /// Poll `script` (the source of a one-argument JS function) with `arg`
    /// until it returns truthy.
    async fn wait_for_condition(&self, script: &str, arg: Value, timeout: Duration) -> DriverResult<()>;

    /// Evaluate a JS expression and return its JSON value.
    async fn eval(&self, script: &str) -> DriverResult<Value>;
}
