//! Suite configuration
//!
//! Compiled defaults pointing at the public demo sites, overridable through
//! the environment for local runs against a different deployment or engine.

use std::time::Duration;

use refresh_driver::{Browser, SessionConfig};

pub const TODO_URL_ENV: &str = "REFRESH_TODO_URL";
pub const LANDING_URL_ENV: &str = "REFRESH_LANDING_URL";
pub const BROWSER_ENV: &str = "REFRESH_BROWSER";
/// Set (to anything) to run headed.
pub const HEADED_ENV: &str = "REFRESH_HEADED";

#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// The todo application under test.
    pub todo_url: String,

    /// The marketing site under test.
    pub landing_url: String,

    pub browser: Browser,
    pub headless: bool,

    /// Bound on persisted-store polling.
    pub poll_timeout: Duration,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            todo_url: "https://demo.playwright.dev/todomvc".to_string(),
            landing_url: "https://playwright.dev/".to_string(),
            browser: Browser::Chromium,
            headless: true,
            poll_timeout: Duration::from_secs(5),
        }
    }
}

impl SuiteConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(TODO_URL_ENV) {
            config.todo_url = url;
        }
        if let Ok(url) = std::env::var(LANDING_URL_ENV) {
            config.landing_url = url;
        }
        if let Ok(name) = std::env::var(BROWSER_ENV) {
            config.browser = Browser::from_name(&name);
        }
        if std::env::var_os(HEADED_ENV).is_some() {
            config.headless = false;
        }
        config
    }

    /// Session settings derived from this suite configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            browser: self.browser,
            headless: self.headless,
            ..SessionConfig::default()
        }
    }
}
