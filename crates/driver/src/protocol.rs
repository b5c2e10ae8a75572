//! JSON-line wire protocol spoken with the Playwright sidecar
//!
//! One request per line on the sidecar's stdin, one response per line on its
//! stdout, matched by `id`. The sidecar executes commands strictly in order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DriverError, DriverResult};
use crate::locator::Locator;

/// Browser viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport { width: 1280, height: 720 }
    }
}

/// A single command for the sidecar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Launch the browser and open the first page. Must be the first command.
    /// Carries the action and navigation timeouts so the engine's own
    /// deadline fires before the caller-side one and the structured
    /// timeout diff survives.
    Launch {
        browser: String,
        headless: bool,
        viewport: Viewport,
        action_timeout_ms: u64,
        navigation_timeout_ms: u64,
    },

    /// Open another tab in the same browsing context. Returns the page id.
    NewPage,

    Navigate { page: u32, url: String },

    GoBack { page: u32 },

    Fill { page: u32, target: Locator, value: String },

    Press { page: u32, target: Locator, key: String },

    Click { page: u32, target: Locator },

    DblClick { page: u32, target: Locator },

    Check { page: u32, target: Locator },

    Uncheck { page: u32, target: Locator },

    DispatchEvent { page: u32, target: Locator, event: String },

    /// Poll an assertion against the live page until it passes or the
    /// deadline elapses.
    Expect {
        page: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Locator>,
        assert: Assertion,
        timeout_ms: u64,
    },

    /// Poll a page-side predicate (a JS function source taking one argument)
    /// until it returns truthy.
    WaitForCondition {
        page: u32,
        script: String,
        arg: Value,
        timeout_ms: u64,
    },

    /// Evaluate a JS expression and return its JSON value.
    Evaluate { page: u32, script: String },

    /// Close the browser and exit the sidecar.
    Close,
}

/// What an `Expect` command verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assertion {
    Visible,
    Hidden,
    /// Exact ordered text contents of every match.
    Text { expected: Vec<String> },
    TextContains { needle: String },
    Count { expected: usize },
    Class { name: String, present: bool },
    Checked { expected: bool },
    Value { expected: String },
    TitleContains { needle: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    #[serde(flatten)]
    pub command: Command,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub id: u64,
    pub ok: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub error: Option<WireError>,
}

/// Failure detail reported by the sidecar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireError {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
    #[serde(default)]
    pub elapsed_ms: Option<u64>,
}

impl Response {
    /// Convert into a result, attaching the caller's description of the
    /// operation target (locator or URL) to any failure.
    pub fn into_result(self, context: &str) -> DriverResult<Value> {
        if self.ok {
            return Ok(self.value.unwrap_or(Value::Null));
        }
        let err = self
            .error
            .unwrap_or_else(|| WireError { kind: "protocol".to_string(), message: "sidecar reported failure without detail".to_string(), ..Default::default() });
        Err(err.into_driver_error(context))
    }
}

impl WireError {
    fn into_driver_error(self, context: &str) -> DriverError {
        match self.kind.as_str() {
            "timeout" => DriverError::LocatorTimeout {
                target: context.to_string(),
                expected: self.expected.unwrap_or_else(|| "<unspecified>".to_string()),
                actual: self.actual.unwrap_or_else(|| "<never observed>".to_string()),
                elapsed_ms: self.elapsed_ms.unwrap_or(0),
            },
            "assertion" => DriverError::AssertionMismatch {
                target: context.to_string(),
                expected: self.expected.unwrap_or_else(|| "<unspecified>".to_string()),
                actual: self.actual.unwrap_or_else(|| "<unobserved>".to_string()),
            },
            "navigation" => DriverError::Navigation {
                url: context.to_string(),
                reason: self.message,
            },
            _ => DriverError::Protocol(self.message),
        }
    }
}
