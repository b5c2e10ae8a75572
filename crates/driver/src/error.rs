//! Error types for the driver capability layer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    /// Programming error: an operation was issued against a session that is
    /// closed or was never launched. Fatal, not recoverable.
    #[error("invalid session: {0}")]
    InvalidSession(&'static str),

    /// An expected element or state never materialized within the bounded
    /// wait. Carries the expected/actual diff and the elapsed wait.
    #[error("timed out after {elapsed_ms} ms on {target}: expected {expected}, last saw {actual}")]
    LocatorTimeout {
        target: String,
        expected: String,
        actual: String,
        elapsed_ms: u64,
    },

    /// An observed value differed from the expected one.
    #[error("assertion mismatch on {target}: expected {expected}, actual {actual}")]
    AssertionMismatch {
        target: String,
        expected: String,
        actual: String,
    },

    /// The target URL could not be reached. Reported, never retried here;
    /// retry policy belongs to the host test runner.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The sidecar sent something we could not interpret, or went away.
    #[error("driver protocol error: {0}")]
    Protocol(String),

    #[error("node runtime not found; install Node.js and run `npm install playwright`")]
    RuntimeNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_carries_diff_and_elapsed() {
        let err = DriverError::LocatorTimeout {
            target: "test-id `todo-title`".to_string(),
            expected: "count 3".to_string(),
            actual: "count 2".to_string(),
            elapsed_ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("count 3"));
        assert!(msg.contains("count 2"));
        assert!(msg.contains("5000 ms"));
    }

    #[test]
    fn mismatch_message_carries_both_values() {
        let err = DriverError::AssertionMismatch {
            target: "css `.todo-count`".to_string(),
            expected: "\"2\"".to_string(),
            actual: "\"3\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("expected \"2\""));
        assert!(msg.contains("actual \"3\""));
    }
}
