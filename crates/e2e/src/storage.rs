//! Persisted-store inspection
//!
//! The application mirrors its todo list into a localStorage record. The
//! suite reads it as ground truth to cross-check what the UI shows. Writes
//! land asynchronously relative to the triggering action, so every check
//! here polls with a bounded timeout instead of asserting immediately.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use refresh_driver::{Driver, DriverResult};

/// The record the application keeps in localStorage.
pub const STORAGE_KEY: &str = "react-todos";

/// One persisted todo entry, in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub title: String,
    pub completed: bool,
}

/// Read the persisted todo list as it is right now. Prefer the `wait_for_*`
/// helpers in assertions; a single read races the application's write-back.
pub async fn read_persisted_todos<D: Driver>(driver: &D) -> DriverResult<Vec<TodoRecord>> {
    let script = format!("JSON.parse(localStorage['{STORAGE_KEY}'] || '[]')");
    let value = driver.eval(&script).await?;
    Ok(serde_json::from_value(value)?)
}

/// Poll until the persisted list holds exactly `expected` records.
pub async fn wait_for_todo_count<D: Driver>(
    driver: &D,
    expected: usize,
    timeout: Duration,
) -> DriverResult<()> {
    let script = format!(
        "(expected) => JSON.parse(localStorage['{STORAGE_KEY}'] || '[]').length === expected"
    );
    driver.wait_for_condition(&script, json!(expected), timeout).await
}

/// Poll until exactly `expected` persisted records are completed.
pub async fn wait_for_completed_count<D: Driver>(
    driver: &D,
    expected: usize,
    timeout: Duration,
) -> DriverResult<()> {
    let script = format!(
        "(expected) => JSON.parse(localStorage['{STORAGE_KEY}'] || '[]').filter((todo) => todo.completed).length === expected"
    );
    driver.wait_for_condition(&script, json!(expected), timeout).await
}

/// Poll until a record with `title` exists.
pub async fn wait_for_title<D: Driver>(
    driver: &D,
    title: &str,
    timeout: Duration,
) -> DriverResult<()> {
    let script = format!(
        "(title) => JSON.parse(localStorage['{STORAGE_KEY}'] || '[]').map((todo) => todo.title).includes(title)"
    );
    driver.wait_for_condition(&script, json!(title), timeout).await
}

/// Poll until no record with `title` remains.
pub async fn wait_for_title_absent<D: Driver>(
    driver: &D,
    title: &str,
    timeout: Duration,
) -> DriverResult<()> {
    let script = format!(
        "(title) => !JSON.parse(localStorage['{STORAGE_KEY}'] || '[]').map((todo) => todo.title).includes(title)"
    );
    driver.wait_for_condition(&script, json!(title), timeout).await
}
