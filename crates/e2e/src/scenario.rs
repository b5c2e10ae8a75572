//! Scenario plumbing: named step boundaries and the suite error type

use std::future::Future;

use thiserror::Error;
use tracing::{debug, error};

use refresh_driver::{DriverError, DriverResult};

#[derive(Error, Debug)]
pub enum SuiteError {
    /// A named scenario step failed; carries the step name so a failed run
    /// reports which semantic action broke, not just a generic failure.
    #[error("step `{name}` failed: {source}")]
    Step {
        name: String,
        #[source]
        source: DriverError,
    },

    #[error(transparent)]
    Driver(#[from] DriverError),
}

pub type SuiteResult<T> = Result<T, SuiteError>;

/// Run one semantic step under a name. Failures are logged and wrapped so
/// the report shows the step boundary they crossed.
pub async fn step<T, F>(name: &str, fut: F) -> SuiteResult<T>
where
    F: Future<Output = DriverResult<T>>,
{
    debug!(step = name, "begin");
    match fut.await {
        Ok(value) => {
            debug!(step = name, "ok");
            Ok(value)
        }
        Err(e) => {
            error!(step = name, error = %e, "step failed");
            Err(SuiteError::Step { name: name.to_string(), source: e })
        }
    }
}

/// Install the test logger. Safe to call from every test; only the first
/// call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
