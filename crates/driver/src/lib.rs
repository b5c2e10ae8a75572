//! Refresh driver capability layer
//!
//! Browser automation consumed through a narrow interface: a [`Driver`]
//! trait for navigation, actions, and polling assertions, implemented by
//! [`Page`] handles of a [`Session`]. A session owns one Playwright sidecar
//! process (Node) speaking a JSON-line protocol, keeping a single browsing
//! context alive for the whole test case.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ test scenario                                            │
//! │   └── page object (semantic operations)                  │
//! │         └── Driver trait                                 │
//! │               └── Page ── Session ── JSON lines ── node  │
//! │                                       driver.js ── browser│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every suspending call carries a bounded deadline; element lookups are
//! re-resolved on each use, never cached.

pub mod driver;
pub mod error;
pub mod locator;
pub mod protocol;
pub mod session;

pub use driver::Driver;
pub use error::{DriverError, DriverResult};
pub use locator::Locator;
pub use protocol::Viewport;
pub use session::{Browser, Page, Session, SessionConfig};
