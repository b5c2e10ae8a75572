//! Refresh E2E suite
//!
//! Page-object regression tests for two public demo sites: the TodoMVC demo
//! application and the Playwright marketing site. Test scenarios obtain page
//! objects from [`PageFactory`], drive them through semantic operations, and
//! verify observable state both through the UI and through the application's
//! persisted store.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ scenario (tests/demo_todo_app.rs)                      │
//! │   ├── PageFactory ── Session                           │
//! │   ├── TodoPage / LandingPage (semantic operations)     │
//! │   │     └── Driver capability trait                    │
//! │   └── storage::wait_for_* (persisted-store polling)    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Page objects hold no UI state of their own; every operation re-resolves
//! its target against the live page. All waits are bounded.

pub mod config;
pub mod factory;
pub mod pages;
pub mod report;
pub mod scenario;
pub mod storage;

pub use config::SuiteConfig;
pub use factory::PageFactory;
pub use pages::{Filter, LandingPage, TodoEditor, TodoPage};
pub use report::{ReportConfig, SuiteReport};
pub use scenario::{step, SuiteError, SuiteResult};
pub use storage::TodoRecord;

pub use refresh_driver as driver;
