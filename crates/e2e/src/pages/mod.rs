//! Page objects, one per logical UI screen
//!
//! Each page object wraps the [`refresh_driver::Driver`] capability with
//! named locators and semantic operations. No locator result is cached;
//! every operation re-resolves against the live page.

pub mod landing;
pub mod todo;

pub use landing::LandingPage;
pub use todo::{Filter, TodoEditor, TodoPage};
