//! Selector descriptors
//!
//! Page objects describe *what* they want to touch; the sidecar resolves the
//! descriptor against the live page on every use, so no locator result is
//! ever cached across DOM mutations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declarative description of one element (or set of elements) on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Raw CSS selector.
    Css { selector: String },

    /// `data-testid` attribute.
    TestId { id: String },

    /// Input placeholder text.
    Placeholder { text: String },

    /// ARIA role, optionally narrowed by accessible name.
    Role {
        role: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },

    /// Associated label text.
    Label { text: String },

    /// Visible text content.
    Text { text: String },

    /// The n-th match of another descriptor (0-based).
    Nth { of: Box<Locator>, index: usize },

    /// A descriptor resolved inside the scope of another.
    Within { of: Box<Locator>, target: Box<Locator> },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css { selector: selector.into() }
    }

    pub fn test_id(id: impl Into<String>) -> Self {
        Locator::TestId { id: id.into() }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Locator::Placeholder { text: text.into() }
    }

    pub fn role(role: impl Into<String>) -> Self {
        Locator::Role { role: role.into(), name: None }
    }

    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Role { role: role.into(), name: Some(name.into()) }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Locator::Label { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text { text: text.into() }
    }

    /// Narrow to the n-th match (0-based).
    pub fn nth(self, index: usize) -> Self {
        Locator::Nth { of: Box::new(self), index }
    }

    /// Resolve `target` inside the scope of `self`.
    pub fn within(self, target: Locator) -> Self {
        Locator::Within { of: Box::new(self), target: Box::new(target) }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css { selector } => write!(f, "css `{}`", selector),
            Locator::TestId { id } => write!(f, "test-id `{}`", id),
            Locator::Placeholder { text } => write!(f, "placeholder `{}`", text),
            Locator::Role { role, name: Some(name) } => write!(f, "role `{}` named `{}`", role, name),
            Locator::Role { role, name: None } => write!(f, "role `{}`", role),
            Locator::Label { text } => write!(f, "label `{}`", text),
            Locator::Text { text } => write!(f, "text `{}`", text),
            Locator::Nth { of, index } => write!(f, "{} #{}", of, index),
            Locator::Within { of, target } => write!(f, "{} > {}", of, target),
        }
    }
}
