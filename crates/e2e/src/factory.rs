//! Page object factory
//!
//! Pure construction: binds page objects to an active session, no I/O. A
//! closed session is a precondition violation, not a runtime condition to
//! recover from.

use refresh_driver::{DriverError, DriverResult, Page, Session};

use crate::pages::{LandingPage, TodoPage};

pub struct PageFactory {
    session: Session,
}

impl PageFactory {
    pub fn new(session: Session) -> DriverResult<Self> {
        if !session.is_open() {
            return Err(DriverError::InvalidSession(
                "page factory requires a live session",
            ));
        }
        Ok(Self { session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Todo page bound to the session's default tab.
    pub fn todo_page(&self) -> DriverResult<TodoPage<Page>> {
        self.guard()?;
        Ok(TodoPage::new(self.session.page()))
    }

    /// Todo page bound to an explicitly opened tab (persistence scenarios).
    pub fn todo_page_on(&self, page: Page) -> DriverResult<TodoPage<Page>> {
        self.guard()?;
        Ok(TodoPage::new(page))
    }

    /// Marketing-site page bound to the session's default tab.
    pub fn landing_page(&self) -> DriverResult<LandingPage<Page>> {
        self.guard()?;
        Ok(LandingPage::new(self.session.page()))
    }

    fn guard(&self) -> DriverResult<()> {
        if self.session.is_open() {
            Ok(())
        } else {
            Err(DriverError::InvalidSession("session was closed"))
        }
    }
}
