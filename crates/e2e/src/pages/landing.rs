//! Page object for the Playwright marketing site

use refresh_driver::{Driver, DriverResult, Locator};

fn get_started_link() -> Locator {
    Locator::role_named("link", "Get started")
}

fn installation_heading() -> Locator {
    Locator::role_named("heading", "Installation")
}

pub struct LandingPage<D> {
    driver: D,
}

impl<D: Driver> LandingPage<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub async fn expect_title_contains(&self, needle: &str) -> DriverResult<()> {
        self.driver.expect_title_contains(needle).await
    }

    /// Follow the "Get started" link into the docs.
    pub async fn open_get_started(&self) -> DriverResult<()> {
        self.driver.click(&get_started_link()).await
    }

    pub async fn expect_installation_heading(&self) -> DriverResult<()> {
        self.driver.expect_visible(&installation_heading()).await
    }
}
