//! [`Browser`] implementation over a WebDriver session.
//!
//! By default the session attaches to a Chrome instance the user already
//! started with `--remote-debugging-port`, so cookies and login state of
//! that profile are reused. A chromedriver (or compatible server) must be
//! listening at the configured WebDriver URL.

use std::time::Duration;

use thirtyfour::prelude::*;

use crate::browser::{Browser, Condition, WaitOutcome};
use crate::error::ScraperError;

const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";
const PAGE_HEIGHT_JS: &str = "return document.body.scrollHeight;";

/// Interval between polls while waiting for a [`Condition`].
const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct WebDriverBrowser {
    driver: WebDriver,
}

impl WebDriverBrowser {
    /// Opens a WebDriver session against `server_url`.
    ///
    /// With `debugger_address` set (e.g. `"127.0.0.1:9222"`), Chrome is not
    /// launched; the session attaches to the running instance instead.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::WebDriver`] if the capabilities are rejected
    /// or the server cannot create a session.
    pub async fn connect(
        server_url: &str,
        debugger_address: Option<&str>,
    ) -> Result<Self, ScraperError> {
        let mut caps = DesiredCapabilities::chrome();
        if let Some(address) = debugger_address {
            caps.add_experimental_option("debuggerAddress", address)?;
        }
        tracing::debug!(server_url, ?debugger_address, "opening WebDriver session");
        let driver = WebDriver::new(server_url, caps).await?;
        Ok(Self { driver })
    }
}

impl Browser for WebDriverBrowser {
    type Element = WebElement;

    async fn navigate(&self, url: &str) -> Result<(), ScraperError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn page_source(&self) -> Result<String, ScraperError> {
        Ok(self.driver.source().await?)
    }

    async fn wait_until(
        &self,
        condition: Condition<'_>,
        timeout: Duration,
    ) -> Result<WaitOutcome<WebElement>, ScraperError> {
        let query = self
            .driver
            .query(By::Css(condition.selector()))
            .wait(timeout, POLL_INTERVAL);
        let found = match condition {
            Condition::Present(_) => query.first_opt().await?,
            Condition::Clickable(_) => query.and_clickable().first_opt().await?,
        };
        Ok(found.into())
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.driver.execute(SCROLL_TO_BOTTOM_JS, Vec::new()).await?;
        Ok(())
    }

    async fn scroll_into_view(&self, element: &WebElement) -> Result<(), ScraperError> {
        element.scroll_into_view().await?;
        Ok(())
    }

    async fn click(&self, element: &WebElement) -> Result<(), ScraperError> {
        element.click().await?;
        Ok(())
    }

    async fn measured_page_height(&self) -> Result<u64, ScraperError> {
        let ret = self.driver.execute(PAGE_HEIGHT_JS, Vec::new()).await?;
        Ok(ret.json().as_u64().unwrap_or(0))
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.driver.quit().await?;
        Ok(())
    }
}
