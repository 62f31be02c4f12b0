// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Browser session: one Playwright server, one browser, one page

use crate::config::{BrowserKind, HarnessConfig};
use crate::error::{Error, Result};
use crate::harness::DialogTestHarness;
use playwright_rs::protocol::{Browser, Page, Playwright};
use playwright_rs::LaunchOptions;

/// A launched browser with a single page, shared by the scenarios of a test.
pub struct Session {
    playwright: Playwright,
    browser: Browser,
    page: Page,
}

impl Session {
    /// Launches the Playwright server and the configured browser, then opens
    /// a page.
    ///
    /// # Errors
    ///
    /// Returns `Browser` if the server cannot start, the browser is not
    /// installed, or the page cannot be created.
    pub async fn launch(config: &HarnessConfig) -> Result<Self> {
        tracing::debug!(browser = ?config.browser, headless = config.headless, "Launching session");

        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let options = LaunchOptions::new().headless(config.headless);
        let browser = browser_type
            .launch_with_options(options)
            .await
            .map_err(|e| Error::from(e).context(format!("launching {:?}", config.browser)))?;
        let page = browser.new_page().await?;

        Ok(Self {
            playwright,
            browser,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Attaches a dialog harness to this session's page.
    ///
    /// Call once per session; see [`crate::DialogObserver::attach`].
    pub async fn harness(&self) -> Result<DialogTestHarness> {
        DialogTestHarness::attach(&self.page).await
    }

    /// Closes the browser and stops the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        tracing::debug!("Session closed");
        Ok(())
    }
}
