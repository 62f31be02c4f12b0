// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Page object for the alerts demo page

use crate::config::join_url;
use crate::error::Result;
use playwright_rs::protocol::{GotoOptions, Locator, Page, WaitUntil};
use std::time::Duration;

/// Path of the alerts page relative to the application base URL
pub const ALERTS_PATH: &str = "alerts";

/// Raises `alert("You clicked a button")`
pub const SIMPLE_ALERT_BUTTON: &str = "#alertButton";
/// Raises an alert about five seconds after the click
pub const TIMER_ALERT_BUTTON: &str = "#timerAlertButton";
/// Raises `confirm("Do you confirm action?")`
pub const CONFIRM_BUTTON: &str = "#confirmButton";
/// Raises `prompt("Please enter your name")`. The id is misspelled on the page.
pub const PROMPT_BUTTON: &str = "#promtButton";
/// Shows "You selected Ok" or "You selected Cancel"
pub const CONFIRM_RESULT: &str = "#confirmResult";
/// Shows "You entered <name>" after an accepted, non-empty prompt
pub const PROMPT_RESULT: &str = "#promptResult";

/// Locators and actions for the alerts page.
///
/// Holds no dialog state; pair it with a [`crate::DialogTestHarness`].
#[derive(Clone)]
pub struct AlertsPage {
    page: Page,
    url: String,
    simple_alert_button: Locator,
    timer_alert_button: Locator,
    confirm_button: Locator,
    prompt_button: Locator,
    confirm_result: Locator,
    prompt_result: Locator,
}

impl AlertsPage {
    /// Builds the page object for the alerts page under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `base_url` is not a valid URL.
    pub async fn new(page: Page, base_url: &str) -> Result<Self> {
        let url = join_url(base_url, ALERTS_PATH)?;

        Ok(Self {
            simple_alert_button: page.locator(SIMPLE_ALERT_BUTTON).await,
            timer_alert_button: page.locator(TIMER_ALERT_BUTTON).await,
            confirm_button: page.locator(CONFIRM_BUTTON).await,
            prompt_button: page.locator(PROMPT_BUTTON).await,
            confirm_result: page.locator(CONFIRM_RESULT).await,
            prompt_result: page.locator(PROMPT_RESULT).await,
            page,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates to the alerts page, waiting for `DOMContentLoaded`.
    pub async fn navigate(&self, timeout: Duration) -> Result<()> {
        tracing::debug!(url = %self.url, "Navigating to alerts page");
        let options = GotoOptions::new()
            .wait_until(WaitUntil::DomContentLoaded)
            .timeout(timeout);
        self.page.goto(&self.url, Some(options)).await?;
        Ok(())
    }

    pub async fn click_simple_alert(&self) -> Result<()> {
        self.simple_alert_button.click(None).await?;
        Ok(())
    }

    /// The alert follows roughly five seconds later.
    pub async fn click_timer_alert(&self) -> Result<()> {
        self.timer_alert_button.click(None).await?;
        Ok(())
    }

    pub async fn click_confirm_alert(&self) -> Result<()> {
        self.confirm_button.click(None).await?;
        Ok(())
    }

    pub async fn click_prompt_alert(&self) -> Result<()> {
        self.prompt_button.click(None).await?;
        Ok(())
    }

    pub fn confirm_result(&self) -> &Locator {
        &self.confirm_result
    }

    pub fn prompt_result(&self) -> &Locator {
        &self.prompt_result
    }
}

impl std::fmt::Debug for AlertsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertsPage").field("url", &self.url).finish()
    }
}
