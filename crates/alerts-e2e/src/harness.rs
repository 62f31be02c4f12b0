// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog test harness
//
// Runs one "trigger -> dialog -> resolve -> observe" cycle per call and reads
// the result text the application renders afterwards.

use crate::dialog::{CapturedResult, ResultText};
use crate::error::{Error, Result};
use crate::observer::DialogObserver;
use crate::policy::ResponsePolicy;
use async_trait::async_trait;
use playwright_rs::protocol::{Locator, Page};
use std::future::Future;
use std::time::{Duration, Instant};

/// Harness lifecycle for a single scenario step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    /// No policy installed
    Idle,
    /// Policy installed, action fired, waiting for the dialog
    Observing,
    /// Dialog intercepted and resolved, policy not yet removed
    Captured,
    /// No dialog arrived before the deadline
    TimedOut,
}

/// A DOM element the harness can read result text from.
///
/// Implemented for `Locator`.
#[async_trait]
pub trait ResultElement: Send + Sync {
    /// Selector used in error messages
    fn selector(&self) -> &str;

    async fn count(&self) -> Result<usize>;

    async fn is_visible(&self) -> Result<bool>;

    async fn text_content(&self) -> Result<Option<String>>;
}

#[async_trait]
impl ResultElement for Locator {
    fn selector(&self) -> &str {
        Locator::selector(self)
    }

    async fn count(&self) -> Result<usize> {
        Ok(Locator::count(self).await?)
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(Locator::is_visible(self).await?)
    }

    async fn text_content(&self) -> Result<Option<String>> {
        Ok(Locator::text_content(self).await?)
    }
}

/// Removes the policy when the observation scope ends, including on early
/// return and when the caller drops the future mid-wait.
struct ObservationScope<'a> {
    observer: &'a DialogObserver,
    state: &'a mut HarnessState,
}

impl<'a> ObservationScope<'a> {
    fn open(
        observer: &'a DialogObserver,
        state: &'a mut HarnessState,
        policy: ResponsePolicy,
    ) -> Self {
        observer.install(policy);
        *state = HarnessState::Observing;
        Self { observer, state }
    }

    fn transition(&mut self, next: HarnessState) {
        tracing::trace!(from = ?*self.state, to = ?next, "Harness transition");
        *self.state = next;
    }
}

impl Drop for ObservationScope<'_> {
    fn drop(&mut self) {
        self.observer.uninstall();
        if *self.state != HarnessState::TimedOut {
            *self.state = HarnessState::Idle;
        }
    }
}

/// Drives actions that are expected to raise a dialog.
///
/// The harness owns its [`DialogObserver`]; a policy is installed only for
/// the duration of [`trigger_and_capture`](Self::trigger_and_capture), so
/// consecutive steps never see each other's captures.
///
/// # Example
///
/// ```ignore
/// use alerts_e2e::{AlertsPage, DialogKind, DialogTestHarness, ResponsePolicy};
/// use std::time::Duration;
///
/// let mut harness = DialogTestHarness::attach(&page).await?;
/// let alerts = AlertsPage::new(page.clone(), "https://demoqa.com").await?;
/// alerts.navigate(Duration::from_secs(30)).await?;
///
/// let captured = harness
///     .trigger_and_capture(
///         || alerts.click_prompt_alert(),
///         ResponsePolicy::accept_with_text("John Doe"),
///         Duration::from_secs(5),
///     )
///     .await?;
/// assert_eq!(captured.kind(), DialogKind::Prompt);
///
/// let text = harness.read_result_text(alerts.prompt_result()).await?;
/// assert!(text.contains("John Doe"));
/// ```
#[derive(Debug)]
pub struct DialogTestHarness {
    observer: DialogObserver,
    state: HarnessState,
}

impl DialogTestHarness {
    /// Wraps an existing observer.
    pub fn new(observer: DialogObserver) -> Self {
        Self {
            observer,
            state: HarnessState::Idle,
        }
    }

    /// Attaches a fresh observer to `page` and wraps it.
    pub async fn attach(page: &Page) -> Result<Self> {
        Ok(Self::new(DialogObserver::attach(page).await?))
    }

    pub fn observer(&self) -> &DialogObserver {
        &self.observer
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Installs `policy`, runs `action`, and waits for the dialog it raises.
    ///
    /// The whole cycle, action included, is bounded by `timeout`. The policy
    /// is uninstalled before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - `UnhandledDialog` if a dialog arrived earlier with nothing installed
    /// - `DialogTimeout` if no dialog is captured within `timeout`
    /// - any error returned by `action` or raised while resolving the dialog
    pub async fn trigger_and_capture<F, Fut>(
        &mut self,
        action: F,
        policy: ResponsePolicy,
        timeout: Duration,
    ) -> Result<CapturedResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        self.report_unhandled()?;

        let mut scope = ObservationScope::open(&self.observer, &mut self.state, policy);
        let receiver = scope.observer.arm();
        let started = Instant::now();

        let cycle = async {
            action().await?;
            receiver.await.map_err(|_| Error::ObserverClosed)?
        };

        match tokio::time::timeout(timeout, cycle).await {
            Ok(Ok(captured)) => {
                scope.transition(HarnessState::Captured);
                tracing::debug!(
                    kind = %captured.kind(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Dialog captured"
                );
                Ok(captured)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                scope.transition(HarnessState::TimedOut);
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "No dialog captured");
                Err(Error::DialogTimeout { timeout })
            }
        }
    }

    /// Waits for the next dialog without triggering anything.
    ///
    /// Useful when the action was already performed, e.g. a timer started
    /// by an earlier click.
    pub async fn wait_for_dialog(
        &mut self,
        policy: ResponsePolicy,
        timeout: Duration,
    ) -> Result<CapturedResult> {
        self.trigger_and_capture(|| async { Ok(()) }, policy, timeout)
            .await
    }

    /// Reads an element's text after a dialog has been resolved.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when nothing matches the selector. An element
    /// that exists but is hidden or empty yields `ResultText::NotShown`.
    pub async fn read_result_text<E: ResultElement + ?Sized>(
        &self,
        element: &E,
    ) -> Result<ResultText> {
        if element.count().await? == 0 {
            return Err(Error::ElementNotFound(element.selector().to_string()));
        }

        if !element.is_visible().await? {
            return Ok(ResultText::NotShown);
        }

        let text = element.text_content().await?.unwrap_or_default();
        if text.trim().is_empty() {
            Ok(ResultText::NotShown)
        } else {
            Ok(ResultText::Shown(text))
        }
    }

    /// Reads result text and stores it on `captured`.
    pub async fn capture_result_text<E: ResultElement + ?Sized>(
        &self,
        captured: &mut CapturedResult,
        element: &E,
    ) -> Result<()> {
        captured.result_text = Some(self.read_result_text(element).await?);
        Ok(())
    }

    /// Drains dialogs that arrived while nothing was installed.
    pub fn take_unhandled(&self) -> Vec<crate::dialog::DialogEvent> {
        self.observer.take_unhandled()
    }

    /// Fails with the oldest unhandled dialog; later ones stay queued for the
    /// next call or [`DialogTestHarness::take_unhandled`].
    fn report_unhandled(&self) -> Result<()> {
        match self.observer.pop_unhandled() {
            Some(event) => Err(Error::UnhandledDialog {
                kind: event.kind.to_string(),
                message: event.message,
            }),
            None => Ok(()),
        }
    }
}
