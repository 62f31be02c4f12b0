// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog observer
//
// Bridges the page's blocking dialog events into the harness. One dispatcher
// is registered on the page when the observer attaches; install/uninstall
// only swap the policy that dispatcher consults, because `Page::on_dialog`
// handlers cannot be removed once added.

use crate::dialog::{CapturedResult, DialogEvent, DialogHandle, PendingDialog, Resolution};
use crate::error::{Error, Result};
use crate::policy::ResponsePolicy;
use parking_lot::Mutex;
use playwright_rs::protocol::Page;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Receiver armed by the harness for the next capture.
pub(crate) type CaptureReceiver = oneshot::Receiver<Result<CapturedResult>>;

#[derive(Default)]
struct ObserverState {
    policy: Option<ResponsePolicy>,
    waiter: Option<oneshot::Sender<Result<CapturedResult>>>,
    unhandled: Vec<DialogEvent>,
}

/// Intercepts dialogs and answers them according to the installed policy.
///
/// Cloning is cheap and every clone shares the same policy slot.
///
/// # Example
///
/// ```ignore
/// use alerts_e2e::{DialogObserver, ResponsePolicy};
///
/// let observer = DialogObserver::attach(&page).await?;
/// observer.install(ResponsePolicy::dismiss());
/// page.locator("#confirmButton").await.click(None).await?;
/// observer.uninstall();
/// ```
#[derive(Clone, Default)]
pub struct DialogObserver {
    state: Arc<Mutex<ObserverState>>,
}

impl DialogObserver {
    /// Creates an observer that is not connected to any page.
    ///
    /// Dialogs reach it only through [`DialogObserver::on_dialog`].
    pub fn detached() -> Self {
        Self::default()
    }

    /// Creates an observer and registers its dispatcher on `page`.
    ///
    /// Call this once per page. Each call adds another `on_dialog` handler,
    /// and two observers on one page would both try to answer every dialog.
    pub async fn attach(page: &Page) -> Result<Self> {
        let observer = Self::detached();
        let dispatcher = observer.clone();

        page.on_dialog(move |dialog| {
            let observer = dispatcher.clone();
            async move {
                observer.dispatch(&dialog).await;
                Ok(())
            }
        })
        .await?;

        tracing::debug!(url = %page.url(), "Dialog observer attached");
        Ok(observer)
    }

    /// Installs `policy` for subsequent dialogs, replacing any active one.
    pub fn install(&self, policy: ResponsePolicy) {
        let mut state = self.state.lock();
        if let Some(previous) = state.policy.replace(policy) {
            tracing::debug!(?previous, "Replacing installed dialog policy");
        }
        tracing::debug!(policy = ?state.policy, "Dialog policy installed");
    }

    /// Removes the active policy and drops any armed waiter.
    ///
    /// A no-op when nothing is installed.
    pub fn uninstall(&self) {
        let mut state = self.state.lock();
        state.waiter = None;
        if let Some(policy) = state.policy.take() {
            tracing::debug!(?policy, "Dialog policy uninstalled");
        }
    }

    /// Returns true while a policy is installed.
    pub fn is_installed(&self) -> bool {
        self.state.lock().policy.is_some()
    }

    /// Drains dialogs that arrived with no policy installed.
    pub fn take_unhandled(&self) -> Vec<DialogEvent> {
        std::mem::take(&mut self.state.lock().unhandled)
    }

    /// Removes the oldest unhandled dialog, leaving later ones queued.
    pub(crate) fn pop_unhandled(&self) -> Option<DialogEvent> {
        let mut state = self.state.lock();
        if state.unhandled.is_empty() {
            None
        } else {
            Some(state.unhandled.remove(0))
        }
    }

    /// Arms a one-shot receiver for the next captured dialog.
    ///
    /// Replaces a previously armed receiver, which then sees a closed channel.
    pub(crate) fn arm(&self) -> CaptureReceiver {
        let (tx, rx) = oneshot::channel();
        self.state.lock().waiter = Some(tx);
        rx
    }

    /// Handles one intercepted dialog.
    ///
    /// Snapshots the dialog, picks a resolution from the installed policy and
    /// resolves it exactly once. With no policy installed the dialog is
    /// dismissed, recorded as unhandled, and `UnhandledDialog` is returned.
    ///
    /// # Errors
    ///
    /// - `UnhandledDialog` when no policy is installed
    /// - `UnknownDialogKind` for an unrecognised dialog type (the dialog is
    ///   dismissed first)
    /// - `Browser` if accepting or dismissing fails
    pub async fn on_dialog<H: DialogHandle + ?Sized>(&self, dialog: &H) -> Result<CapturedResult> {
        let mut pending = PendingDialog::new(dialog);

        let event = match DialogEvent::snapshot(dialog) {
            Ok(event) => event,
            Err(e) => {
                pending.resolve(&Resolution::Dismiss).await?;
                return Err(e);
            }
        };

        let policy = self.state.lock().policy.clone();
        let Some(policy) = policy else {
            tracing::warn!(
                kind = %event.kind,
                dialog_message = %event.message,
                "Dialog raised with no policy installed; dismissing"
            );
            let err = Error::UnhandledDialog {
                kind: event.kind.to_string(),
                message: event.message.clone(),
            };
            self.state.lock().unhandled.push(event);
            pending.resolve(&Resolution::Dismiss).await?;
            return Err(err);
        };

        let resolution = policy.resolution_for(event.kind);
        tracing::debug!(
            kind = %event.kind,
            dialog_message = %event.message,
            ?resolution,
            "Resolving dialog"
        );
        pending.resolve(&resolution).await?;

        Ok(CapturedResult::new(event, resolution))
    }

    /// Handles a dialog and hands the outcome to the armed waiter, if any.
    pub(crate) async fn dispatch<H: DialogHandle + ?Sized>(&self, dialog: &H) {
        let outcome = self.on_dialog(dialog).await;

        let waiter = self.state.lock().waiter.take();
        match (waiter, outcome) {
            (Some(tx), outcome) => {
                if tx.send(outcome).is_err() {
                    tracing::debug!("Dialog captured after the harness stopped waiting");
                }
            }
            (None, Ok(captured)) => {
                tracing::debug!(kind = %captured.kind(), "Dialog captured with no waiter armed");
            }
            (None, Err(e)) => {
                tracing::warn!("Dialog handling failed: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for DialogObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DialogObserver")
            .field("policy", &state.policy)
            .field("armed", &state.waiter.is_some())
            .field("unhandled", &state.unhandled.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogKind;
    use crate::dialog::testing::FakeDialog;

    #[tokio::test]
    async fn test_accept_policy_captures_before_resolving() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::accept());

        let dialog = FakeDialog::new("alert", "You clicked a button");
        let captured = observer.on_dialog(&dialog).await.unwrap();

        // The resolved dialog no longer reports anything; the capture does.
        assert_eq!(dialog.calls(), vec![Resolution::Accept(None)]);
        assert_eq!(dialog.message(), "");
        assert_eq!(dialog.kind_name(), "");
        assert_eq!(captured.kind(), DialogKind::Alert);
        assert_eq!(captured.message(), "You clicked a button");
        assert_eq!(captured.resolution, Resolution::Accept(None));
    }

    #[tokio::test]
    async fn test_prompt_receives_input_text() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::accept_with_text("Test@123!#$%"));

        let dialog = FakeDialog::new("prompt", "Please enter your name");
        observer.on_dialog(&dialog).await.unwrap();

        assert_eq!(
            dialog.calls(),
            vec![Resolution::Accept(Some("Test@123!#$%".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_reinstall_replaces_policy_without_double_handling() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::accept());
        observer.install(ResponsePolicy::dismiss());

        let dialog = FakeDialog::new("confirm", "Do you confirm action?");
        observer.on_dialog(&dialog).await.unwrap();

        assert_eq!(dialog.calls(), vec![Resolution::Dismiss]);
    }

    #[tokio::test]
    async fn test_uninstall_is_idempotent_and_effective() {
        let observer = DialogObserver::detached();
        observer.uninstall();
        observer.install(ResponsePolicy::accept());
        observer.uninstall();
        observer.uninstall();
        assert!(!observer.is_installed());

        let dialog = FakeDialog::new("confirm", "Do you confirm action?");
        let result = observer.on_dialog(&dialog).await;

        assert!(matches!(result, Err(Error::UnhandledDialog { ref kind, .. }) if kind == "confirm"));
        assert_eq!(dialog.calls(), vec![Resolution::Dismiss]);

        let unhandled = observer.take_unhandled();
        assert_eq!(unhandled.len(), 1);
        assert_eq!(unhandled[0].message, "Do you confirm action?");
        assert!(observer.take_unhandled().is_empty());
    }

    #[tokio::test]
    async fn test_pop_unhandled_keeps_later_dialogs_queued() {
        let observer = DialogObserver::detached();
        observer.dispatch(&FakeDialog::new("alert", "first")).await;
        observer.dispatch(&FakeDialog::new("confirm", "second")).await;

        assert_eq!(observer.pop_unhandled().unwrap().message, "first");
        let rest = observer.take_unhandled();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].kind, DialogKind::Confirm);
        assert!(observer.pop_unhandled().is_none());
    }

    #[tokio::test]
    async fn test_unknown_kind_is_dismissed_and_reported() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::accept());

        let dialog = FakeDialog::new("", "");
        let result = observer.on_dialog(&dialog).await;

        assert!(matches!(result, Err(Error::UnknownDialogKind(_))));
        assert_eq!(dialog.calls(), vec![Resolution::Dismiss]);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_to_armed_waiter_once() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::dismiss());
        let rx = observer.arm();

        let first = FakeDialog::new("prompt", "Please enter your name");
        observer.dispatch(&first).await;
        let captured = rx.await.unwrap().unwrap();
        assert_eq!(captured.kind(), DialogKind::Prompt);
        assert_eq!(captured.resolution, Resolution::Dismiss);

        // The waiter is consumed; a second dialog is still answered.
        let second = FakeDialog::new("alert", "again");
        observer.dispatch(&second).await;
        assert_eq!(second.calls(), vec![Resolution::Dismiss]);
    }

    #[tokio::test]
    async fn test_uninstall_closes_armed_waiter() {
        let observer = DialogObserver::detached();
        observer.install(ResponsePolicy::accept());
        let rx = observer.arm();
        observer.uninstall();

        assert!(rx.await.is_err());
    }
}
