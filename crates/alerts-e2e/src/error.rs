// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Error types for alerts-e2e

use std::time::Duration;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the dialog observer, the harness and the page object.
///
/// Every variant is reported as a scenario failure. Nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// No dialog arrived before the deadline
    ///
    /// The delayed alert appears roughly five seconds after its control is
    /// clicked, so its timeout has to be comfortably above that.
    #[error("No dialog was raised within {}ms of the triggering action", .timeout.as_millis())]
    DialogTimeout { timeout: Duration },

    /// A dialog was raised while no response policy was installed
    ///
    /// The observer dismisses such dialogs so the page does not block, but the
    /// scenario almost always forgot to install a policy first.
    #[error("Unhandled {kind} dialog: '{message}'. Install a response policy before triggering it")]
    UnhandledDialog { kind: String, message: String },

    /// Result element missing from the DOM
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// The dialog was already accepted or dismissed
    #[error("Dialog '{message}' was already resolved; a dialog is resolved exactly once")]
    DoubleResolution { message: String },

    /// The browser reported a dialog type the harness does not model
    #[error("Unknown dialog type: '{0}'")]
    UnknownDialogKind(String),

    /// The observer was dropped while the harness waited on it
    #[error("Dialog observer closed before a dialog was captured")]
    ObserverClosed,

    /// A dialog or result-text assertion failed
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Invalid harness configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error from the browser automation layer
    #[error("Browser error: {0}")]
    Browser(#[from] playwright_rs::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// Returns true for the no-dialog-in-time failure, looking through context.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::DialogTimeout { .. } => true,
            Error::Context(_, inner) => inner.is_timeout(),
            _ => false,
        }
    }
}
