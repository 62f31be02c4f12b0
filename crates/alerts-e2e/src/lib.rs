// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0

//! alerts-e2e: end-to-end tests for native browser dialogs
//!
//! Drives the alerts demo page through Playwright and checks that each
//! control raises the expected `alert`, `confirm` or `prompt`, and that the
//! page shows the right result once the dialog is answered.
//!
//! The core is two pieces:
//!
//! - [`DialogObserver`] intercepts dialogs on a page and answers them with
//!   the installed [`ResponsePolicy`], snapshotting each one first.
//! - [`DialogTestHarness`] installs a policy, runs an action, waits for the
//!   dialog with a timeout, and always uninstalls afterwards.
//!
//! # Example
//!
//! ```ignore
//! use alerts_e2e::{
//!     expect_dialog, expect_text, AlertsPage, DialogKind, HarnessConfig, ResponsePolicy, Session,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HarnessConfig::from_env()?;
//!     let session = Session::launch(&config).await?;
//!     let mut harness = session.harness().await?;
//!
//!     let alerts = AlertsPage::new(session.page().clone(), "https://demoqa.com").await?;
//!     alerts.navigate(config.navigation_timeout).await?;
//!
//!     let captured = harness
//!         .trigger_and_capture(
//!             || alerts.click_confirm_alert(),
//!             ResponsePolicy::dismiss(),
//!             config.dialog_timeout,
//!         )
//!         .await?;
//!     expect_dialog(&captured).to_have_kind(DialogKind::Confirm)?;
//!
//!     let result = harness.read_result_text(alerts.confirm_result()).await?;
//!     expect_text(&result).to_contain("You selected Cancel")?;
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod alerts_page;
mod assertions;
pub mod config;
pub mod dialog;
mod error;
pub mod harness;
pub mod observer;
pub mod policy;
mod session;

// Re-export error types
pub use error::{Error, Result};

// Re-export the dialog contract
pub use dialog::{CapturedResult, DialogEvent, DialogHandle, DialogKind, Resolution, ResultText};
pub use harness::{DialogTestHarness, HarnessState, ResultElement};
pub use observer::DialogObserver;
pub use policy::{ResponseMode, ResponsePolicy};

// Re-export assertions API
pub use assertions::{DialogExpectation, TextExpectation, expect_dialog, expect_text};

// Re-export configuration, session and page object
pub use alerts_page::AlertsPage;
pub use config::{BrowserKind, HarnessConfig};
pub use session::Session;
