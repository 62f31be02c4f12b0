// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Dialog snapshots and the resolution seam
//
// A native dialog blocks page script until it is accepted or dismissed.
// The types here capture what the browser reported about it and make sure
// it is answered exactly once.

use crate::error::{Error, Result};
use async_trait::async_trait;
use playwright_rs::protocol::Dialog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of native dialog raised by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// `window.alert()`
    Alert,
    /// `window.confirm()`
    Confirm,
    /// `window.prompt()`
    Prompt,
    /// Page unload confirmation
    BeforeUnload,
}

impl DialogKind {
    /// Returns the protocol name of the dialog type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        }
    }
}

impl FromStr for DialogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "alert" => Ok(DialogKind::Alert),
            "confirm" => Ok(DialogKind::Confirm),
            "prompt" => Ok(DialogKind::Prompt),
            "beforeunload" => Ok(DialogKind::BeforeUnload),
            other => Err(Error::UnknownDialogKind(other.to_string())),
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a dialog, taken before it is resolved.
///
/// Reading dialog state after accept/dismiss is not reliable, so the observer
/// copies everything it needs up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEvent {
    pub kind: DialogKind,
    pub message: String,
    /// Prompt default value. `None` for other kinds and for empty defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl DialogEvent {
    /// Snapshots a live dialog.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDialogKind` if the browser reports a type outside
    /// alert/confirm/prompt/beforeunload.
    pub fn snapshot<H: DialogHandle + ?Sized>(dialog: &H) -> Result<Self> {
        let kind = dialog.kind_name().parse::<DialogKind>()?;
        let default_value = match (kind, dialog.default_value()) {
            (DialogKind::Prompt, value) if !value.is_empty() => Some(value.to_string()),
            _ => None,
        };

        Ok(Self {
            kind,
            message: dialog.message().to_string(),
            default_value,
        })
    }
}

/// How a dialog was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "promptText", rename_all = "lowercase")]
pub enum Resolution {
    /// Clicked OK, optionally typing text into a prompt first
    Accept(Option<String>),
    /// Clicked Cancel (or closed the alert)
    Dismiss,
}

impl Resolution {
    pub fn is_accept(&self) -> bool {
        matches!(self, Resolution::Accept(_))
    }

    /// Text typed into the prompt, if any.
    pub fn prompt_text(&self) -> Option<&str> {
        match self {
            Resolution::Accept(text) => text.as_deref(),
            Resolution::Dismiss => None,
        }
    }
}

/// Post-resolution text of a result element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "camelCase")]
pub enum ResultText {
    /// The element is visible and has non-empty text
    Shown(String),
    /// The element exists but is hidden or was never populated
    NotShown,
}

impl ResultText {
    /// Returns the text when shown.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResultText::Shown(text) => Some(text),
            ResultText::NotShown => None,
        }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, ResultText::Shown(_))
    }

    /// True when the element shows text containing `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.as_str().is_some_and(|text| text.contains(needle))
    }
}

/// Everything observed for one triggering action.
///
/// Owned by the harness and replaced wholesale on every new action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedResult {
    pub event: DialogEvent,
    pub resolution: Resolution,
    /// Result element text, once the harness has read it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_text: Option<ResultText>,
}

impl CapturedResult {
    pub fn new(event: DialogEvent, resolution: Resolution) -> Self {
        Self {
            event,
            resolution,
            result_text: None,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.event.kind
    }

    pub fn message(&self) -> &str {
        &self.event.message
    }

    /// Returns the stored result text, if it has been read.
    pub fn result_text(&self) -> Option<&ResultText> {
        self.result_text.as_ref()
    }
}

/// The operations the observer needs from a live browser dialog.
///
/// Implemented for `playwright_rs::protocol::Dialog`; unit tests provide
/// their own implementation.
#[async_trait]
pub trait DialogHandle: Send + Sync {
    /// Protocol type name ("alert", "confirm", "prompt", "beforeunload")
    fn kind_name(&self) -> &str;

    fn message(&self) -> &str;

    /// Default prompt value, empty when there is none
    fn default_value(&self) -> &str;

    async fn accept(&self, prompt_text: Option<&str>) -> Result<()>;

    async fn dismiss(&self) -> Result<()>;
}

#[async_trait]
impl DialogHandle for Dialog {
    fn kind_name(&self) -> &str {
        Dialog::type_(self)
    }

    fn message(&self) -> &str {
        Dialog::message(self)
    }

    fn default_value(&self) -> &str {
        Dialog::default_value(self)
    }

    async fn accept(&self, prompt_text: Option<&str>) -> Result<()> {
        Dialog::accept(self, prompt_text).await?;
        Ok(())
    }

    async fn dismiss(&self) -> Result<()> {
        Dialog::dismiss(self).await?;
        Ok(())
    }
}

/// A dialog that has been intercepted but not answered yet.
///
/// Enforces the exactly-once rule: a second `resolve` fails with
/// `DoubleResolution` instead of reaching the browser.
pub(crate) struct PendingDialog<'a, H: DialogHandle + ?Sized> {
    handle: &'a H,
    resolved: bool,
}

impl<'a, H: DialogHandle + ?Sized> PendingDialog<'a, H> {
    pub(crate) fn new(handle: &'a H) -> Self {
        Self {
            handle,
            resolved: false,
        }
    }

    pub(crate) async fn resolve(&mut self, resolution: &Resolution) -> Result<()> {
        if self.resolved {
            return Err(Error::DoubleResolution {
                message: self.handle.message().to_string(),
            });
        }
        // A failed round trip still consumes the dialog.
        self.resolved = true;

        match resolution {
            Resolution::Accept(text) => self.handle.accept(text.as_deref()).await,
            Resolution::Dismiss => self.handle.dismiss().await,
        }
    }
}

impl<H: DialogHandle + ?Sized> Drop for PendingDialog<'_, H> {
    fn drop(&mut self) {
        if !self.resolved {
            tracing::warn!(
                dialog_message = self.handle.message(),
                "Dialog dropped without being resolved; the page stays blocked"
            );
        }
    }
}
