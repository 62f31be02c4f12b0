// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Response policy: how the observer answers the next dialog

use crate::dialog::{DialogKind, Resolution};
use serde::{Deserialize, Serialize};

/// Whether to click OK or Cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    #[default]
    Accept,
    Dismiss,
}

/// Configured answer for dialogs raised by one triggering action.
///
/// `input_text` is only typed when the mode is `Accept` and the dialog is a
/// prompt; every other combination ignores it.
///
/// # Example
///
/// ```ignore
/// use alerts_e2e::ResponsePolicy;
///
/// let ok = ResponsePolicy::accept();
/// let cancel = ResponsePolicy::dismiss();
/// let named = ResponsePolicy::accept_with_text("John Doe");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePolicy {
    pub mode: ResponseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

impl ResponsePolicy {
    /// Accepts every dialog without typing anything.
    pub fn accept() -> Self {
        Self {
            mode: ResponseMode::Accept,
            input_text: None,
        }
    }

    /// Dismisses every dialog.
    pub fn dismiss() -> Self {
        Self {
            mode: ResponseMode::Dismiss,
            input_text: None,
        }
    }

    /// Accepts, typing `text` into prompts.
    pub fn accept_with_text(text: impl Into<String>) -> Self {
        Self {
            mode: ResponseMode::Accept,
            input_text: Some(text.into()),
        }
    }

    /// Picks the resolution for a dialog of the given kind.
    pub fn resolution_for(&self, kind: DialogKind) -> Resolution {
        match (self.mode, kind, &self.input_text) {
            (ResponseMode::Accept, DialogKind::Prompt, Some(text)) => {
                Resolution::Accept(Some(text.clone()))
            }
            (ResponseMode::Accept, _, _) => Resolution::Accept(None),
            (ResponseMode::Dismiss, _, _) => Resolution::Dismiss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_only_reaches_prompts() {
        let policy = ResponsePolicy::accept_with_text("John Doe");

        assert_eq!(
            policy.resolution_for(DialogKind::Prompt),
            Resolution::Accept(Some("John Doe".to_string()))
        );
        assert_eq!(
            policy.resolution_for(DialogKind::Confirm),
            Resolution::Accept(None)
        );
        assert_eq!(
            policy.resolution_for(DialogKind::Alert),
            Resolution::Accept(None)
        );
    }

    #[test]
    fn test_dismiss_ignores_input_text() {
        let policy = ResponsePolicy {
            mode: ResponseMode::Dismiss,
            input_text: Some("ignored".to_string()),
        };
        assert_eq!(
            policy.resolution_for(DialogKind::Prompt),
            Resolution::Dismiss
        );
    }

    #[test]
    fn test_default_policy_accepts() {
        assert_eq!(ResponsePolicy::default(), ResponsePolicy::accept());
    }

    #[test]
    fn test_policy_deserializes_from_json() {
        let policy: ResponsePolicy =
            serde_json::from_str(r#"{"mode":"accept","inputText":"Test@123!#$%"}"#).unwrap();
        assert_eq!(policy, ResponsePolicy::accept_with_text("Test@123!#$%"));

        let policy: ResponsePolicy = serde_json::from_str(r#"{"mode":"dismiss"}"#).unwrap();
        assert_eq!(policy, ResponsePolicy::dismiss());
    }
}
