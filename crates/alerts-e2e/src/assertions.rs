// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Assertions over captured dialogs and result text
//
// Same shape as playwright's expect() API, but evaluated once: the capture
// is already final when these run, so there is nothing to poll.

use crate::dialog::{CapturedResult, DialogKind, Resolution, ResultText};
use crate::error::{Error, Result};

/// Creates an expectation over a captured dialog.
///
/// # Example
///
/// ```ignore
/// use alerts_e2e::{expect_dialog, DialogKind};
///
/// expect_dialog(&captured).to_have_kind(DialogKind::Alert)?;
/// expect_dialog(&captured).to_contain_message("You clicked a button")?;
/// ```
pub fn expect_dialog(captured: &CapturedResult) -> DialogExpectation<'_> {
    DialogExpectation {
        captured,
        negate: false,
    }
}

/// Creates an expectation over result-element text.
pub fn expect_text(text: &ResultText) -> TextExpectation<'_> {
    TextExpectation {
        text,
        negate: false,
    }
}

fn check(passed: bool, negate: bool, message: impl FnOnce() -> String) -> Result<()> {
    if passed != negate {
        Ok(())
    } else {
        Err(Error::AssertionFailed(message()))
    }
}

fn not_word(negate: bool) -> &'static str {
    if negate { " NOT" } else { "" }
}

pub struct DialogExpectation<'a> {
    captured: &'a CapturedResult,
    negate: bool,
}

// Assertions consume the expectation, like playwright's `expect()`
#[allow(clippy::wrong_self_convention)]
impl DialogExpectation<'_> {
    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    pub fn to_have_kind(self, expected: DialogKind) -> Result<()> {
        let actual = self.captured.kind();
        check(actual == expected, self.negate, || {
            format!(
                "Expected dialog{} to be '{}', but it was '{}'",
                not_word(self.negate),
                expected,
                actual
            )
        })
    }

    /// Substring match on the dialog message.
    pub fn to_contain_message(self, expected: &str) -> Result<()> {
        let actual = self.captured.message();
        check(actual.contains(expected), self.negate, || {
            format!(
                "Expected dialog message{} to contain '{}', but it was '{}'",
                not_word(self.negate),
                expected,
                actual
            )
        })
    }

    pub fn to_be_resolved_with(self, expected: &Resolution) -> Result<()> {
        let actual = &self.captured.resolution;
        check(actual == expected, self.negate, || {
            format!(
                "Expected dialog{} to be resolved with {:?}, but it was {:?}",
                not_word(self.negate),
                expected,
                actual
            )
        })
    }
}

pub struct TextExpectation<'a> {
    text: &'a ResultText,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl TextExpectation<'_> {
    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Passes when the element is shown and its text contains `expected`.
    ///
    /// Negated, it passes when the element is not shown, or is shown with text
    /// that does not contain `expected`.
    pub fn to_contain(self, expected: &str) -> Result<()> {
        check(self.text.contains(expected), self.negate, || {
            format!(
                "Expected result text{} to contain '{}', but it was {}",
                not_word(self.negate),
                expected,
                describe(self.text)
            )
        })
    }

    pub fn to_be_shown(self) -> Result<()> {
        check(self.text.is_shown(), self.negate, || {
            format!(
                "Expected result text{} to be shown, but it was {}",
                not_word(self.negate),
                describe(self.text)
            )
        })
    }
}

fn describe(text: &ResultText) -> String {
    match text {
        ResultText::Shown(text) => format!("'{text}'"),
        ResultText::NotShown => "not shown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogEvent;

    fn confirm(resolution: Resolution) -> CapturedResult {
        CapturedResult::new(
            DialogEvent {
                kind: DialogKind::Confirm,
                message: "Do you confirm action?".to_string(),
                default_value: None,
            },
            resolution,
        )
    }

    #[test]
    fn test_dialog_expectations() {
        let captured = confirm(Resolution::Dismiss);

        expect_dialog(&captured).to_have_kind(DialogKind::Confirm).unwrap();
        expect_dialog(&captured).not().to_have_kind(DialogKind::Prompt).unwrap();
        expect_dialog(&captured).to_contain_message("confirm").unwrap();
        expect_dialog(&captured)
            .to_be_resolved_with(&Resolution::Dismiss)
            .unwrap();
    }

    #[test]
    fn test_failure_messages_name_both_sides() {
        let captured = confirm(Resolution::Accept(None));

        let err = expect_dialog(&captured)
            .to_have_kind(DialogKind::Alert)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed: Expected dialog to be 'alert', but it was 'confirm'"
        );

        let err = expect_dialog(&captured)
            .not()
            .to_contain_message("confirm")
            .unwrap_err();
        assert!(err.to_string().contains("NOT to contain 'confirm'"));
    }

    #[test]
    fn test_text_expectations() {
        let shown = ResultText::Shown("You entered Test@123!#$%".to_string());
        expect_text(&shown).to_contain("Test@123!#$%").unwrap();
        expect_text(&shown).to_be_shown().unwrap();

        let hidden = ResultText::NotShown;
        expect_text(&hidden).not().to_contain("Test User").unwrap();
        expect_text(&hidden).not().to_be_shown().unwrap();

        expect_text(&shown).not().to_contain("John Doe").unwrap();

        let err = expect_text(&hidden).to_contain("John Doe").unwrap_err();
        assert!(err.to_string().ends_with("but it was not shown"));
    }
}
