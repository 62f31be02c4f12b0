// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Harness configuration
//
// Options for launching the browser and timing dialog waits. Values come
// from builder calls or from ALERTS_E2E_* environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Environment variable holding the application base URL
pub const ENV_BASE_URL: &str = "ALERTS_E2E_BASE_URL";
/// Environment variable selecting the browser (`chromium`, `firefox`, `webkit`)
pub const ENV_BROWSER: &str = "ALERTS_E2E_BROWSER";
/// Environment variable that, when truthy, runs the browser headed
pub const ENV_HEADED: &str = "ALERTS_E2E_HEADED";
/// Environment variable overriding the dialog timeout in milliseconds
pub const ENV_DIALOG_TIMEOUT_MS: &str = "ALERTS_E2E_DIALOG_TIMEOUT_MS";
/// Environment variable overriding the delayed-dialog timeout in milliseconds
pub const ENV_DELAYED_TIMEOUT_MS: &str = "ALERTS_E2E_DELAYED_TIMEOUT_MS";

/// Default wait for a dialog raised directly by a click
pub const DEFAULT_DIALOG_TIMEOUT: Duration = Duration::from_secs(5);

/// Default wait for the timer alert (raised ~5s after its click)
pub const DEFAULT_DELAYED_DIALOG_TIMEOUT: Duration = Duration::from_secs(8);

/// Shortest accepted delayed-dialog timeout
pub const MIN_DELAYED_DIALOG_TIMEOUT: Duration = Duration::from_secs(6);

/// Default navigation timeout, matching Playwright's 30s default
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser engine to launch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!(
                "{ENV_BROWSER}: unknown browser '{other}' (expected chromium, firefox or webkit)"
            ))),
        }
    }
}

/// Harness configuration
///
/// All fields have defaults; `base_url` stays unset unless configured, in
/// which case integration tests serve a local copy of the alerts page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarnessConfig {
    /// Base URL of the application under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Browser engine
    pub browser: BrowserKind,

    /// Run without a visible window
    pub headless: bool,

    /// Wait for dialogs raised directly by an action
    #[serde(with = "millis")]
    pub dialog_timeout: Duration,

    /// Wait for dialogs raised on a timer
    #[serde(with = "millis")]
    pub delayed_dialog_timeout: Duration,

    /// Page navigation timeout
    #[serde(with = "millis")]
    pub navigation_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            browser: BrowserKind::default(),
            headless: true,
            dialog_timeout: DEFAULT_DIALOG_TIMEOUT,
            delayed_dialog_timeout: DEFAULT_DELAYED_DIALOG_TIMEOUT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Creates a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from `ALERTS_E2E_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Config` for malformed values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = Some(url.trim().to_string());
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            config.browser = browser.parse()?;
        }
        if let Some(headed) = lookup(ENV_HEADED) {
            config.headless = !parse_flag(ENV_HEADED, &headed)?;
        }
        if let Some(ms) = lookup(ENV_DIALOG_TIMEOUT_MS) {
            config.dialog_timeout = parse_millis(ENV_DIALOG_TIMEOUT_MS, &ms)?;
        }
        if let Some(ms) = lookup(ENV_DELAYED_TIMEOUT_MS) {
            config.delayed_dialog_timeout = parse_millis(ENV_DELAYED_TIMEOUT_MS, &ms)?;
        }

        config.validate()?;
        tracing::debug!(
            config = %serde_json::to_string(&config).unwrap_or_default(),
            "Harness configuration loaded"
        );
        Ok(config)
    }

    /// Sets the application base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the browser engine
    pub fn browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    /// Runs headless or headed
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Sets the wait for immediate dialogs
    pub fn dialog_timeout(mut self, timeout: Duration) -> Self {
        self.dialog_timeout = timeout;
        self
    }

    /// Sets the wait for the timer alert
    pub fn delayed_dialog_timeout(mut self, timeout: Duration) -> Self {
        self.delayed_dialog_timeout = timeout;
        self
    }

    /// Sets the navigation timeout
    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Checks URL syntax and timeout bounds.
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base_url {
            parse_base_url(base)?;
        }
        if self.dialog_timeout.is_zero() {
            return Err(Error::Config("dialog timeout must be positive".to_string()));
        }
        if self.delayed_dialog_timeout < MIN_DELAYED_DIALOG_TIMEOUT {
            return Err(Error::Config(format!(
                "delayed dialog timeout must be at least {}ms, got {}ms",
                MIN_DELAYED_DIALOG_TIMEOUT.as_millis(),
                self.delayed_dialog_timeout.as_millis()
            )));
        }
        Ok(())
    }

    /// Resolves `path` against the configured base URL, or `fallback` when
    /// none is configured.
    pub fn resolve_url(&self, fallback: &str, path: &str) -> Result<String> {
        let base = self.base_url.as_deref().unwrap_or(fallback);
        join_url(base, path)
    }
}

/// Joins `path` onto `base`, treating `base` as a directory.
pub fn join_url(base: &str, path: &str) -> Result<String> {
    let base = parse_base_url(base)?;
    base.join(path.trim_start_matches('/'))
        .map(String::from)
        .map_err(|e| Error::Config(format!("cannot join '{path}' onto '{base}': {e}")))
}

fn parse_base_url(base: &str) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| Error::Config(format!("invalid base URL '{base}': {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}

fn parse_millis(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| Error::Config(format!("{key}: expected milliseconds, got '{value}': {e}")))
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = HarnessConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert!(config.headless);
        assert_eq!(config.browser, BrowserKind::Chromium);
        assert!(config.delayed_dialog_timeout >= MIN_DELAYED_DIALOG_TIMEOUT);
    }

    #[test]
    fn test_environment_overrides() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://demoqa.com"),
            (ENV_BROWSER, "Firefox"),
            (ENV_HEADED, "true"),
            (ENV_DIALOG_TIMEOUT_MS, "2500"),
            (ENV_DELAYED_TIMEOUT_MS, "7000"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("https://demoqa.com"));
        assert_eq!(config.browser, BrowserKind::Firefox);
        assert!(!config.headless);
        assert_eq!(config.dialog_timeout, Duration::from_millis(2500));
        assert_eq!(config.delayed_dialog_timeout, Duration::from_millis(7000));
    }

    #[test]
    fn test_blank_values_are_treated_as_unset() {
        let config = HarnessConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, ""),
            (ENV_BROWSER, "  "),
            (ENV_HEADED, ""),
            (ENV_DIALOG_TIMEOUT_MS, " "),
        ]))
        .unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_rejects_short_delayed_timeout() {
        let err = HarnessConfig::from_lookup(lookup(&[(ENV_DELAYED_TIMEOUT_MS, "5000")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("at least 6000ms")));
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(HarnessConfig::from_lookup(lookup(&[(ENV_BROWSER, "lynx")])).is_err());
        assert!(HarnessConfig::from_lookup(lookup(&[(ENV_HEADED, "maybe")])).is_err());
        assert!(HarnessConfig::from_lookup(lookup(&[(ENV_DIALOG_TIMEOUT_MS, "soon")])).is_err());
        assert!(HarnessConfig::from_lookup(lookup(&[(ENV_BASE_URL, "not a url")])).is_err());
    }

    #[test]
    fn test_resolve_url_treats_base_as_directory() {
        let config = HarnessConfig::new().base_url("https://demoqa.com");
        assert_eq!(
            config.resolve_url("http://127.0.0.1:1", "/alerts").unwrap(),
            "https://demoqa.com/alerts"
        );

        let nested = HarnessConfig::new().base_url("http://localhost:8080/demo");
        assert_eq!(
            nested.resolve_url("http://127.0.0.1:1", "alerts").unwrap(),
            "http://localhost:8080/demo/alerts"
        );

        let fallback = HarnessConfig::new();
        assert_eq!(
            fallback.resolve_url("http://127.0.0.1:4000", "alerts").unwrap(),
            "http://127.0.0.1:4000/alerts"
        );
    }

    #[test]
    fn test_serializes_timeouts_as_millis() {
        let json = serde_json::to_value(HarnessConfig::default()).unwrap();
        assert_eq!(json["dialogTimeout"], 5000);
        assert_eq!(json["delayedDialogTimeout"], 8000);
        assert_eq!(json["browser"], "chromium");
        assert!(json.get("baseUrl").is_none());
    }
}
