// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Shared setup for integration tests

#![allow(dead_code)]

use std::sync::Once;

static TRACING: Once = Once::new();

/// Installs a fmt subscriber once per test binary, filtered by RUST_LOG.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("alerts_e2e=info")),
            )
            .with_test_writer()
            .try_init();
    });
}
