// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Stderr logging via `tracing-subscriber`. `RUST_LOG` wins over `--verbose`.

use anyhow::{Result, anyhow};
use std::io;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CRATES: [&str; 4] = ["docket_cli", "docket_app", "docket_api", "docket_db"];

pub fn level_for(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

pub fn init(verbose: bool) -> Result<()> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(verbose)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(level_for(verbose)))
        .with(layer)
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Our crates at `level`, everything else at warn.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    let mut directives = vec!["warn".to_owned()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}
