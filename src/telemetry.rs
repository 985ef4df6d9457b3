//! Logging setup.

use crate::error::{Error, Result};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` directives are honoured; `level` sets the default for
/// everything else. Noisy HTTP plumbing is capped at `warn`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when `level` is not a valid level or a
/// subscriber is already installed.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = build_filter(level)?;

    let installed = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
    };
    installed.map_err(|err| Error::Configuration(format!("logging already initialised: {err}")))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    let default_level = Level::from_str(level.trim())
        .map_err(|_| Error::Configuration(format!("invalid log level: {level}")))?;

    let mut filter = EnvFilter::from_default_env().add_directive(default_level.into());
    for directive in ["hyper=warn", "tower=warn", "r2d2=warn"] {
        let parsed = directive
            .parse()
            .map_err(|err| Error::Configuration(format!("invalid log directive {directive}: {err}")))?;
        filter = filter.add_directive(parsed);
    }
    Ok(filter)
}
