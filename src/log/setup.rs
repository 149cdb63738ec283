//! Process-wide logger lifecycle.
//!
//! The first call to [`setup`] (or [`setup_with_config`]) builds the logger
//! and stores it for the rest of the process; there is no teardown. Later
//! calls do nothing and hand back the logger that already exists, so the
//! surface or config passed to them is ignored.
//!
//! Code that wants an isolated instance (tests, embedders) should use
//! [`Logger::builder`] directly instead.

use std::sync::{Arc, OnceLock};

use crate::{
    config::LogConfig,
    log::{display_surface::DisplaySurface, logger::Logger},
};

static LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

/// Sets up the process logger with default settings.
///
/// Replaces any previous `emulog.log` in the working directory, installs the
/// console, file and (when available) platform debug sinks, plus a display
/// sink when `surface` is given.
pub fn setup(surface: Option<Arc<dyn DisplaySurface>>) -> Arc<Logger> {
    setup_with_config(&LogConfig::default(), surface)
}

/// Same as [`setup`] with settings taken from `config`.
pub fn setup_with_config(
    config: &LogConfig,
    surface: Option<Arc<dyn DisplaySurface>>,
) -> Arc<Logger> {
    LOGGER
        .get_or_init(|| Arc::new(config.builder().display_surface(surface).build()))
        .clone()
}

#[must_use]
pub fn is_setup() -> bool {
    LOGGER.get().is_some()
}

/// The process logger, if [`setup`] has run.
#[must_use]
pub fn logger() -> Option<Arc<Logger>> {
    LOGGER.get().cloned()
}
