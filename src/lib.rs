//! emulog is the diagnostic logging subsystem of an emulator host.
//!
//! Every emulator component reports through one process-wide [`log::Logger`],
//! tagging each record with the subsystem ([`log::LogClass`]) it comes from.
//! Records are filtered per subsystem and fanned out to a colorized console,
//! a log file recreated on every run, the host's debug channel where one
//! exists, and optionally a text surface owned by the GUI front-end.
//!
//! It provides one binary:
//! - `emulog_viewer`: an egui window hosting the in-application log display.

/// Loading of INI-style configuration files and the logger settings in them.
pub mod config;
/// egui front-end pieces that act as a display surface for the logger.
pub mod gui;
/// Logger, sinks, subsystem registry and filtering.
pub mod log;
