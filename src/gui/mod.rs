//! The `gui` module hosts the egui side of logging: a log window that acts as
//! the logger's display surface, and the small viewer app around it.

pub mod log_viewer_app;
pub mod log_window;
