pub mod console_sink;
pub mod debug_sink;
pub mod display_surface;
pub mod file_sink;
pub mod gui_sink;
pub mod log_class;
pub mod log_filter;
pub mod log_level;
pub mod log_macros;
pub mod log_msg;
pub mod log_sink;
pub mod logger;
pub mod logger_handle;
pub mod pattern;
pub mod setup;
pub mod sink_error;
pub mod time_utils;

pub use display_surface::{DisplaySurface, LogBuffer};
pub use log_class::{LogClass, long_name_of, name_of};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use logger_handle::LoggerHandle;
pub use setup::{is_setup, logger, setup, setup_with_config};
