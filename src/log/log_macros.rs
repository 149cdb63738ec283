//! Simple, leveled logging macros for `Logger` and `LoggerHandle`.
//!
//! # Feature Flags
//! Specific log levels are controlled by cargo features:
//! `log-trace`, `log-debug`, `log-info`, `log-warn`, `log-error`.
//!
//! If a feature is disabled, the corresponding macros expand to `()`, removing
//! all formatting and allocation overhead at compile time. Critical records
//! are never compiled out.
//!
//! ```ignore
//! log_info!(logger, LogClass::KERNEL, "thread {} created", tid);
//! handle_warn!(kernel_log, "stack low: {} bytes", left);
//! ```

// ============================================================================
// 1. GENERIC INTERNAL MACROS (The "Workers")
// ============================================================================
// The message is only formatted once the record is known to pass.

#[macro_export]
macro_rules! logger_log {
    ($logger:expr, $class:expr, $lvl:expr, $($arg:tt)*) => {{
        let __logger = &$logger;
        let __class = $class;
        let __lvl = $lvl;
        if __logger.should_log(__class, __lvl) {
            __logger.emit(__class, __lvl, format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! handle_log {
    ($handle:expr, $lvl:expr, $($arg:tt)*) => {{
        let __handle = &$handle;
        let __lvl = $lvl;
        if __handle.enabled(__lvl) {
            __handle.log(__lvl, format!($($arg)*));
        }
    }};
}

// ============================================================================
// 2. LEVEL-SPECIFIC MACROS (Feature Gated)
// ============================================================================

// ---------------------- TRACE ----------------------
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! log_trace    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Trace, $($arg)*) } }
#[cfg(feature = "log-trace")]
#[macro_export]
macro_rules! handle_trace { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Trace, $($arg)*) } }

#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-trace"))]
#[macro_export]
macro_rules! handle_trace {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- DEBUG ----------------------
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! log_debug    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Debug, $($arg)*) } }
#[cfg(feature = "log-debug")]
#[macro_export]
macro_rules! handle_debug { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Debug, $($arg)*) } }

#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-debug"))]
#[macro_export]
macro_rules! handle_debug {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- INFO ----------------------
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! log_info    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Info, $($arg)*) } }
#[cfg(feature = "log-info")]
#[macro_export]
macro_rules! handle_info { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Info, $($arg)*) } }

#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-info"))]
#[macro_export]
macro_rules! handle_info {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- WARN ----------------------
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! log_warn    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Warn, $($arg)*) } }
#[cfg(feature = "log-warn")]
#[macro_export]
macro_rules! handle_warn { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Warn, $($arg)*) } }

#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-warn"))]
#[macro_export]
macro_rules! handle_warn {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- ERROR ----------------------
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! log_error    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Error, $($arg)*) } }
#[cfg(feature = "log-error")]
#[macro_export]
macro_rules! handle_error { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Error, $($arg)*) } }

#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        ()
    };
}
#[cfg(not(feature = "log-error"))]
#[macro_export]
macro_rules! handle_error {
    ($($arg:tt)*) => {
        ()
    };
}

// ---------------------- CRITICAL ----------------------
#[macro_export]
macro_rules! log_critical    { ($logger:expr, $class:expr, $($arg:tt)*) => { $crate::logger_log!($logger, $class, $crate::log::log_level::LogLevel::Critical, $($arg)*) } }
#[macro_export]
macro_rules! handle_critical { ($handle:expr, $($arg:tt)*) => { $crate::handle_log!($handle, $crate::log::log_level::LogLevel::Critical, $($arg)*) } }
