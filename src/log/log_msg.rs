use std::ops::Range;

use crate::log::{log_class::LogClass, log_level::LogLevel, time_utils};

/// Represents a single log message event.
///
/// This struct encapsulates the metadata associated with a log entry,
/// including its severity, timestamp, subsystem and the message content itself.
#[derive(Debug, Clone)]
pub struct LogMsg {
    /// The severity level of the log (e.g., Info, Warning, Error).
    pub level: LogLevel,
    /// The subsystem the record is tagged with.
    pub class: LogClass,
    /// The timestamp of the log event in milliseconds since the UNIX epoch.
    pub ts_ms: u128,
    /// The actual content or payload of the log message.
    pub text: String,
}

impl LogMsg {
    /// Creates a new `LogMsg` instance.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let msg = LogMsg::new(
    ///     LogLevel::Info,
    ///     LogClass::KERNEL,
    ///     "Thread created",
    ///     1678900000000
    /// );
    /// ```
    pub fn new(level: LogLevel, class: LogClass, text: impl Into<String>, ts_ms: u128) -> Self {
        Self {
            level,
            class,
            ts_ms,
            text: text.into(),
        }
    }

    /// Same as [`new`](Self::new), stamped with the current wall clock.
    pub fn now(level: LogLevel, class: LogClass, text: impl Into<String>) -> Self {
        Self::new(level, class, text, time_utils::now_millis())
    }
}

/// A record rendered through the logger's pattern.
///
/// `color_range` marks the byte span delimited by `%^ ... %$` so sinks that
/// support color can highlight it; the text itself never carries escapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub text: String,
    pub color_range: Option<Range<usize>>,
}

impl FormattedRecord {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color_range: None,
        }
    }
}
