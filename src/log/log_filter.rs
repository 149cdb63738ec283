use std::sync::atomic::{AtomicU8, Ordering};

use crate::log::{
    log_class::{LOG_CLASS_COUNT, LogClass},
    log_level::LogLevel,
};

/// Per-subsystem minimum severity.
///
/// Every class starts fully open (`Trace`) except the file server, which is
/// chatty enough to start silenced. Slots are atomics so thresholds can be
/// changed while other threads are emitting.
pub struct LogFilter {
    levels: [AtomicU8; LOG_CLASS_COUNT],
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFilter {
    #[must_use]
    pub fn new() -> Self {
        let filter = Self {
            levels: std::array::from_fn(|_| AtomicU8::new(LogLevel::Trace.as_u8())),
        };
        filter.set_minimum(LogClass::SERVICE_EFSRV, LogLevel::Off);
        filter
    }

    /// Sets the threshold for `class`. Returns `false`, changing nothing,
    /// when `class` is not a known subsystem.
    pub fn set_minimum(&self, class: LogClass, level: LogLevel) -> bool {
        match class.index() {
            Some(i) => {
                self.levels[i].store(level.as_u8(), Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn minimum(&self, class: LogClass) -> Option<LogLevel> {
        class
            .index()
            .map(|i| LogLevel::from_u8(self.levels[i].load(Ordering::Relaxed)))
    }

    /// True iff `class` is known and `level` reaches its threshold.
    /// Unknown classes never pass.
    #[must_use]
    pub fn passes(&self, class: LogClass, level: LogLevel) -> bool {
        // `Off` is a threshold, not a severity a record can carry.
        level != LogLevel::Off && self.minimum(class).is_some_and(|min| level >= min)
    }
}
