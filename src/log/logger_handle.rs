use std::sync::Arc;

use crate::log::{log_class::LogClass, log_level::LogLevel, logger::Logger};

/// Lightweight, cloneable handle to the process logger, bound to one
/// subsystem.
///
/// Components receive one of these instead of reaching for a global, so the
/// class tag is fixed where the component is wired up.
///
/// # Examples
/// ```ignore
/// let kernel_log = LoggerHandle::new(logger.clone(), LogClass::KERNEL);
/// kernel_log.log(LogLevel::Info, "scheduler started");
/// ```
#[derive(Clone)]
pub struct LoggerHandle {
    logger: Arc<Logger>,
    class: LogClass,
}

impl LoggerHandle {
    #[must_use]
    pub fn new(logger: Arc<Logger>, class: LogClass) -> Self {
        Self { logger, class }
    }

    /// Same logger, different subsystem tag.
    #[must_use]
    pub fn for_class(&self, class: LogClass) -> Self {
        Self {
            logger: self.logger.clone(),
            class,
        }
    }

    #[must_use]
    pub fn class(&self) -> LogClass {
        self.class
    }

    #[must_use]
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.logger.should_log(self.class, level)
    }

    #[inline]
    pub fn log<S: Into<String>>(&self, level: LogLevel, text: S) {
        self.logger.emit(self.class, level, text);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::display_surface::{DisplaySurface, LogBuffer};

    fn logger_with_buffer(file: &str) -> (Arc<Logger>, Arc<LogBuffer>) {
        let buf = Arc::new(LogBuffer::default());
        let surface: Arc<dyn DisplaySurface> = buf.clone();
        let path = std::env::temp_dir()
            .join(format!("emulog-handle-{}", std::process::id()))
            .join(file);
        let logger = Logger::builder()
            .file_path(path)
            .console_writer(Box::new(std::io::sink()), false)
            .platform_debug(false)
            .pattern("[%c] %v")
            .display_surface(Some(surface))
            .build();
        (Arc::new(logger), buf)
    }

    #[test]
    fn handle_tags_records_with_its_class() {
        let (logger, buf) = logger_with_buffer("tags.log");
        let kernel = LoggerHandle::new(logger, LogClass::KERNEL);
        let cpu = kernel.for_class(LogClass::CPU);

        kernel.log(LogLevel::Info, "thread created");
        cpu.log(LogLevel::Debug, "pc=0x8000");

        assert_eq!(buf.snapshot(), vec!["[kernel] thread created", "[cpu] pc=0x8000"]);
        assert_eq!(cpu.class(), LogClass::CPU);
    }

    #[test]
    fn enabled_reflects_filters() {
        let (logger, buf) = logger_with_buffer("enabled.log");
        let fs = LoggerHandle::new(logger.clone(), LogClass::SERVICE_EFSRV);

        assert!(!fs.enabled(LogLevel::Error));
        fs.log(LogLevel::Error, "hidden");
        assert!(buf.is_empty());

        assert!(logger.set_minimum_level(LogClass::SERVICE_EFSRV, LogLevel::Warn));
        assert!(fs.enabled(LogLevel::Warn));
        assert!(!fs.enabled(LogLevel::Info));
    }
}
