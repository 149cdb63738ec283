use std::{
    io::Write,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicU8, Ordering},
    },
};

use crate::log::{
    console_sink::ConsoleSink,
    debug_sink::PlatformDebugSink,
    display_surface::DisplaySurface,
    file_sink::{DEFAULT_LOG_FILE, FileSink},
    gui_sink::GuiSink,
    log_class::LogClass,
    log_filter::LogFilter,
    log_level::LogLevel,
    log_msg::LogMsg,
    log_sink::LogSink,
    pattern::{DEFAULT_PATTERN, Pattern},
    sink_error::SinkError,
};

/// Runs one sink call, turning a panic inside the sink into
/// [`SinkError::Panicked`]. Sinks recover their own poisoned locks, so the
/// sink stays usable for later records.
fn guarded<F>(call: F) -> Result<(), SinkError>
where
    F: FnOnce() -> Result<(), SinkError>,
{
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or(Err(SinkError::Panicked))
}

/// Receives failures of the logging machinery itself (sink I/O errors,
/// fallbacks). It must not log through the logger it is installed on.
pub type ErrorHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Name used for `%n` when none is configured.
pub const DEFAULT_LOGGER_NAME: &str = "emulog";

fn stderr_error_handler() -> ErrorHandler {
    Arc::new(|msg: &str| eprintln!("emulog error: {msg}"))
}

/// Multi-sink logger with per-subsystem filtering.
///
/// A record is checked against the global gate, then the per-class
/// [`LogFilter`]; if it passes it is formatted once and handed to every sink
/// in registration order. Sink failures go to the error handler and never
/// stop delivery to the other sinks.
///
/// # Architecture
///
/// 1. **Producers**: any thread calls [`emit`](Self::emit), directly or via a
///    macro or a [`LoggerHandle`](crate::log::logger_handle::LoggerHandle).
/// 2. **Gate**: global minimum level, then the per-class table.
/// 3. **Format**: the configured [`Pattern`], once per record.
/// 4. **Fan-out**: display, console, file and platform sinks, each under its
///    own lock. A sink that panics is reported like a failing one.
/// 5. **Flush policy**: records at or above `flush_on` flush every sink
///    before returning.
pub struct Logger {
    name: String,
    sinks: Vec<Arc<dyn LogSink>>,
    gui_sink: Option<Arc<GuiSink>>,
    file_path: Option<PathBuf>,
    filter: LogFilter,
    pattern: RwLock<Pattern>,
    level: AtomicU8,
    flush_on: AtomicU8,
    error_handler: ErrorHandler,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Cheap pre-check: would a record of `level` for `class` be delivered?
    ///
    /// Lets callers skip building the message when it would be dropped.
    #[must_use]
    pub fn should_log(&self, class: LogClass, level: LogLevel) -> bool {
        level >= self.level() && self.filter.passes(class, level)
    }

    /// Formats and delivers one record. Never fails, and neither sink errors
    /// nor sink panics escape it.
    pub fn emit<S: Into<String>>(&self, class: LogClass, level: LogLevel, text: S) {
        if !self.should_log(class, level) {
            return;
        }

        let msg = LogMsg::now(level, class, text);
        let formatted = self
            .pattern
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .format(&msg, &self.name);

        for sink in &self.sinks {
            if let Err(e) = guarded(|| sink.log(&msg, &formatted)) {
                self.report(&format!("{}: {}", sink.name(), e));
            }
        }

        if level >= self.flush_on() {
            self.flush();
        }
    }

    /// Flushes every sink, reporting failures to the error handler.
    pub fn flush(&self) {
        for sink in &self.sinks {
            if let Err(e) = guarded(|| sink.flush()) {
                self.report(&format!("{}: flush failed: {}", sink.name(), e));
            }
        }
    }

    /// Sets the threshold for one subsystem. `false` for unknown classes.
    pub fn set_minimum_level(&self, class: LogClass, level: LogLevel) -> bool {
        self.filter.set_minimum(class, level)
    }

    #[must_use]
    pub fn minimum_level(&self, class: LogClass) -> Option<LogLevel> {
        self.filter.minimum(class)
    }

    #[must_use]
    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    /// Global gate applied before the per-class table.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_flush_on(&self, level: LogLevel) {
        self.flush_on.store(level.as_u8(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn flush_on(&self) -> LogLevel {
        LogLevel::from_u8(self.flush_on.load(Ordering::Relaxed))
    }

    pub fn set_pattern(&self, pattern: &str) {
        *self.pattern.write().unwrap_or_else(PoisonError::into_inner) = Pattern::new(pattern);
    }

    #[must_use]
    pub fn pattern(&self) -> String {
        self.pattern
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_str()
            .to_string()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display bridge, present only when a surface was supplied.
    #[must_use]
    pub fn gui_sink(&self) -> Option<&Arc<GuiSink>> {
        self.gui_sink.as_ref()
    }

    /// Path of the log file, `None` if output fell back to a discard sink.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    fn report(&self, msg: &str) {
        (self.error_handler)(msg);
    }
}

/// Where console output goes.
enum ConsoleTarget {
    Stdout { color: Option<bool> },
    Writer { out: Box<dyn Write + Send>, color: bool },
}

/// Builds a [`Logger`]. Console and file sinks are always installed.
pub struct LoggerBuilder {
    name: String,
    file_path: PathBuf,
    console: ConsoleTarget,
    platform_debug: bool,
    surface: Option<Arc<dyn DisplaySurface>>,
    force_clear: bool,
    extra_sinks: Vec<Arc<dyn LogSink>>,
    pattern: String,
    level: LogLevel,
    flush_on: LogLevel,
    class_levels: Vec<(LogClass, LogLevel)>,
    error_handler: ErrorHandler,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            file_path: PathBuf::from(DEFAULT_LOG_FILE),
            console: ConsoleTarget::Stdout { color: None },
            platform_debug: true,
            surface: None,
            force_clear: false,
            extra_sinks: Vec::new(),
            pattern: DEFAULT_PATTERN.to_string(),
            level: LogLevel::Trace,
            flush_on: LogLevel::Debug,
            class_levels: Vec::new(),
            error_handler: stderr_error_handler(),
        }
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Log file path; any existing file there is replaced.
    #[must_use]
    pub fn file_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file_path = path.as_ref().to_path_buf();
        self
    }

    /// Forces console colors on or off; by default they follow whether
    /// stdout is a terminal.
    #[must_use]
    pub fn console_color(mut self, color: bool) -> Self {
        if let ConsoleTarget::Stdout { color: c } = &mut self.console {
            *c = Some(color);
        }
        self
    }

    /// Sends console output to `out` instead of stdout.
    #[must_use]
    pub fn console_writer(mut self, out: Box<dyn Write + Send>, color: bool) -> Self {
        self.console = ConsoleTarget::Writer { out, color };
        self
    }

    /// Installs the platform debug sink when the host has one (default on).
    #[must_use]
    pub fn platform_debug(mut self, enabled: bool) -> Self {
        self.platform_debug = enabled;
        self
    }

    #[must_use]
    pub fn display_surface(mut self, surface: Option<Arc<dyn DisplaySurface>>) -> Self {
        self.surface = surface;
        self
    }

    #[must_use]
    pub fn force_clear(mut self, force_clear: bool) -> Self {
        self.force_clear = force_clear;
        self
    }

    /// Appends a sink after the built-in ones.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.extra_sinks.push(sink);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn flush_on(mut self, level: LogLevel) -> Self {
        self.flush_on = level;
        self
    }

    /// Overrides one class threshold on top of the filter defaults.
    #[must_use]
    pub fn class_level(mut self, class: LogClass, level: LogLevel) -> Self {
        self.class_levels.push((class, level));
        self
    }

    #[must_use]
    pub fn error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = handler;
        self
    }

    /// Wires the sink set. Never fails: an unusable log file is reported to
    /// the error handler and replaced by a fallback.
    #[must_use]
    pub fn build(self) -> Logger {
        let mut sinks: Vec<Arc<dyn LogSink>> = Vec::new();

        let gui_sink = self.surface.as_ref().map(|surface| {
            let sink = Arc::new(GuiSink::new(surface));
            sink.set_force_clear(self.force_clear);
            sink
        });
        if let Some(sink) = &gui_sink {
            sinks.push(sink.clone());
        }

        let console = match self.console {
            ConsoleTarget::Stdout { color: None } => ConsoleSink::stdout(),
            ConsoleTarget::Stdout { color: Some(c) } => {
                ConsoleSink::with_writer(Box::new(std::io::stdout()), c)
            }
            ConsoleTarget::Writer { out, color } => ConsoleSink::with_writer(out, color),
        };
        sinks.push(Arc::new(console));

        let file = FileSink::create_or_fallback(&self.file_path, &*self.error_handler);
        let file_path = Some(file.path().to_path_buf()).filter(|p| !p.as_os_str().is_empty());
        sinks.push(Arc::new(file));

        if self.platform_debug {
            if let Some(debug) = PlatformDebugSink::new() {
                sinks.push(Arc::new(debug));
            }
        }

        sinks.extend(self.extra_sinks);

        let filter = LogFilter::new();
        for (class, level) in self.class_levels {
            if !filter.set_minimum(class, level) {
                (self.error_handler)(&format!("ignoring level for unknown class {class}"));
            }
        }

        Logger {
            name: self.name,
            sinks,
            gui_sink,
            file_path,
            filter,
            pattern: RwLock::new(Pattern::new(&self.pattern)),
            level: AtomicU8::new(self.level.as_u8()),
            flush_on: AtomicU8::new(self.flush_on.as_u8()),
            error_handler: self.error_handler,
        }
    }
}
