use std::{
    io::{self, IsTerminal, Write},
    sync::{Mutex, PoisonError},
};

use crate::log::{
    log_level::LogLevel,
    log_msg::{FormattedRecord, LogMsg},
    log_sink::LogSink,
    sink_error::SinkError,
};

const RESET: &str = "\x1b[0m";

/// ANSI color used for the `%^ ... %$` span of a record.
#[must_use]
pub const fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "\x1b[37m",
        LogLevel::Debug => "\x1b[36m",
        LogLevel::Info => "\x1b[32m",
        LogLevel::Warn => "\x1b[33m\x1b[1m",
        LogLevel::Error => "\x1b[31m\x1b[1m",
        LogLevel::Critical => "\x1b[1m\x1b[41m",
        LogLevel::Off => "",
    }
}

/// Colorized line output, stdout by default.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    color: bool,
}

impl ConsoleSink {
    /// Writes to stdout; colors only when stdout is a terminal.
    #[must_use]
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal();
        Self::with_writer(Box::new(io::stdout()), color)
    }

    #[must_use]
    pub fn with_writer(out: Box<dyn Write + Send>, color: bool) -> Self {
        Self {
            out: Mutex::new(out),
            color,
        }
    }

    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    fn render(&self, msg: &LogMsg, formatted: &FormattedRecord) -> String {
        let text = &formatted.text;
        let mut line = String::with_capacity(text.len() + 16);
        match formatted.color_range.clone() {
            Some(r) if self.color && msg.level != LogLevel::Off && r.end <= text.len() => {
                line.push_str(&text[..r.start]);
                line.push_str(level_color(msg.level));
                line.push_str(&text[r.clone()]);
                line.push_str(RESET);
                line.push_str(&text[r.end..]);
            }
            _ => line.push_str(text),
        }
        line.push('\n');
        line
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn log(&self, msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
        let line = self.render(msg, formatted);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_class::LogClass, pattern::Pattern};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record(level: LogLevel, text: &str) -> (LogMsg, FormattedRecord) {
        let msg = LogMsg::new(level, LogClass::CPU, text, 0);
        let rec = Pattern::default().format(&msg, "emu");
        (msg, rec)
    }

    #[test]
    fn colored_output_wraps_color_span() {
        let buf = SharedBuf::default();
        let sink = ConsoleSink::with_writer(Box::new(buf.clone()), true);
        let (msg, rec) = record(LogLevel::Error, "bad opcode");
        sink.log(&msg, &rec).unwrap();
        assert_eq!(
            buf.contents(),
            format!("E {}bad opcode{}\n", level_color(LogLevel::Error), RESET)
        );
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let buf = SharedBuf::default();
        let sink = ConsoleSink::with_writer(Box::new(buf.clone()), false);
        let (msg, rec) = record(LogLevel::Info, "ready");
        sink.log(&msg, &rec).unwrap();
        sink.flush().unwrap();
        assert_eq!(buf.contents(), "I ready\n");
    }

    #[test]
    fn write_failure_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let sink = ConsoleSink::with_writer(Box::new(Broken), false);
        let (msg, rec) = record(LogLevel::Info, "x");
        assert!(matches!(sink.log(&msg, &rec), Err(SinkError::Io(_))));
    }
}
