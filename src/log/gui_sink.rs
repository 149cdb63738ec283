use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use crate::log::{
    display_surface::DisplaySurface,
    log_msg::{FormattedRecord, LogMsg},
    log_sink::LogSink,
    sink_error::SinkError,
};

/// Forwards formatted lines to a host-owned [`DisplaySurface`].
///
/// The sink only keeps a weak reference: the host decides how long the
/// surface lives, and once it is gone records are silently skipped.
///
/// With force-clear enabled, every appended line is followed by exactly one
/// clear of the surface, so a bounded display is reset on every cycle
/// instead of growing. The clear is issued by the same `log` call that did
/// the append, so concurrent emitters each clear after their own line.
pub struct GuiSink {
    surface: Weak<dyn DisplaySurface>,
    force_clear: AtomicBool,
    // Lines appended while force-clear was off; the next forced flush clears them.
    pending: AtomicBool,
}

impl GuiSink {
    #[must_use]
    pub fn new(surface: &Arc<dyn DisplaySurface>) -> Self {
        Self {
            surface: Arc::downgrade(surface),
            force_clear: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    pub fn set_force_clear(&self, clear: bool) {
        self.force_clear.store(clear, Ordering::Relaxed);
    }

    #[must_use]
    pub fn force_clear(&self) -> bool {
        self.force_clear.load(Ordering::Relaxed)
    }

    /// False once the host has dropped its surface.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.strong_count() > 0
    }
}

impl LogSink for GuiSink {
    fn name(&self) -> &'static str {
        "display"
    }

    fn log(&self, _msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
        let Some(surface) = self.surface.upgrade() else {
            return Ok(());
        };
        surface.append(&formatted.text);

        if self.force_clear() {
            surface.clear();
        } else {
            self.pending.store(true, Ordering::Release);
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        if !self.force_clear() || !self.pending.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        if let Some(surface) = self.surface.upgrade() {
            surface.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_class::LogClass, log_level::LogLevel};
    use std::{sync::Mutex, thread};

    #[derive(Default)]
    struct Recorder {
        ops: Mutex<Vec<String>>,
    }

    impl DisplaySurface for Recorder {
        fn append(&self, line: &str) {
            self.ops.lock().unwrap().push(format!("append:{line}"));
        }
        fn clear(&self) {
            self.ops.lock().unwrap().push("clear".into());
        }
    }

    fn send(sink: &GuiSink, text: &str) {
        let msg = LogMsg::new(LogLevel::Info, LogClass::HLE, text, 0);
        sink.log(&msg, &FormattedRecord::plain(text)).unwrap();
    }

    #[test]
    fn appends_each_record_once() {
        let rec = Arc::new(Recorder::default());
        let surface: Arc<dyn DisplaySurface> = rec.clone();
        let sink = GuiSink::new(&surface);

        send(&sink, "one");
        send(&sink, "two");
        sink.flush().unwrap();

        assert_eq!(*rec.ops.lock().unwrap(), vec!["append:one", "append:two"]);
    }

    #[test]
    fn force_clear_clears_once_per_record() {
        let rec = Arc::new(Recorder::default());
        let surface: Arc<dyn DisplaySurface> = rec.clone();
        let sink = GuiSink::new(&surface);
        sink.set_force_clear(true);
        assert!(sink.force_clear());

        send(&sink, "one");
        // A flush right after must not clear a second time.
        sink.flush().unwrap();

        assert_eq!(*rec.ops.lock().unwrap(), vec!["append:one", "clear"]);
    }

    #[test]
    fn dropped_surface_is_skipped() {
        let surface: Arc<dyn DisplaySurface> = Arc::new(Recorder::default());
        let sink = GuiSink::new(&surface);
        drop(surface);

        assert!(!sink.is_attached());
        send(&sink, "nobody listens");
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn lines_from_before_force_clear_are_cleared_by_next_flush() {
        let rec = Arc::new(Recorder::default());
        let surface: Arc<dyn DisplaySurface> = rec.clone();
        let sink = GuiSink::new(&surface);

        send(&sink, "kept");
        sink.set_force_clear(true);
        sink.flush().unwrap();
        sink.flush().unwrap();

        assert_eq!(*rec.ops.lock().unwrap(), vec!["append:kept", "clear"]);
    }

    #[test]
    fn concurrent_emitters_each_get_their_clear() {
        let rec = Arc::new(Recorder::default());
        let surface: Arc<dyn DisplaySurface> = rec.clone();
        let sink = Arc::new(GuiSink::new(&surface));
        sink.set_force_clear(true);

        let workers: Vec<_> = (0..4)
            .map(|t| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        send(&sink, &format!("t{t} line {i}"));
                        sink.flush().unwrap();
                    }
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        let ops = rec.ops.lock().unwrap();
        let appends = ops.iter().filter(|op| op.starts_with("append:")).count();
        let clears = ops.iter().filter(|op| *op == "clear").count();
        assert_eq!(appends, 400);
        assert_eq!(clears, appends);
    }
}
