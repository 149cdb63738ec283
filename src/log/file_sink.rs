use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::log::{
    log_msg::{FormattedRecord, LogMsg},
    log_sink::LogSink,
    sink_error::SinkError,
};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "emulog.log";

/// Name of the file used when the configured path cannot be opened.
const FALLBACK_FILE: &str = "emulog-fallback.log";

/// Plain-text log file, started fresh on every run.
///
/// Lines are buffered; the logger's flush policy decides when they reach
/// the disk.
pub struct FileSink {
    out: Mutex<BufWriter<Box<dyn Write + Send>>>,
    path: PathBuf,
}

impl FileSink {
    /// Removes any previous file at `path` and opens a new, empty one.
    ///
    /// # Errors
    /// Returns the I/O error if the old file cannot be removed or the new
    /// one cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        remove_existing(&path)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self::from_writer(Box::new(file), path))
    }

    /// Like [`create`](Self::create) but never fails: tries `path`, then a
    /// file in the temp directory, then discards output.
    ///
    /// Every failure along the way is passed to `report`.
    pub fn create_or_fallback<P: AsRef<Path>>(path: P, report: &dyn Fn(&str)) -> Self {
        let path = path.as_ref();
        match Self::create(path) {
            Ok(sink) => return sink,
            Err(e) => report(&format!("cannot open log file {}: {}", path.display(), e)),
        }

        let fallback = std::env::temp_dir().join(FALLBACK_FILE);
        match Self::create(&fallback) {
            Ok(sink) => sink,
            Err(e) => {
                report(&format!(
                    "cannot open fallback log file {}: {}",
                    fallback.display(),
                    e
                ));
                Self::from_writer(Box::new(io::sink()), PathBuf::new())
            }
        }
    }

    fn from_writer(writer: Box<dyn Write + Send>, path: PathBuf) -> Self {
        Self {
            out: Mutex::new(BufWriter::new(writer)),
            path,
        }
    }

    /// Path of the file being written. Empty when output is discarded.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl LogSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn log(&self, _msg: &LogMsg, formatted: &FormattedRecord) -> Result<(), SinkError> {
        let mut line = String::with_capacity(formatted.text.len() + 1);
        line.push_str(&formatted.text);
        line.push('\n');

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

impl Drop for FileSink {
    fn drop(&mut self) {
        let out = self.out.get_mut().unwrap_or_else(PoisonError::into_inner);
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_class::LogClass, log_level::LogLevel};
    use std::cell::RefCell;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("emulog-file-sink-{}", std::process::id()))
            .join(name)
    }

    fn write_line(sink: &FileSink, text: &str) {
        let msg = LogMsg::new(LogLevel::Info, LogClass::CORE, text, 0);
        sink.log(&msg, &FormattedRecord::plain(text)).unwrap();
    }

    #[test]
    fn create_truncates_previous_run() {
        let path = temp_path("truncate.log");
        {
            let sink = FileSink::create(&path).unwrap();
            write_line(&sink, "first run");
            sink.flush().unwrap();
        }
        {
            let sink = FileSink::create(&path).unwrap();
            write_line(&sink, "second run");
            sink.flush().unwrap();
        }
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "second run\n");
    }

    #[test]
    fn drop_flushes_buffered_lines() {
        let path = temp_path("drop.log");
        {
            let sink = FileSink::create(&path).unwrap();
            write_line(&sink, "buffered");
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "buffered\n");
    }

    #[test]
    fn fallback_reports_and_still_returns_a_sink() {
        // A directory cannot be opened as a file.
        let dir = temp_path("as-dir");
        fs::create_dir_all(dir.join("child")).unwrap();

        let reports = RefCell::new(Vec::new());
        let report = |m: &str| reports.borrow_mut().push(m.to_string());
        let sink = FileSink::create_or_fallback(&dir, &report);
        write_line(&sink, "still works");
        assert!(sink.flush().is_ok());
        assert!(!reports.borrow().is_empty());
        assert!(reports.borrow()[0].contains("cannot open log file"));
    }
}
