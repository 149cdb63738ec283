use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Text area owned by a host front-end that log lines can be shown in.
///
/// The surface is shared with the thread that renders it, so implementations
/// do their own locking. Failures must stay inside the surface: logging never
/// reports them.
pub trait DisplaySurface: Send + Sync {
    /// Appends one already formatted line.
    fn append(&self, line: &str);

    /// Drops everything currently shown.
    fn clear(&self) {}
}

/// Default number of lines a [`LogBuffer`] keeps.
pub const DEFAULT_BUFFER_LINES: usize = 256;

/// Bounded ring of lines; the oldest line is dropped once full.
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_LINES)
    }
}

impl LogBuffer {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lines(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the current lines, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines().iter().cloned().collect()
    }

    /// Runs `f` over each line while holding the lock.
    pub fn for_each_line<F: FnMut(&str)>(&self, mut f: F) {
        for line in self.lines().iter() {
            f(line);
        }
    }
}

impl DisplaySurface for LogBuffer {
    fn append(&self, line: &str) {
        let mut lines = self.lines();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line.to_string());
    }

    fn clear(&self) {
        self.lines().clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn drops_oldest_line_when_full() {
        let buf = LogBuffer::with_capacity(2);
        buf.append("a");
        buf.append("b");
        buf.append("c");
        assert_eq!(buf.snapshot(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn clear_empties_buffer() {
        let buf = LogBuffer::default();
        buf.append("x");
        assert_eq!(buf.len(), 1);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), DEFAULT_BUFFER_LINES);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let buf = LogBuffer::with_capacity(0);
        buf.append("first");
        buf.append("second");
        assert_eq!(buf.snapshot(), vec!["second".to_string()]);
    }
}
