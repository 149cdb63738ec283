use std::sync::OnceLock;

use crate::log::{
    display_surface::{DEFAULT_BUFFER_LINES, DisplaySurface, LogBuffer},
    gui_sink::GuiSink,
};

/// egui log panel usable as the logger's display surface.
///
/// Lines land in a bounded [`LogBuffer`] from whatever thread logs; the UI
/// thread reads it while drawing. Appending asks egui for a repaint once a
/// context is attached.
pub struct LogWindow {
    buffer: LogBuffer,
    repaint: OnceLock<egui::Context>,
}

/// Per-frame UI state, owned by the app rather than the shared surface.
#[derive(Debug, Clone)]
pub struct LogWindowState {
    pub open: bool,
    pub filter: String,
    pub auto_scroll: bool,
}

impl Default for LogWindowState {
    fn default() -> Self {
        Self {
            open: true,
            filter: String::new(),
            auto_scroll: true,
        }
    }
}

impl Default for LogWindow {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_LINES)
    }
}

impl LogWindow {
    #[must_use]
    pub fn with_capacity(lines: usize) -> Self {
        Self {
            buffer: LogBuffer::with_capacity(lines),
            repaint: OnceLock::new(),
        }
    }

    /// Lets background appends wake the UI. Only the first context is kept.
    pub fn attach_context(&self, ctx: &egui::Context) {
        let _ = self.repaint.set(ctx.clone());
    }

    #[must_use]
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    /// Draws the log window. `gui_sink` backs the force-clear toggle.
    pub fn draw(
        &self,
        ctx: &egui::Context,
        title: &str,
        state: &mut LogWindowState,
        gui_sink: Option<&GuiSink>,
    ) {
        let mut open = state.open;
        egui::Window::new(title)
            .open(&mut open)
            .default_size([640.0, 320.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        self.buffer.clear();
                    }
                    ui.checkbox(&mut state.auto_scroll, "Auto-scroll");
                    if let Some(sink) = gui_sink {
                        let mut force = sink.force_clear();
                        if ui.checkbox(&mut force, "Force clear").changed() {
                            sink.set_force_clear(force);
                        }
                    }
                    ui.label("Filter:");
                    ui.text_edit_singleline(&mut state.filter);
                });
                ui.separator();

                let needle = state.filter.to_ascii_lowercase();
                egui::ScrollArea::vertical()
                    .stick_to_bottom(state.auto_scroll)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.buffer.for_each_line(|line| {
                            if needle.is_empty() || line.to_ascii_lowercase().contains(&needle) {
                                ui.monospace(line);
                            }
                        });
                    });
            });
        state.open = open;
    }
}

impl DisplaySurface for LogWindow {
    fn append(&self, line: &str) {
        self.buffer.append(line);
        if let Some(ctx) = self.repaint.get() {
            ctx.request_repaint();
        }
    }

    fn clear(&self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    #[test]
    fn acts_as_bounded_surface_without_context() {
        let win = LogWindow::with_capacity(2);
        win.append("a");
        win.append("b");
        win.append("c");
        assert_eq!(win.buffer().snapshot(), vec!["b", "c"]);
        win.clear();
        assert!(win.buffer().is_empty());
    }

    #[test]
    fn state_defaults_to_open_and_scrolling() {
        let s = LogWindowState::default();
        assert!(s.open && s.auto_scroll && s.filter.is_empty());
    }
}
