use std::sync::Arc;

use eframe::{App, Frame};

use crate::{
    config::LogConfig,
    gui::log_window::{LogWindow, LogWindowState},
    log::{
        display_surface::DisplaySurface, log_class::LogClass, log_level::LogLevel,
        logger::Logger, setup,
    },
    log_info,
};

const WINDOW_TITLE: &str = "Emulator Logger";

/// Minimal host front-end: owns the log window, wires it into the process
/// logger and offers a panel to poke at the filters.
pub struct LogViewerApp {
    window: Arc<LogWindow>,
    window_state: LogWindowState,
    logger: Arc<Logger>,

    // Filter panel selection
    selected_class: LogClass,
    test_message: String,
    status_line: String,
}

impl LogViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &LogConfig) -> Self {
        let window = Arc::new(LogWindow::default());
        window.attach_context(&cc.egui_ctx);

        let surface: Arc<dyn DisplaySurface> = window.clone();
        let logger = setup::setup_with_config(config, Some(surface));
        log_info!(logger, LogClass::FRONTEND_UI, "Emulator log viewer started");
        log_info!(
            logger,
            LogClass::FRONTEND_UI,
            "Writing log file to {}",
            logger
                .file_path()
                .map_or_else(|| "<discarded>".to_string(), |p| p.display().to_string())
        );

        Self {
            window,
            window_state: LogWindowState::default(),
            logger,
            selected_class: LogClass::CORE,
            test_message: "hello from the viewer".into(),
            status_line: "Ready.".into(),
        }
    }

    fn filter_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Class")
                .selected_text(long_label(self.selected_class))
                .show_ui(ui, |ui| {
                    for class in LogClass::all() {
                        ui.selectable_value(&mut self.selected_class, class, long_label(class));
                    }
                });

            let current = self
                .logger
                .minimum_level(self.selected_class)
                .unwrap_or(LogLevel::Off);
            let mut chosen = current;
            egui::ComboBox::from_label("Minimum level")
                .selected_text(current.as_str())
                .show_ui(ui, |ui| {
                    for level in LogLevel::ALL {
                        ui.selectable_value(&mut chosen, level, level.as_str());
                    }
                });
            if chosen != current && self.logger.set_minimum_level(self.selected_class, chosen) {
                self.status_line =
                    format!("{} now logs at {} and above", self.selected_class, chosen);
            }
        });

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.test_message);
            for level in LogLevel::ALL.iter().take(6) {
                if ui.button(level.as_str()).clicked() {
                    self.logger
                        .emit(self.selected_class, *level, self.test_message.clone());
                }
            }
        });

        if !self.window_state.open && ui.button("Show logger window").clicked() {
            self.window_state.open = true;
        }
    }
}

fn long_label(class: LogClass) -> String {
    format!("{} ({})", class.long_name().unwrap_or("?"), class)
}

impl App for LogViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("filters").show(ctx, |ui| {
            self.filter_panel(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(&self.status_line);
        });

        let gui_sink = self.logger.gui_sink().map(Arc::as_ref);
        self.window
            .draw(ctx, WINDOW_TITLE, &mut self.window_state, gui_sink);
    }
}
