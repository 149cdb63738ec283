//! The viewer binary: an egui window hosting the emulator log display.
//! It loads logging settings, starts `LogViewerApp` and lets it set up the
//! process logger with the log window as display surface.

use emulog::{
    config::{Config, LogConfig},
    gui::log_viewer_app::LogViewerApp,
};
use std::env;

fn main() -> eframe::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_result = if args.len() > 1 {
        let path = &args[1];
        println!("Loading custom configuration: {}", path);
        Config::load(path)
    } else {
        Config::load("emulog.conf")
    };

    let config = config_result
        .and_then(|cfg| LogConfig::from_config(&cfg))
        .unwrap_or_else(|e| {
            eprintln!("Error loading config: {e}. Using defaults.");
            LogConfig::default()
        });

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Emulator Log Viewer",
        native_options,
        Box::new(move |cc| {
            let app = LogViewerApp::new(cc, &config);
            Ok(Box::new(app))
        }),
    )
}
