//! chatdock - a docked chat-window shell built with egui
//!
//! Architecture:
//! - Main thread: runs the egui UI
//! - Chat-core thread: a scripted conversation partner
//! - Communication via crossbeam channels (lock-free, sync-safe)

use eframe::egui;

use chatdock::app::DockApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "chatdock",
        options,
        Box::new(|cc| Ok(Box::new(DockApp::new(cc)))),
    )
}
