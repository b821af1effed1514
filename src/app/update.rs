//! Main update loop, resize handling, and UI action dispatch

use eframe::egui::{self, Frame, RichText};
use std::time::Duration;

use crate::config::ViewMode;
use crate::ui::chat_window::WindowAction;
use crate::ui::overlay::{
    render_fullscreen, render_overlay, OverlayAction, CONTROL_WINDOW_WIDTH,
};
use crate::ui::roster::{render_roster, RosterAction};
use crate::ui::tray::{render_tray, TrayAction};
use crate::viewport::ViewPort;
use crate::window::CONTROL_WINDOW_ID;

use super::core::DockApp;

impl eframe::App for DockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process core and shell events
        self.process_core_events();
        self.process_shell_events();

        // Resize detection; the actual trim runs once the debounce settles
        let width = ctx.screen_rect().width();
        self.viewport.set_screen_width(width);
        if self.last_screen_width > 0.0 && width != self.last_screen_width {
            self.coordinator.schedule_resize_trim();
        }
        self.last_screen_width = width;
        if self.coordinator.resize_trim_due() {
            self.run_trim(None);
        }

        let theme = self.get_theme();

        let mut actions = Vec::new();
        match self.settings.view_mode {
            ViewMode::Overlayed => {
                egui::CentralPanel::default()
                    .frame(Frame::new().fill(theme.surface[0]))
                    .show(ctx, |ui| {
                        ui.centered_and_justified(|ui| {
                            ui.label(
                                RichText::new("chatdock")
                                    .size(28.0)
                                    .color(theme.text_muted.gamma_multiply(0.4)),
                            );
                        });
                    });
                actions = render_overlay(
                    ctx,
                    &mut self.registry,
                    &mut self.viewport,
                    &self.settings,
                    self.connected,
                    &theme,
                );
            }
            ViewMode::Fullscreen => {
                if self.viewport.is_visible(CONTROL_WINDOW_ID) {
                    let roster_action = egui::SidePanel::left("roster_panel")
                        .default_width(CONTROL_WINDOW_WIDTH)
                        .frame(
                            Frame::new()
                                .fill(theme.surface[1])
                                .inner_margin(egui::Margin::same(8)),
                        )
                        .show(ctx, |ui| {
                            render_roster(
                                ui,
                                &self.settings,
                                &self.registry,
                                self.connected,
                                &theme,
                            )
                        })
                        .inner;
                    if let Some(action) = roster_action {
                        actions.push(OverlayAction::Roster(action));
                    }
                } else {
                    egui::TopBottomPanel::top("roster_reopen").show(ctx, |ui| {
                        if ui.button("⏷ Contacts").clicked() {
                            actions.push(OverlayAction::ExpandControl);
                        }
                    });
                }
                actions.extend(render_fullscreen(ctx, &mut self.registry, &theme));
            }
        }

        let (tray_actions, tray_width) = render_tray(ctx, &self.tray, &self.registry, &theme);
        self.viewport.record_tray_width(tray_width);

        for action in actions {
            self.handle_overlay_action(ctx, action);
        }
        for action in tray_actions {
            self.handle_tray_action(action);
        }

        // Request repaint to keep draining events and timers
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

impl DockApp {
    fn handle_overlay_action(&mut self, ctx: &egui::Context, action: OverlayAction) {
        match action {
            OverlayAction::Window { id, action } => match action {
                WindowAction::Minimize => self.minimize_chat(&id),
                WindowAction::Close => self.remove_window(&id, true),
                WindowAction::Send(text) => self.send_message(&id, text),
                WindowAction::ToggleThread => {
                    if let Some(window) = self.registry.get_mut(&id) {
                        window.model.toggle_thread();
                    }
                }
            },
            OverlayAction::Roster(action) => self.handle_roster_action(ctx, action),
            OverlayAction::ExpandControl => {
                self.viewport.show(CONTROL_WINDOW_ID);
                // The control window just claimed row space; re-fit.
                self.run_trim(None);
            }
        }
    }

    fn handle_roster_action(&mut self, ctx: &egui::Context, action: RosterAction) {
        match action {
            RosterAction::OpenChat {
                id,
                title,
                groupchat,
            } => {
                self.open_chat(&id, &title, groupchat);
            }
            RosterAction::ToggleCollapse => {
                self.viewport.hide(CONTROL_WINDOW_ID);
            }
            RosterAction::SetTheme(name) => {
                self.settings.theme = name;
                match self.settings.theme.as_str() {
                    "light" => ctx.set_visuals(egui::Visuals::light()),
                    _ => ctx.set_visuals(egui::Visuals::dark()),
                }
                self.persist_settings();
            }
            RosterAction::SetViewMode(mode) => {
                self.settings.view_mode = mode;
                self.persist_settings();
            }
            RosterAction::SetNoTrimming(value) => {
                self.settings.no_trimming = value;
                self.persist_settings();
            }
        }
    }

    fn handle_tray_action(&mut self, action: TrayAction) {
        match action {
            TrayAction::Toggle => self.tray.toggle(),
            TrayAction::Restore(id) => self.restore_chat(&id),
            TrayAction::Close(id) => self.remove_window(&id, true),
        }
    }
}
