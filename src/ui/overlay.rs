//! Bottom overlay row: docks the control window and chat windows along
//! the bottom edge, newest furthest left, and measures their rendered
//! widths for the trimmer.

use std::collections::{HashMap, HashSet};

use eframe::egui::{self, Align, Align2, Frame, Layout, Margin, Stroke};

use crate::config::Settings;
use crate::registry::WindowRegistry;
use crate::ui::chat_window::{render_chat_window, WindowAction};
use crate::ui::roster::{render_roster, RosterAction};
use crate::ui::theme::DockTheme;
use crate::viewport::ViewPort;
use crate::window::CONTROL_WINDOW_ID;

pub const CHAT_WINDOW_WIDTH: f32 = 300.0;
pub const CHAT_WINDOW_HEIGHT: f32 = 380.0;
pub const CONTROL_WINDOW_WIDTH: f32 = 240.0;
pub const CONTROL_WINDOW_HEIGHT: f32 = 400.0;
const OVERLAY_MARGIN: f32 = 8.0;
const FULLSCREEN_WINDOW_WIDTH: f32 = 420.0;

/// Something the user did somewhere in the overlay row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    Window { id: String, action: WindowAction },
    Roster(RosterAction),
    /// The collapsed control toggle was clicked.
    ExpandControl,
}

/// Geometry store behind the `ViewPort` trait: rendered widths, hidden
/// surfaces, and the measured widths of the fixed chrome. Windows that
/// have never been laid out report their design width, so a window can
/// be costed before its first frame.
pub struct OverlayViewPort {
    screen_width: f32,
    widths: HashMap<String, f32>,
    hidden: HashSet<String>,
    control_toggle_width: f32,
    tray_width: f32,
}

impl OverlayViewPort {
    pub fn new(control_hidden: bool) -> Self {
        let mut hidden = HashSet::new();
        if control_hidden {
            hidden.insert(CONTROL_WINDOW_ID.to_string());
        }
        Self {
            screen_width: 0.0,
            widths: HashMap::new(),
            hidden,
            control_toggle_width: 48.0,
            tray_width: 0.0,
        }
    }

    pub fn set_screen_width(&mut self, width: f32) {
        self.screen_width = width;
    }

    pub fn record_width(&mut self, id: &str, width: f32) {
        self.widths.insert(id.to_string(), width);
    }

    pub fn record_control_toggle_width(&mut self, width: f32) {
        self.control_toggle_width = width;
    }

    pub fn record_tray_width(&mut self, width: f32) {
        self.tray_width = width;
    }

    pub fn forget(&mut self, id: &str) {
        self.widths.remove(id);
        self.hidden.remove(id);
    }

    fn design_width(id: &str) -> f32 {
        if id == CONTROL_WINDOW_ID {
            CONTROL_WINDOW_WIDTH
        } else {
            CHAT_WINDOW_WIDTH
        }
    }
}

impl ViewPort for OverlayViewPort {
    fn viewport_width(&self) -> f32 {
        (self.screen_width - 2.0 * OVERLAY_MARGIN).max(0.0)
    }

    fn rendered_width(&self, id: &str) -> f32 {
        self.widths
            .get(id)
            .copied()
            .unwrap_or_else(|| Self::design_width(id))
    }

    fn is_visible(&self, id: &str) -> bool {
        !self.hidden.contains(id)
    }

    fn hide(&mut self, id: &str) {
        self.hidden.insert(id.to_string());
    }

    fn show(&mut self, id: &str) {
        self.hidden.remove(id);
    }

    fn control_toggle_width(&self) -> f32 {
        self.control_toggle_width
    }

    fn tray_width(&self) -> f32 {
        self.tray_width
    }
}

/// Render the docked row: control window (or its toggle) at the right
/// edge, chat windows opening leftward in creation order.
pub fn render_overlay(
    ctx: &egui::Context,
    registry: &mut WindowRegistry,
    viewport: &mut OverlayViewPort,
    settings: &Settings,
    connected: bool,
    theme: &DockTheme,
) -> Vec<OverlayAction> {
    let mut actions = Vec::new();

    egui::Area::new(egui::Id::new("overlay_row"))
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-OVERLAY_MARGIN, -OVERLAY_MARGIN))
        .show(ctx, |ui| {
            ui.with_layout(Layout::right_to_left(Align::BOTTOM), |ui| {
                if viewport.is_visible(CONTROL_WINDOW_ID) {
                    let response = ui.allocate_ui(
                        egui::vec2(CONTROL_WINDOW_WIDTH, CONTROL_WINDOW_HEIGHT),
                        |ui| {
                            Frame::new()
                                .fill(theme.surface[1])
                                .stroke(Stroke::new(1.0, theme.border_medium))
                                .inner_margin(Margin::same(8))
                                .show(ui, |ui| {
                                    ui.set_min_size(ui.available_size());
                                    render_roster(ui, settings, registry, connected, theme)
                                })
                                .inner
                        },
                    );
                    viewport.record_width(CONTROL_WINDOW_ID, response.response.rect.width());
                    if let Some(roster_action) = response.inner {
                        actions.push(OverlayAction::Roster(roster_action));
                    }
                } else {
                    let response = ui.button("⏶ chatdock").on_hover_text("Open contacts");
                    viewport.record_control_toggle_width(response.rect.width());
                    if response.clicked() {
                        actions.push(OverlayAction::ExpandControl);
                    }
                }

                for id in registry.ordered_ids() {
                    if id == CONTROL_WINDOW_ID {
                        continue;
                    }
                    let minimized = registry.get(&id).map(|w| w.minimized).unwrap_or(true);
                    if minimized || !viewport.is_visible(&id) {
                        continue;
                    }
                    if let Some(window) = registry.get_mut(&id) {
                        let response = ui.allocate_ui(
                            egui::vec2(CHAT_WINDOW_WIDTH, CHAT_WINDOW_HEIGHT),
                            |ui| {
                                ui.set_min_size(ui.available_size());
                                render_chat_window(ui, window, theme)
                            },
                        );
                        viewport.record_width(&id, response.response.rect.width());
                        if let Some(window_action) = response.inner {
                            actions.push(OverlayAction::Window {
                                id: id.clone(),
                                action: window_action,
                            });
                        }
                    }
                }
            });
        });

    actions
}

/// Fullscreen layout: every maximized chat at full height in a
/// horizontally scrolling row. No trimming applies here.
pub fn render_fullscreen(
    ctx: &egui::Context,
    registry: &mut WindowRegistry,
    theme: &DockTheme,
) -> Vec<OverlayAction> {
    let mut actions = Vec::new();

    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme.surface[0]).inner_margin(Margin::same(8)))
        .show(ctx, |ui| {
            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for id in registry.ordered_ids() {
                        if id == CONTROL_WINDOW_ID {
                            continue;
                        }
                        let minimized = registry.get(&id).map(|w| w.minimized).unwrap_or(true);
                        if minimized {
                            continue;
                        }
                        if let Some(window) = registry.get_mut(&id) {
                            let height = ui.available_height();
                            let response = ui.allocate_ui(
                                egui::vec2(FULLSCREEN_WINDOW_WIDTH, height),
                                |ui| {
                                    ui.set_min_size(ui.available_size());
                                    render_chat_window(ui, window, theme)
                                },
                            );
                            if let Some(window_action) = response.inner {
                                actions.push(OverlayAction::Window {
                                    id: id.clone(),
                                    action: window_action,
                                });
                            }
                        }
                    }
                });
            });
        });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_reports_design_width_before_first_layout() {
        let vp = OverlayViewPort::new(false);
        assert_eq!(vp.rendered_width("ada"), CHAT_WINDOW_WIDTH);
        assert_eq!(vp.rendered_width(CONTROL_WINDOW_ID), CONTROL_WINDOW_WIDTH);
    }

    #[test]
    fn test_viewport_prefers_measured_width() {
        let mut vp = OverlayViewPort::new(false);
        vp.record_width("ada", 314.0);
        assert_eq!(vp.rendered_width("ada"), 314.0);
    }

    #[test]
    fn test_viewport_hide_show() {
        let mut vp = OverlayViewPort::new(false);
        assert!(vp.is_visible("ada"));
        vp.hide("ada");
        assert!(!vp.is_visible("ada"));
        vp.show("ada");
        assert!(vp.is_visible("ada"));
    }

    #[test]
    fn test_viewport_can_start_with_control_collapsed() {
        let vp = OverlayViewPort::new(true);
        assert!(!vp.is_visible(CONTROL_WINDOW_ID));
        assert!(vp.is_visible("ada"));
    }

    #[test]
    fn test_viewport_width_subtracts_margins() {
        let mut vp = OverlayViewPort::new(false);
        vp.set_screen_width(700.0);
        assert_eq!(vp.viewport_width(), 700.0 - 2.0 * OVERLAY_MARGIN);
        vp.set_screen_width(0.0);
        assert_eq!(vp.viewport_width(), 0.0);
    }
}
