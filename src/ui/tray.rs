//! Minimized-chats strip at the bottom-left, with a flyout listing the
//! tray entries.

use eframe::egui::{self, Align2, Frame, Margin, RichText, Stroke, TextStyle};

use crate::registry::WindowRegistry;
use crate::tray::MinimizedTray;
use crate::ui::theme::DockTheme;
use crate::ui::{badge_text, paint_unread_badge};

const FLYOUT_ANIM_SECS: f32 = 0.2;
const TRAY_MARGIN: f32 = 8.0;

/// What the user did in the tray this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayAction {
    Toggle,
    Restore(String),
    Close(String),
}

/// Render the tray. Returns the triggered actions and the measured strip
/// width (0.0 while the tray is empty and therefore not drawn).
pub fn render_tray(
    ctx: &egui::Context,
    tray: &MinimizedTray,
    registry: &WindowRegistry,
    theme: &DockTheme,
) -> (Vec<TrayAction>, f32) {
    let mut actions = Vec::new();

    if tray.is_empty() {
        return (actions, 0.0);
    }

    let state = tray.state();
    let openness = ctx.animate_bool_with_time(
        egui::Id::new("tray_flyout"),
        !state.collapsed,
        FLYOUT_ANIM_SECS,
    );

    let area = egui::Area::new(egui::Id::new("minimized_tray"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(TRAY_MARGIN, -TRAY_MARGIN))
        .show(ctx, |ui| {
            if openness > 0.0 {
                let full_height = tray.entries().len() as f32 * 26.0 + 12.0;
                Frame::new()
                    .fill(theme.surface[6])
                    .stroke(Stroke::new(1.0, theme.border_medium))
                    .inner_margin(Margin::same(6))
                    .show(ui, |ui| {
                        ui.set_max_height(full_height * openness);
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            for entry in tray.entries() {
                                let unread = registry
                                    .get(&entry.id)
                                    .map(|w| w.model.unread_count)
                                    .unwrap_or(0);
                                ui.horizontal(|ui| {
                                    let label = ui
                                        .label(
                                            RichText::new(&entry.title)
                                                .color(theme.text_primary)
                                                .text_style(TextStyle::Name(
                                                    "tray_label".into(),
                                                )),
                                        )
                                        .interact(egui::Sense::click())
                                        .on_hover_text("Restore");
                                    if label.clicked() {
                                        actions.push(TrayAction::Restore(entry.id.clone()));
                                    }
                                    if unread > 0 {
                                        paint_unread_badge(ui, unread, theme.error);
                                    }
                                    if ui.small_button("❌").on_hover_text("Close").clicked() {
                                        actions.push(TrayAction::Close(entry.id.clone()));
                                    }
                                });
                            }
                        });
                    });
            }

            Frame::new()
                .fill(theme.surface[5])
                .stroke(Stroke::new(1.0, theme.border_medium))
                .inner_margin(Margin::symmetric(8, 4))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let arrow = if state.collapsed { "⏶" } else { "⏷" };
                        let toggle = ui
                            .button(format!(
                                "{} Minimized ({})",
                                arrow,
                                badge_text(state.count)
                            ))
                            .on_hover_text("Show minimized chats");
                        if toggle.clicked() {
                            actions.push(TrayAction::Toggle);
                        }
                        if state.unread_total > 0 {
                            paint_unread_badge(ui, state.unread_total, theme.warning);
                        }
                    });
                });
        });

    let width = area.response.rect.width();
    (actions, width)
}
