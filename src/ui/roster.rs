//! Control window: contact list, session status, and settings.

use eframe::egui::{self, RichText, TextStyle};

use crate::config::{Settings, ViewMode};
use crate::registry::WindowRegistry;
use crate::ui::theme::{render_avatar, DockTheme};
use crate::ui::paint_unread_badge;

/// What the user did in the roster this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAction {
    OpenChat {
        id: String,
        title: String,
        groupchat: bool,
    },
    ToggleCollapse,
    SetTheme(String),
    SetViewMode(ViewMode),
    SetNoTrimming(bool),
}

pub fn render_roster(
    ui: &mut egui::Ui,
    settings: &Settings,
    registry: &WindowRegistry,
    connected: bool,
    theme: &DockTheme,
) -> Option<RosterAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("chatdock")
                .color(theme.text_primary)
                .text_style(TextStyle::Name("window_title".into()))
                .strong(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("⏷").on_hover_text("Collapse").clicked() {
                action = Some(RosterAction::ToggleCollapse);
            }
        });
    });

    ui.horizontal(|ui| {
        if connected {
            ui.label(RichText::new("●").color(theme.success));
            ui.label(RichText::new("online").color(theme.text_secondary).small());
        } else {
            ui.label(RichText::new("●").color(theme.text_muted));
            ui.label(
                RichText::new("connecting…")
                    .color(theme.text_muted)
                    .small(),
            );
        }
    });

    ui.separator();
    ui.label(
        RichText::new("CONTACTS")
            .color(theme.text_muted)
            .text_style(TextStyle::Name("section_header".into())),
    );

    for contact in &settings.contacts {
        let open_window = registry.get(&contact.id);
        let row = ui.horizontal(|ui| {
            render_avatar(ui, &contact.name, 22.0);
            let color = if open_window.is_some() {
                theme.text_primary
            } else {
                theme.text_secondary
            };
            ui.label(RichText::new(&contact.name).color(color));
            if contact.groupchat {
                ui.label(RichText::new("room").color(theme.text_muted).small());
            }
            if let Some(window) = open_window {
                if window.model.unread_count > 0 {
                    paint_unread_badge(ui, window.model.unread_count, theme.error);
                }
            }
        });

        let row_response = row
            .response
            .interact(egui::Sense::click())
            .on_hover_text(format!("Chat with {}", contact.name));
        if row_response.clicked() {
            action = Some(RosterAction::OpenChat {
                id: contact.id.clone(),
                title: contact.name.clone(),
                groupchat: contact.groupchat,
            });
        }
    }

    ui.separator();
    ui.label(
        RichText::new("SETTINGS")
            .color(theme.text_muted)
            .text_style(TextStyle::Name("section_header".into())),
    );

    egui::ComboBox::from_label("Theme")
        .selected_text(settings.theme.clone())
        .show_ui(ui, |ui| {
            for name in ["dark", "light"] {
                let mut current = settings.theme.clone();
                if ui.selectable_value(&mut current, name.to_string(), name).clicked()
                    && current != settings.theme
                {
                    action = Some(RosterAction::SetTheme(current));
                }
            }
        });

    let mut fullscreen = settings.view_mode == ViewMode::Fullscreen;
    if ui.checkbox(&mut fullscreen, "Fullscreen mode").changed() {
        let mode = if fullscreen {
            ViewMode::Fullscreen
        } else {
            ViewMode::Overlayed
        };
        action = Some(RosterAction::SetViewMode(mode));
    }

    let mut no_trimming = settings.no_trimming;
    if ui
        .checkbox(&mut no_trimming, "Keep all windows open")
        .on_hover_text("Never auto-minimize windows when they overflow")
        .changed()
    {
        action = Some(RosterAction::SetNoTrimming(no_trimming));
    }

    action
}
