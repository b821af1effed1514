//! A single docked conversation window: header, message list, input line.

use eframe::egui::{self, Frame, Layout, Margin, RichText, Stroke, TextStyle};

use crate::ui::identicon::render_thread_identicon;
use crate::ui::messages::render_messages;
use crate::ui::theme::DockTheme;
use crate::ui::paint_unread_badge;
use crate::window::{ChatWindow, WindowKind};

/// What the user did to a window this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowAction {
    Minimize,
    Close,
    Send(String),
    ToggleThread,
}

/// Header buttons in left-to-right render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingButton {
    Minimize,
    Details,
    Close,
    Leave,
}

/// Buttons a window's header shows for its kind. The control window has
/// its own collapse toggle and never minimizes.
pub fn heading_buttons(kind: WindowKind) -> Vec<HeadingButton> {
    match kind {
        WindowKind::Control => Vec::new(),
        WindowKind::Chat => {
            let mut buttons = vec![HeadingButton::Close];
            insert_minimize(&mut buttons);
            buttons
        }
        WindowKind::GroupChat => {
            let mut buttons = vec![HeadingButton::Details, HeadingButton::Leave];
            insert_minimize(&mut buttons);
            buttons
        }
    }
}

/// Place Minimize immediately before the button that removes the window
/// (Close for chats, Leave for rooms); prepend when no anchor exists.
fn insert_minimize(buttons: &mut Vec<HeadingButton>) {
    let anchor = buttons
        .iter()
        .position(|b| matches!(b, HeadingButton::Close | HeadingButton::Leave));
    match anchor {
        Some(pos) => buttons.insert(pos, HeadingButton::Minimize),
        None => buttons.insert(0, HeadingButton::Minimize),
    }
}

/// Render one docked window. Returns the action the user triggered, if
/// any; the caller owns the state transitions.
pub fn render_chat_window(
    ui: &mut egui::Ui,
    window: &mut ChatWindow,
    theme: &DockTheme,
) -> Option<WindowAction> {
    let mut action = None;

    Frame::new()
        .fill(theme.surface[2])
        .stroke(Stroke::new(1.0, theme.border_medium))
        .inner_margin(Margin::same(0))
        .show(ui, |ui| {
            render_header(ui, window, theme, &mut action);

            Frame::new()
                .inner_margin(Margin::symmetric(6, 4))
                .show(ui, |ui| {
                    let list_height = ui.available_height() - 34.0;
                    ui.allocate_ui(
                        egui::vec2(ui.available_width(), list_height.max(0.0)),
                        |ui| {
                            render_messages(ui, &mut window.model, theme);
                        },
                    );

                    if let Some(input_action) = render_input_row(ui, window, theme) {
                        action = Some(input_action);
                    }
                });
        });

    action
}

fn render_header(
    ui: &mut egui::Ui,
    window: &mut ChatWindow,
    theme: &DockTheme,
    action: &mut Option<WindowAction>,
) {
    Frame::new()
        .fill(theme.surface[5])
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(&window.title)
                        .color(theme.text_primary)
                        .text_style(TextStyle::Name("window_title".into()))
                        .strong(),
                );
                if window.model.unread_count > 0 {
                    paint_unread_badge(ui, window.model.unread_count, theme.error);
                }

                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    // Right-to-left layout flips the visual order, so walk
                    // the buttons reversed to keep them as declared.
                    for button in heading_buttons(window.kind).iter().rev() {
                        match button {
                            HeadingButton::Minimize => {
                                if ui
                                    .small_button("➖")
                                    .on_hover_text("Minimize")
                                    .clicked()
                                {
                                    *action = Some(WindowAction::Minimize);
                                }
                            }
                            HeadingButton::Close => {
                                if ui.small_button("❌").on_hover_text("Close").clicked() {
                                    *action = Some(WindowAction::Close);
                                }
                            }
                            HeadingButton::Leave => {
                                if ui
                                    .small_button("❌")
                                    .on_hover_text("Leave room")
                                    .clicked()
                                {
                                    *action = Some(WindowAction::Close);
                                }
                            }
                            HeadingButton::Details => {
                                if ui
                                    .small_button("ℹ")
                                    .on_hover_text("Copy room address")
                                    .clicked()
                                {
                                    ui.ctx().copy_text(window.id.clone());
                                }
                            }
                        }
                    }
                });
            });
        });
}

/// Input line with the thread toggle on its left. Enter sends.
fn render_input_row(
    ui: &mut egui::Ui,
    window: &mut ChatWindow,
    theme: &DockTheme,
) -> Option<WindowAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        match &window.model.thread {
            Some(tag) => {
                let response = render_thread_identicon(ui, &tag.hex, 16.0)
                    .on_hover_text("Leave this thread");
                if response.clicked() {
                    action = Some(WindowAction::ToggleThread);
                }
            }
            None => {
                if ui
                    .small_button("#")
                    .on_hover_text("Start a thread")
                    .clicked()
                {
                    action = Some(WindowAction::ToggleThread);
                }
            }
        }

        let edit = egui::TextEdit::singleline(&mut window.input)
            .hint_text(RichText::new("Message").color(theme.text_muted))
            .desired_width(f32::INFINITY);
        let response = ui.add(edit);

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            let text = window.input.trim().to_string();
            if !text.is_empty() {
                window.input.clear();
                action = Some(WindowAction::Send(text));
            }
            response.request_focus();
        }
    });

    action
}
