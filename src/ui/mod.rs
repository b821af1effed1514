//! UI rendering modules for the chat shell.
//!
//! This module contains all egui-based UI rendering code, organized by component:
//! - `roster`: Control window with contacts and settings
//! - `chat_window`: A single docked conversation window
//! - `messages`: Message list rendering inside a window
//! - `overlay`: Bottom overlay row that docks the windows
//! - `tray`: Minimized-chats strip and flyout
//! - `identicon`: Thread identicon painting
//! - `theme`: Color schemes and styling utilities

pub mod chat_window;
pub mod identicon;
pub mod messages;
pub mod overlay;
pub mod roster;
pub mod theme;
pub mod tray;

pub use chat_window::*;
pub use overlay::*;
pub use roster::*;
pub use theme::*;

use eframe::egui::{self, Color32, FontId, Sense, Vec2};

/// Badge label, capped so wide counts do not blow up the layout.
pub fn badge_text(count: usize) -> String {
    if count > 99 {
        "99+".to_string()
    } else {
        count.to_string()
    }
}

/// Paint a pill-shaped unread badge and take up its space in the layout.
pub fn paint_unread_badge(ui: &mut egui::Ui, count: usize, color: Color32) {
    let galley = ui.painter().layout_no_wrap(
        badge_text(count),
        FontId::proportional(11.0),
        Color32::WHITE,
    );
    let badge_width = galley.size().x.max(16.0) + 10.0;
    let badge_height = 18.0;
    let (rect, _) = ui.allocate_exact_size(Vec2::new(badge_width, badge_height), Sense::hover());

    // Soft shadow one point below for depth.
    let shadow_rect = rect.translate(Vec2::new(0.0, 1.0));
    ui.painter()
        .rect_filled(shadow_rect, badge_height / 2.0, Color32::from_black_alpha(20));
    ui.painter().rect_filled(rect, badge_height / 2.0, color);

    let text_pos = rect.center() - galley.size() / 2.0;
    ui.painter().galley(text_pos, galley, Color32::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text_caps_at_99() {
        assert_eq!(badge_text(1), "1");
        assert_eq!(badge_text(99), "99");
        assert_eq!(badge_text(100), "99+");
        assert_eq!(badge_text(1234), "99+");
    }
}
