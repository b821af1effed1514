//! Color themes and styling utilities for the chat shell.
//!
//! # Overview
//!
//! A compact design system in the style of modern chat applications:
//! a 7-level surface hierarchy for depth, semantic colors for states,
//! and a four-step text hierarchy.
//!
//! ## Surface Hierarchy
//!
//! - `surface[0]`: App background (deepest layer)
//! - `surface[1]`: Roster/panel backgrounds
//! - `surface[2]`: Message area background
//! - `surface[3]`: Hover states
//! - `surface[4]`: Active/selected states
//! - `surface[5]`: Elevated panels (window headers, tray)
//! - `surface[6]`: Highest elevation (flyouts, popovers)
//!
//! ## Semantic Colors
//!
//! - **Accent**: Primary brand color (buttons, links, focus)
//! - **Success**: Positive states (delivered, online)
//! - **Warning**: Caution states (unread, away)
//! - **Error**: Failures (disconnected, invalid input)
//! - **Info**: Informational labels

use eframe::egui::{Color32, FontFamily, FontId, TextStyle};
use std::collections::BTreeMap;

/// Theme with semantic color system (7-level surface hierarchy)
#[derive(Clone, Debug)]
#[allow(dead_code)]
pub struct DockTheme {
    pub name: String,
    pub surface: [Color32; 7],
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_active: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub text_disabled: Color32,
    pub border_subtle: Color32,
    pub border_medium: Color32,
    pub border_strong: Color32,
}

impl DockTheme {
    /// Dark theme (the primary design)
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(10, 10, 15),    // surface_0: App background
                Color32::from_rgb(19, 19, 26),    // surface_1: Roster background
                Color32::from_rgb(28, 28, 38),    // surface_2: Message background
                Color32::from_rgb(37, 37, 50),    // surface_3: Hover state
                Color32::from_rgb(46, 46, 62),    // surface_4: Active selection
                Color32::from_rgb(56, 56, 74),    // surface_5: Elevated panels
                Color32::from_rgb(66, 66, 86),    // surface_6: Flyouts/popovers
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            accent_active: Color32::from_rgb(60, 69, 165),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(114, 118, 125),
            text_disabled: Color32::from_rgb(79, 84, 92),
            border_subtle: Color32::from_rgb(32, 34, 37),
            border_medium: Color32::from_rgb(47, 49, 54),
            border_strong: Color32::from_rgb(64, 68, 75),
        }
    }

    /// Light theme (inverted from dark)
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(255, 255, 255), // surface_0: App background
                Color32::from_rgb(246, 246, 247), // surface_1: Roster background
                Color32::from_rgb(242, 243, 245), // surface_2: Message background
                Color32::from_rgb(227, 229, 232), // surface_3: Hover state
                Color32::from_rgb(212, 215, 220), // surface_4: Active selection
                Color32::from_rgb(196, 201, 208), // surface_5: Elevated panels
                Color32::from_rgb(181, 187, 196), // surface_6: Flyouts/popovers
            ],
            accent: Color32::from_rgb(88, 101, 242),
            accent_hover: Color32::from_rgb(71, 82, 196),
            accent_active: Color32::from_rgb(60, 69, 165),
            success: Color32::from_rgb(67, 181, 129),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(0, 175, 244),
            text_primary: Color32::from_rgb(6, 6, 7),
            text_secondary: Color32::from_rgb(79, 86, 96),
            text_muted: Color32::from_rgb(116, 127, 141),
            text_disabled: Color32::from_rgb(180, 187, 196),
            border_subtle: Color32::from_rgb(230, 232, 236),
            border_medium: Color32::from_rgb(210, 213, 219),
            border_strong: Color32::from_rgb(180, 185, 192),
        }
    }

    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Configure text styles (14px base, proper hierarchy)
///
/// Chat-specific custom styles on top of the standard set:
///
/// - **chat_message**: 14px monospace - message bodies
/// - **chat_timestamp**: 11px monospace - message timestamps
/// - **chat_sender**: 13px proportional - sender labels
/// - **window_title**: 14px proportional - window header titles
/// - **section_header**: 11px proportional - roster sections ("CONTACTS")
/// - **tray_label**: 12px proportional - minimized tray entries
pub fn configure_text_styles() -> BTreeMap<TextStyle, FontId> {
    use FontFamily::{Monospace, Proportional};

    [
        (TextStyle::Small, FontId::new(10.0, Proportional)),
        (TextStyle::Body, FontId::new(14.0, Proportional)),
        (TextStyle::Button, FontId::new(13.0, Proportional)),
        (TextStyle::Heading, FontId::new(16.0, Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, Monospace)),
        // Chat-specific custom styles
        (TextStyle::Name("chat_message".into()), FontId::new(14.0, Monospace)),
        (TextStyle::Name("chat_timestamp".into()), FontId::new(11.0, Monospace)),
        (TextStyle::Name("chat_sender".into()), FontId::new(13.0, Proportional)),
        (TextStyle::Name("window_title".into()), FontId::new(14.0, Proportional)),
        (TextStyle::Name("section_header".into()), FontId::new(11.0, Proportional)),
        (TextStyle::Name("tray_label".into()), FontId::new(12.0, Proportional)),
    ]
    .into()
}

/// Apply the global style to the egui context
///
/// Typography from `configure_text_styles()`, spacing on an 8px grid,
/// flat rounded buttons, and dark text inputs with accent selection.
/// Call once during app initialization.
pub fn apply_app_style(ctx: &eframe::egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Set professional font sizes and improved spacing
    style.text_styles = configure_text_styles();

    // Increase global spacing for breathing room
    style.spacing.item_spacing = eframe::egui::vec2(8.0, 6.0);
    style.spacing.window_margin = eframe::egui::Margin::same(12);
    style.spacing.button_padding = eframe::egui::vec2(10.0, 5.0);

    // Modern button styling
    style.visuals.widgets.inactive.bg_fill = Color32::from_rgb(55, 60, 70);
    style.visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(55, 60, 70);
    style.visuals.widgets.inactive.bg_stroke = eframe::egui::Stroke::NONE;
    style.visuals.widgets.inactive.corner_radius = eframe::egui::CornerRadius::same(6);

    style.visuals.widgets.hovered.bg_fill = Color32::from_rgb(70, 76, 88);
    style.visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(70, 76, 88);
    style.visuals.widgets.hovered.bg_stroke = eframe::egui::Stroke::NONE;
    style.visuals.widgets.hovered.corner_radius = eframe::egui::CornerRadius::same(6);

    style.visuals.widgets.active.bg_fill = Color32::from_rgb(88, 101, 242);
    style.visuals.widgets.active.weak_bg_fill = Color32::from_rgb(88, 101, 242);
    style.visuals.widgets.active.corner_radius = eframe::egui::CornerRadius::same(6);

    // Text input styling
    style.visuals.extreme_bg_color = Color32::from_rgb(30, 32, 38);
    style.visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(88, 101, 242, 100);

    ctx.set_style(style);
}

/// Sender color palette - 16 vibrant, accessible colors
///
/// Don't use this array directly; `sender_color(name)` maps names to
/// entries deterministically via FNV-1a hashing.
const SENDER_COLORS: [Color32; 16] = [
    Color32::from_rgb(231, 76, 60),   // Vibrant red
    Color32::from_rgb(46, 204, 113),  // Emerald green
    Color32::from_rgb(52, 152, 219),  // Bright blue
    Color32::from_rgb(155, 89, 182),  // Amethyst purple
    Color32::from_rgb(241, 196, 15),  // Sunflower yellow
    Color32::from_rgb(230, 126, 34),  // Carrot orange
    Color32::from_rgb(26, 188, 156),  // Turquoise
    Color32::from_rgb(236, 100, 166), // Pink
    Color32::from_rgb(142, 68, 173),  // Wisteria
    Color32::from_rgb(41, 128, 185),  // Belize blue
    Color32::from_rgb(39, 174, 96),   // Nephritis
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(192, 57, 43),   // Pomegranate
    Color32::from_rgb(22, 160, 133),  // Green sea
    Color32::from_rgb(211, 84, 0),    // Pumpkin
    Color32::from_rgb(102, 178, 255), // Light blue
];

/// Generate a consistent color for a sender name using FNV-1a hash.
///
/// Same name always gets the same color, making it easy to visually
/// track participants in a room.
pub fn sender_color(name: &str) -> Color32 {
    let mut hash: u64 = 1469598103934665603u64;
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211u64);
    }
    let idx = (hash as usize) % SENDER_COLORS.len();
    SENDER_COLORS[idx]
}

/// Render a circular avatar with the contact's initial
pub fn render_avatar(ui: &mut eframe::egui::Ui, name: &str, size: f32) -> eframe::egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        eframe::egui::vec2(size, size),
        eframe::egui::Sense::hover(),
    );

    let bg_color = sender_color(name);
    let painter = ui.painter();

    // Draw subtle shadow for depth
    let shadow_offset = eframe::egui::vec2(0.0, 1.5);
    painter.circle_filled(
        rect.center() + shadow_offset,
        size / 2.0,
        Color32::from_black_alpha(30),
    );

    // Draw circle with border
    painter.circle_filled(rect.center(), size / 2.0, bg_color);
    painter.circle_stroke(
        rect.center(),
        size / 2.0,
        eframe::egui::Stroke::new(1.5, Color32::from_white_alpha(15)),
    );

    // Draw initials
    let initials: String = name.chars().next().unwrap_or('?').to_uppercase().collect();
    let font_id = eframe::egui::FontId::new(size * 0.45, eframe::egui::FontFamily::Proportional);

    painter.text(
        rect.center(),
        eframe::egui::Align2::CENTER_CENTER,
        initials,
        font_id,
        Color32::WHITE,
    );

    response
}
