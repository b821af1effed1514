//! Message rendering for chat window bodies.

use eframe::egui::{self, Color32, RichText, TextStyle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::chat::{ChatMessage, ChatModel};
use crate::ui::identicon::render_thread_identicon;
use crate::ui::theme::{sender_color, DockTheme};

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://[^\s]+)").expect("valid url regex"));

/// Distance from the bottom (in points) still counted as "at the bottom"
/// for unread bookkeeping.
const SCROLL_BOTTOM_SLACK: f32 = 4.0;

const IDENTICON_SIZE: f32 = 14.0;

/// A run of message text, either plain or a clickable link.
#[derive(Debug, PartialEq, Eq)]
pub enum MessageSegment<'a> {
    Text(&'a str),
    Link(&'a str),
}

/// Split a message body into text and link segments.
pub fn message_segments(text: &str) -> Vec<MessageSegment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for m in URL_RE.find_iter(text) {
        if m.start() > last {
            segments.push(MessageSegment::Text(&text[last..m.start()]));
        }
        segments.push(MessageSegment::Link(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(MessageSegment::Text(&text[last..]));
    }
    segments
}

/// Whether an attachment link needs its own row. When the body already is
/// the URL it renders as a link inline and a second row would repeat it.
fn oob_row_needed(msg: &ChatMessage) -> bool {
    msg.oob_url.as_deref().is_some_and(|url| url != msg.text)
}

/// Render the scrollable message list and keep the model's scroll
/// bookkeeping current. `scrolled_up` feeds the unread-preservation rule
/// on restore.
pub fn render_messages(ui: &mut egui::Ui, model: &mut ChatModel, theme: &DockTheme) {
    let output = egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 1.0;
            for msg in &mut model.messages {
                render_message(ui, msg, theme);
            }
        });

    let max_offset = (output.content_size.y - output.inner_rect.height()).max(0.0);
    model.scroll_offset = output.state.offset.y;
    model.scrolled_up = output.state.offset.y + SCROLL_BOTTOM_SLACK < max_offset;
}

/// Render a single message row with its decorations.
fn render_message(ui: &mut egui::Ui, msg: &mut ChatMessage, theme: &DockTheme) {
    if let Some(subject) = &msg.subject {
        ui.label(
            RichText::new(subject)
                .color(theme.info)
                .strong()
                .text_style(TextStyle::Name("chat_sender".into())),
        );
    }

    ui.horizontal_wrapped(|ui| {
        ui.label(
            RichText::new(format!("[{}]", msg.timestamp))
                .color(theme.text_muted)
                .text_style(TextStyle::Name("chat_timestamp".into())),
        );

        if let Some(hex) = &msg.thread_hex {
            render_thread_identicon(ui, hex, IDENTICON_SIZE)
                .on_hover_text("part of a thread");
        }

        ui.label(
            RichText::new(format!("{}:", msg.sender))
                .color(sender_color(&msg.sender))
                .text_style(TextStyle::Name("chat_sender".into())),
        );

        match &msg.spoiler_hint {
            Some(hint) if !msg.spoiler_visible => {
                let hint_text = if hint.is_empty() { "Spoiler" } else { hint };
                ui.label(
                    RichText::new(hint_text)
                        .color(theme.warning)
                        .italics(),
                );
                if ui.small_button("Show more").clicked() {
                    msg.spoiler_visible = true;
                }
            }
            Some(_) => {
                render_message_text(ui, &msg.text, theme.text_primary);
                if ui.small_button("Show less").clicked() {
                    msg.spoiler_visible = false;
                }
            }
            None => {
                render_message_text(ui, &msg.text, theme.text_primary);
            }
        }

        if msg.edited {
            ui.label(RichText::new("(edited)").color(theme.text_muted).small())
                .on_hover_text("this message has been edited");
        }

        if msg.outgoing && msg.received {
            ui.label(RichText::new("✓").color(theme.success))
                .on_hover_text("delivered");
        }
    });

    if oob_row_needed(msg) {
        if let Some(url) = &msg.oob_url {
            ui.horizontal(|ui| {
                ui.add_space(16.0);
                ui.label(RichText::new("attachment:").color(theme.text_muted).small());
                ui.hyperlink_to(url.as_str(), url.as_str());
            });
        }
    }
}

/// Render body text with links made clickable.
fn render_message_text(ui: &mut egui::Ui, text: &str, color: Color32) {
    for segment in message_segments(text) {
        match segment {
            MessageSegment::Text(t) => {
                ui.label(
                    RichText::new(t)
                        .color(color)
                        .text_style(TextStyle::Name("chat_message".into())),
                );
            }
            MessageSegment::Link(url) => {
                ui.hyperlink_to(url, url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_plain_text() {
        let segments = message_segments("no links here");
        assert_eq!(segments, vec![MessageSegment::Text("no links here")]);
    }

    #[test]
    fn test_segments_extract_urls() {
        let segments = message_segments("see https://example.org/a and http://b.example");
        assert_eq!(
            segments,
            vec![
                MessageSegment::Text("see "),
                MessageSegment::Link("https://example.org/a"),
                MessageSegment::Text(" and "),
                MessageSegment::Link("http://b.example"),
            ]
        );
    }

    #[test]
    fn test_segments_url_only() {
        let segments = message_segments("https://example.org/poster.png");
        assert_eq!(
            segments,
            vec![MessageSegment::Link("https://example.org/poster.png")]
        );
    }

    #[test]
    fn test_oob_row_skipped_when_body_is_the_url() {
        let url = "https://example.org/poster.png";
        let dup = ChatMessage::new("12:00:00".into(), "ada".into(), url.into(), false)
            .with_oob_url(url.into());
        assert!(!oob_row_needed(&dup));

        let distinct =
            ChatMessage::new("12:00:00".into(), "ada".into(), "the poster".into(), false)
                .with_oob_url(url.into());
        assert!(oob_row_needed(&distinct));

        let plain = ChatMessage::new("12:00:00".into(), "ada".into(), "hi".into(), false);
        assert!(!oob_row_needed(&plain));
    }
}
