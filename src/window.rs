//! A single chat window and its minimize/maximize state machine.

use chrono::{DateTime, Local};

use crate::chat::ChatModel;

/// Id of the special control window (roster and settings). It takes part
/// in width accounting but is never auto-minimized.
pub const CONTROL_WINDOW_ID: &str = "roster";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// The roster/settings window.
    Control,
    /// One-to-one conversation.
    Chat,
    /// Multi-party room.
    GroupChat,
}

/// A registered window: identity, stacking metadata, and the chat model
/// rendered inside it.
pub struct ChatWindow {
    pub id: String,
    pub title: String,
    pub kind: WindowKind,
    pub minimized: bool,
    pub time_opened: DateTime<Local>,
    pub time_minimized: Option<DateTime<Local>>,
    /// Monotonic insertion rank assigned by the registry; ties never occur.
    pub order_key: u64,
    pub model: ChatModel,
    /// Draft text in the window's input line.
    pub input: String,
}

impl ChatWindow {
    /// A new window starts maximized with a fresh open timestamp.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: WindowKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            minimized: false,
            time_opened: Local::now(),
            time_minimized: None,
            order_key: 0,
            model: ChatModel::new(),
            input: String::new(),
        }
    }

    pub fn is_control(&self) -> bool {
        self.kind == WindowKind::Control
    }

    pub fn minimize(&mut self) {
        self.minimized = true;
        self.time_minimized = Some(Local::now());
    }

    /// Maximizing refreshes `time_opened`, so a freshly restored window
    /// reads as recently opened.
    pub fn maximize(&mut self) {
        self.minimized = false;
        self.time_opened = Local::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_window_starts_maximized() {
        let w = ChatWindow::new("ada", "Ada", WindowKind::Chat);
        assert!(!w.minimized);
        assert!(w.time_minimized.is_none());
    }

    #[test]
    fn test_minimize_sets_flag_and_timestamp() {
        let mut w = ChatWindow::new("ada", "Ada", WindowKind::Chat);
        w.minimize();
        assert!(w.minimized);
        assert!(w.time_minimized.is_some());
    }

    #[test]
    fn test_maximize_refreshes_time_opened() {
        let mut w = ChatWindow::new("ada", "Ada", WindowKind::Chat);
        let opened = w.time_opened;
        w.minimize();
        w.maximize();
        assert!(!w.minimized);
        assert!(w.time_opened >= opened);
        // The minimize timestamp is history, not cleared.
        assert!(w.time_minimized.is_some());
    }

    #[test]
    fn test_control_window_kind() {
        let w = ChatWindow::new(CONTROL_WINDOW_ID, "Contacts", WindowKind::Control);
        assert!(w.is_control());
        let c = ChatWindow::new("workshop", "Workshop", WindowKind::GroupChat);
        assert!(!c.is_control());
    }
}
