use chrono::Local;
use sha1::{Digest, Sha1};
use uuid::Uuid;

/// Maximum number of messages to keep per chat before trimming old ones.
const MAX_CHAT_MESSAGES: usize = 2000;
/// How many old messages to drop when the cap is reached.
const CHAT_TRIM_COUNT: usize = 500;

/// Chat-state notification values exchanged with the core (XEP-0085 style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    /// The window is shown and attended.
    #[default]
    Active,
    /// The window is minimized or otherwise backgrounded.
    Inactive,
}

impl ChatState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatState::Active => "active",
            ChatState::Inactive => "inactive",
        }
    }
}

/// A conversation thread marker. The id travels on the wire; the SHA-1
/// hex of the id seeds the identicon drawn next to threaded messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadTag {
    pub id: String,
    pub hex: String,
}

impl ThreadTag {
    pub fn new() -> Self {
        Self::from_id(Uuid::new_v4().to_string())
    }

    pub fn from_id(id: String) -> Self {
        let digest = Sha1::digest(id.as_bytes());
        let mut hex = String::with_capacity(digest.len() * 2);
        use std::fmt::Write;
        for byte in digest {
            let _ = write!(&mut hex, "{byte:02x}");
        }
        Self { id, hex }
    }
}

impl Default for ThreadTag {
    fn default() -> Self {
        Self::new()
    }
}

/// A single rendered chat message with its display metadata.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub timestamp: String,
    pub sender: String,
    pub text: String,
    pub outgoing: bool,
    /// Delivery receipt arrived for this outgoing message.
    pub received: bool,
    /// A correction replaced the original text.
    pub edited: bool,
    pub spoiler_hint: Option<String>,
    pub spoiler_visible: bool,
    pub subject: Option<String>,
    pub oob_url: Option<String>,
    pub thread_hex: Option<String>,
}

impl ChatMessage {
    pub fn new(timestamp: String, sender: String, text: String, outgoing: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            sender,
            text,
            outgoing,
            received: false,
            edited: false,
            spoiler_hint: None,
            spoiler_visible: false,
            subject: None,
            oob_url: None,
            thread_hex: None,
        }
    }

    /// Hide the body behind a spoiler hint until the reader reveals it.
    pub fn with_spoiler(mut self, hint: Option<String>) -> Self {
        self.spoiler_hint = Some(hint.unwrap_or_default());
        self
    }

    pub fn with_subject(mut self, subject: String) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_oob_url(mut self, url: String) -> Self {
        self.oob_url = Some(url);
        self
    }

    pub fn with_thread(mut self, thread_hex: String) -> Self {
        self.thread_hex = Some(thread_hex);
        self
    }
}

/// Per-chat message history and read-state bookkeeping.
#[derive(Default, Clone)]
pub struct ChatModel {
    pub messages: Vec<ChatMessage>,
    pub unread_count: usize,
    pub scroll_offset: f32,
    /// The reader has scrolled away from the newest message.
    pub scrolled_up: bool,
    pub chat_state: ChatState,
    /// Thread the next outgoing message will be tagged with.
    pub thread: Option<ThreadTag>,
}

impl ChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, counting it as unread when it arrives while the
    /// chat is not being looked at.
    pub fn add_message(&mut self, msg: ChatMessage, is_active: bool) {
        if !msg.outgoing && !is_active {
            self.unread_count += 1;
        }
        self.messages.push(msg);
        if self.messages.len() > MAX_CHAT_MESSAGES {
            self.messages.drain(0..CHAT_TRIM_COUNT);
        }
    }

    pub fn clear_unread(&mut self) {
        self.unread_count = 0;
    }

    pub fn is_scrolled_up(&self) -> bool {
        self.scrolled_up
    }

    pub fn set_chat_state(&mut self, state: ChatState) {
        self.chat_state = state;
    }

    /// Mark an outgoing message as delivered.
    pub fn mark_received(&mut self, id: &str) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.received = true;
        }
    }

    /// Replace a message body with its corrected text.
    pub fn apply_correction(&mut self, id: &str, text: String) {
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == id) {
            msg.text = text;
            msg.edited = true;
        }
    }

    /// Start a new thread, or leave the current one.
    pub fn toggle_thread(&mut self) {
        if self.thread.is_some() {
            self.thread = None;
        } else {
            self.thread = Some(ThreadTag::new());
        }
    }
}

/// Current wall-clock timestamp in the display format used for messages.
pub fn now_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
