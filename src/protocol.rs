use crate::chat::ChatState;

/// Actions sent from the UI to the chat core
#[derive(Debug, Clone)]
pub enum CoreAction {
    /// Open (or re-open) a conversation with a contact or room
    OpenChat {
        id: String,
        title: String,
        groupchat: bool,
    },
    /// Close a conversation
    CloseChat { id: String },
    /// Send a message into a conversation
    SendMessage {
        chat: String,
        /// Message id, used to match the delivery receipt
        id: String,
        text: String,
        /// Thread id the message belongs to, if any
        thread: Option<String>,
    },
    /// Tell the peer whether the conversation is being attended
    SetChatState { chat: String, state: ChatState },
}

/// Events sent from the chat core to the UI
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// Session established, chats may flow
    SessionUp,
    /// A conversation is ready on the core side
    ChatOpened {
        id: String,
        title: String,
        groupchat: bool,
    },
    /// A conversation was torn down on the core side
    ChatClosed { id: String },
    /// An incoming message for a conversation
    MessageReceived {
        chat: String,
        /// Message id, referenced by later corrections
        id: String,
        sender: String,
        text: String,
        /// Body is spoilered behind this hint ("" for a bare spoiler)
        spoiler_hint: Option<String>,
        /// Out-of-band attachment URL
        oob_url: Option<String>,
        /// Thread id the message belongs to
        thread: Option<String>,
    },
    /// Delivery receipt for a message we sent
    ReceiptReceived { chat: String, id: String },
    /// A previous message was replaced with corrected text
    MessageCorrected {
        chat: String,
        id: String,
        text: String,
    },
}
