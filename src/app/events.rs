//! Event processing from the chat core and the shell event bus

use crate::chat::{now_timestamp, ChatMessage, ChatState, ThreadTag};
use crate::events::ShellEvent;
use crate::logging::LogEntry;
use crate::protocol::{CoreAction, CoreEvent};
use crate::window::{ChatWindow, WindowKind};

use super::core::DockApp;

impl DockApp {
    /// Process all pending events from the chat core
    pub fn process_core_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                CoreEvent::SessionUp => {
                    self.connected = true;
                    // Windows restored from the last session may overflow
                    // the viewport; resolve that now that trimming is live.
                    self.run_trim(None);
                }

                CoreEvent::ChatOpened {
                    id,
                    title,
                    groupchat,
                } => {
                    let kind = if groupchat {
                        WindowKind::GroupChat
                    } else {
                        WindowKind::Chat
                    };
                    // Acks for windows we already hold are no-ops.
                    if self.registry.insert(ChatWindow::new(&id, &title, kind)) {
                        self.run_trim(Some(&id));
                    }
                }

                CoreEvent::ChatClosed { id } => {
                    self.remove_window(&id, false);
                }

                CoreEvent::MessageReceived {
                    chat,
                    id,
                    sender,
                    text,
                    spoiler_hint,
                    oob_url,
                    thread,
                } => {
                    let timestamp = match self.registry.get_mut(&chat) {
                        Some(window) => {
                            let is_active =
                                !window.minimized && !window.model.is_scrolled_up();
                            let mut msg = ChatMessage::new(
                                now_timestamp(),
                                sender.clone(),
                                text.clone(),
                                false,
                            );
                            msg.id = id;
                            if spoiler_hint.is_some() {
                                msg = msg.with_spoiler(spoiler_hint);
                            }
                            if let Some(url) = oob_url {
                                msg = msg.with_oob_url(url);
                            }
                            if let Some(thread_id) = thread {
                                msg = msg.with_thread(ThreadTag::from_id(thread_id).hex);
                            }
                            let timestamp = msg.timestamp.clone();
                            window.model.add_message(msg, is_active);
                            Some(timestamp)
                        }
                        None => None,
                    };

                    if let Some(timestamp) = timestamp {
                        self.tray.update_unread_total(&self.registry);
                        if let Some(logger) = &self.logger {
                            logger.log(LogEntry {
                                chat,
                                timestamp,
                                sender,
                                message: text,
                            });
                        }
                    }
                }

                CoreEvent::ReceiptReceived { chat, id } => {
                    if let Some(window) = self.registry.get_mut(&chat) {
                        window.model.mark_received(&id);
                    }
                }

                CoreEvent::MessageCorrected { chat, id, text } => {
                    if let Some(window) = self.registry.get_mut(&chat) {
                        window.model.apply_correction(&id, text);
                    }
                }
            }
        }
    }

    /// Drain our own shell-event subscription, bridging window state
    /// changes to chat-state notifications for the core.
    pub(super) fn process_shell_events(&mut self) {
        while let Ok(event) = self.shell_rx.try_recv() {
            match event {
                ShellEvent::ChatWindowMinimized { id } => {
                    let _ = self.action_tx.send(CoreAction::SetChatState {
                        chat: id,
                        state: ChatState::Inactive,
                    });
                }
                ShellEvent::ChatWindowMaximized { id } => {
                    let _ = self.action_tx.send(CoreAction::SetChatState {
                        chat: id,
                        state: ChatState::Active,
                    });
                }
                ShellEvent::ChatWindowClosed { .. }
                | ShellEvent::MinimizedTrayInitialized
                | ShellEvent::MinimizedEntryInitialized { .. } => {}
            }
        }
    }
}
