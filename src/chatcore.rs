//! Simulated chat core.
//!
//! Runs on a background thread and plays the part of a connected server:
//! it acks opened chats, greets, receipts and answers outgoing messages,
//! and drips ambient chatter into conversations that are not being looked
//! at. The UI talks to it exclusively through the `CoreAction`/`CoreEvent`
//! channel pair, so swapping in a real connection does not touch the shell.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use uuid::Uuid;

use crate::chat::ChatState;
use crate::protocol::{CoreAction, CoreEvent};

/// Delay before the session comes up after the thread starts.
const SESSION_DELAY: Duration = Duration::from_millis(300);
/// Delay before a peer replies to an outgoing message.
const REPLY_DELAY: Duration = Duration::from_millis(900);
/// Delay before a delivery receipt arrives.
const RECEIPT_DELAY: Duration = Duration::from_millis(250);
/// Delay before the greeting's typo gets corrected.
const CORRECTION_DELAY: Duration = Duration::from_secs(2);
/// Interval between ambient chatter messages.
const CHATTER_INTERVAL: Duration = Duration::from_secs(45);

const GROUP_SENDERS: [&str; 3] = ["priya", "tomas", "noor"];

const REPLIES: [&str; 4] = [
    "makes sense",
    "ha, true",
    "let me check and get back to you",
    "sounds good, will do",
];

/// An event waiting for its delivery time.
struct Pending {
    due: Instant,
    event: CoreEvent,
}

struct ChatSession {
    title: String,
    groupchat: bool,
    chat_state: ChatState,
}

struct ChatCore {
    chats: HashMap<String, ChatSession>,
    order: Vec<String>,
    chatter_seq: usize,
    reply_seq: usize,
}

impl ChatCore {
    fn new() -> Self {
        Self {
            chats: HashMap::new(),
            order: Vec::new(),
            chatter_seq: 0,
            reply_seq: 0,
        }
    }

    fn sender_for(&mut self, id: &str) -> String {
        match self.chats.get(id) {
            Some(s) if s.groupchat => {
                let sender = GROUP_SENDERS[self.reply_seq % GROUP_SENDERS.len()];
                self.reply_seq += 1;
                sender.to_string()
            }
            Some(s) => s.title.clone(),
            None => "server".to_string(),
        }
    }

    fn handle(&mut self, action: CoreAction, pending: &mut Vec<Pending>, now: Instant) {
        match action {
            CoreAction::OpenChat {
                id,
                title,
                groupchat,
            } => {
                let is_new = !self.chats.contains_key(&id);
                if is_new {
                    self.order.push(id.clone());
                    self.chats.insert(
                        id.clone(),
                        ChatSession {
                            title: title.clone(),
                            groupchat,
                            chat_state: ChatState::Active,
                        },
                    );
                }
                pending.push(Pending {
                    due: now,
                    event: CoreEvent::ChatOpened {
                        id: id.clone(),
                        title: title.clone(),
                        groupchat,
                    },
                });
                // Greet once per session, with a typo the peer corrects
                // shortly after.
                if is_new {
                    let sender = self.sender_for(&id);
                    let msg_id = Uuid::new_v4().to_string();
                    let (typo, fixed) = if groupchat {
                        (
                            format!("welcom to {}!", title),
                            format!("welcome to {}!", title),
                        )
                    } else {
                        ("hey! good to se you".to_string(), "hey! good to see you".to_string())
                    };
                    pending.push(Pending {
                        due: now + REPLY_DELAY,
                        event: CoreEvent::MessageReceived {
                            chat: id.clone(),
                            id: msg_id.clone(),
                            sender,
                            text: typo,
                            spoiler_hint: None,
                            oob_url: None,
                            thread: None,
                        },
                    });
                    pending.push(Pending {
                        due: now + CORRECTION_DELAY,
                        event: CoreEvent::MessageCorrected {
                            chat: id,
                            id: msg_id,
                            text: fixed,
                        },
                    });
                }
            }

            CoreAction::CloseChat { id } => {
                self.chats.remove(&id);
                self.order.retain(|c| *c != id);
                pending.push(Pending {
                    due: now,
                    event: CoreEvent::ChatClosed { id },
                });
            }

            CoreAction::SendMessage {
                chat,
                id,
                text: _,
                thread,
            } => {
                pending.push(Pending {
                    due: now + RECEIPT_DELAY,
                    event: CoreEvent::ReceiptReceived {
                        chat: chat.clone(),
                        id,
                    },
                });
                let sender = self.sender_for(&chat);
                let reply = REPLIES[self.reply_seq % REPLIES.len()];
                self.reply_seq += 1;
                pending.push(Pending {
                    due: now + REPLY_DELAY,
                    event: CoreEvent::MessageReceived {
                        chat,
                        id: Uuid::new_v4().to_string(),
                        sender,
                        text: reply.to_string(),
                        spoiler_hint: None,
                        oob_url: None,
                        // Replies stay in the thread they were asked in.
                        thread,
                    },
                });
            }

            CoreAction::SetChatState { chat, state } => {
                if let Some(session) = self.chats.get_mut(&chat) {
                    session.chat_state = state;
                }
            }
        }
    }

    /// Drop an ambient message into some chat, preferring ones nobody is
    /// looking at so minimized windows accumulate unread counts.
    fn push_chatter(&mut self, pending: &mut Vec<Pending>, now: Instant) {
        let inactive: Vec<String> = self
            .order
            .iter()
            .filter(|id| {
                self.chats
                    .get(*id)
                    .map(|s| s.chat_state == ChatState::Inactive)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        let pool = if inactive.is_empty() {
            self.order.clone()
        } else {
            inactive
        };
        if pool.is_empty() {
            return;
        }

        let chat = pool[self.chatter_seq % pool.len()].clone();
        let sender = self.sender_for(&chat);
        let event = match self.chatter_seq % 3 {
            0 => CoreEvent::MessageReceived {
                chat,
                id: Uuid::new_v4().to_string(),
                sender,
                text: "still around?".to_string(),
                spoiler_hint: None,
                oob_url: None,
                thread: None,
            },
            1 => CoreEvent::MessageReceived {
                chat,
                id: Uuid::new_v4().to_string(),
                sender,
                text: "the bridge scene was a dream all along".to_string(),
                spoiler_hint: Some("movie night".to_string()),
                oob_url: None,
                thread: None,
            },
            _ => CoreEvent::MessageReceived {
                chat,
                id: Uuid::new_v4().to_string(),
                sender,
                text: "draft of the poster".to_string(),
                spoiler_hint: None,
                oob_url: Some("https://files.example.org/poster-draft.png".to_string()),
                thread: None,
            },
        };
        self.chatter_seq += 1;
        pending.push(Pending { due: now, event });
    }
}

/// Core loop. Returns when the action channel closes or the event channel
/// has no receiver left.
pub fn run_chatcore(action_rx: Receiver<CoreAction>, event_tx: Sender<CoreEvent>) {
    let mut core = ChatCore::new();
    let start = Instant::now();
    let mut pending: Vec<Pending> = vec![Pending {
        due: start + SESSION_DELAY,
        event: CoreEvent::SessionUp,
    }];
    let mut next_chatter = start + CHATTER_INTERVAL;

    loop {
        let now = Instant::now();

        // Deliver everything that has come due, in scheduling order.
        let mut i = 0;
        while i < pending.len() {
            if pending[i].due <= now {
                let item = pending.remove(i);
                if event_tx.send(item.event).is_err() {
                    return;
                }
            } else {
                i += 1;
            }
        }

        if now >= next_chatter {
            core.push_chatter(&mut pending, now);
            next_chatter = now + CHATTER_INTERVAL;
        }

        let deadline = pending
            .iter()
            .map(|p| p.due)
            .chain(std::iter::once(next_chatter))
            .min()
            .unwrap_or(next_chatter);
        let wait = deadline.saturating_duration_since(Instant::now());

        match action_rx.recv_timeout(wait) {
            Ok(action) => core.handle(action, &mut pending, Instant::now()),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::thread;

    fn spawn_core() -> (
        Sender<CoreAction>,
        Receiver<CoreEvent>,
        thread::JoinHandle<()>,
    ) {
        let (action_tx, action_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let handle = thread::spawn(move || run_chatcore(action_rx, event_tx));
        (action_tx, event_rx, handle)
    }

    fn recv(event_rx: &Receiver<CoreEvent>) -> CoreEvent {
        event_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("core should deliver an event in time")
    }

    #[test]
    fn test_session_up_is_announced_first() {
        let (_action_tx, event_rx, _handle) = spawn_core();
        assert!(matches!(recv(&event_rx), CoreEvent::SessionUp));
    }

    #[test]
    fn test_open_chat_acks_then_greets_then_corrects() {
        let (action_tx, event_rx, _handle) = spawn_core();
        assert!(matches!(recv(&event_rx), CoreEvent::SessionUp));

        action_tx
            .send(CoreAction::OpenChat {
                id: "ada".into(),
                title: "Ada".into(),
                groupchat: false,
            })
            .unwrap();

        match recv(&event_rx) {
            CoreEvent::ChatOpened { id, groupchat, .. } => {
                assert_eq!(id, "ada");
                assert!(!groupchat);
            }
            other => panic!("expected ChatOpened, got {:?}", other),
        }

        let greeting_id = match recv(&event_rx) {
            CoreEvent::MessageReceived {
                chat, id, sender, ..
            } => {
                assert_eq!(chat, "ada");
                assert_eq!(sender, "Ada");
                id
            }
            other => panic!("expected greeting, got {:?}", other),
        };

        match recv(&event_rx) {
            CoreEvent::MessageCorrected { chat, id, text } => {
                assert_eq!(chat, "ada");
                assert_eq!(id, greeting_id);
                assert!(text.contains("see you"));
            }
            other => panic!("expected correction, got {:?}", other),
        }
    }

    #[test]
    fn test_reopening_a_chat_does_not_greet_again() {
        let (action_tx, event_rx, _handle) = spawn_core();
        assert!(matches!(recv(&event_rx), CoreEvent::SessionUp));

        for _ in 0..2 {
            action_tx
                .send(CoreAction::OpenChat {
                    id: "ada".into(),
                    title: "Ada".into(),
                    groupchat: false,
                })
                .unwrap();
        }

        assert!(matches!(recv(&event_rx), CoreEvent::ChatOpened { .. }));
        // Second ack arrives before the first greeting is due.
        assert!(matches!(recv(&event_rx), CoreEvent::ChatOpened { .. }));
        assert!(matches!(recv(&event_rx), CoreEvent::MessageReceived { .. }));
        assert!(matches!(recv(&event_rx), CoreEvent::MessageCorrected { .. }));
        assert!(event_rx.recv_timeout(Duration::from_millis(500)).is_err());
    }

    #[test]
    fn test_send_message_gets_receipt_before_reply() {
        let (action_tx, event_rx, _handle) = spawn_core();
        assert!(matches!(recv(&event_rx), CoreEvent::SessionUp));

        action_tx
            .send(CoreAction::OpenChat {
                id: "lin".into(),
                title: "Lin".into(),
                groupchat: false,
            })
            .unwrap();
        assert!(matches!(recv(&event_rx), CoreEvent::ChatOpened { .. }));

        action_tx
            .send(CoreAction::SendMessage {
                chat: "lin".into(),
                id: "msg-1".into(),
                text: "lunch?".into(),
                thread: Some("thread-9".into()),
            })
            .unwrap();

        // Receipt at +250ms, then the greeting at +900ms shares the slot
        // with the reply; both carry distinguishable shapes.
        match recv(&event_rx) {
            CoreEvent::ReceiptReceived { chat, id } => {
                assert_eq!(chat, "lin");
                assert_eq!(id, "msg-1");
            }
            other => panic!("expected receipt, got {:?}", other),
        }

        let mut saw_threaded_reply = false;
        for _ in 0..2 {
            if let CoreEvent::MessageReceived { thread, .. } = recv(&event_rx) {
                if thread.as_deref() == Some("thread-9") {
                    saw_threaded_reply = true;
                }
            }
        }
        assert!(saw_threaded_reply, "reply should stay in the asked thread");
    }

    #[test]
    fn test_close_chat_is_acked() {
        let (action_tx, event_rx, _handle) = spawn_core();
        assert!(matches!(recv(&event_rx), CoreEvent::SessionUp));

        action_tx
            .send(CoreAction::OpenChat {
                id: "mara".into(),
                title: "Mara".into(),
                groupchat: false,
            })
            .unwrap();
        assert!(matches!(recv(&event_rx), CoreEvent::ChatOpened { .. }));

        action_tx
            .send(CoreAction::CloseChat { id: "mara".into() })
            .unwrap();

        loop {
            match recv(&event_rx) {
                CoreEvent::ChatClosed { id } => {
                    assert_eq!(id, "mara");
                    break;
                }
                // Greeting traffic may still be in flight.
                CoreEvent::MessageReceived { .. } | CoreEvent::MessageCorrected { .. } => {}
                other => panic!("unexpected event {:?}", other),
            }
        }
    }

    #[test]
    fn test_core_exits_when_ui_hangs_up() {
        let (action_tx, event_rx, handle) = spawn_core();
        drop(action_tx);
        drop(event_rx);
        handle.join().expect("core thread should exit cleanly");
    }
}
