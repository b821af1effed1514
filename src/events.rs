//! Window shell lifecycle events.
//!
//! State transitions in the registry and tray are announced on a small
//! event bus so interested parties (the chat-core bridge, tests) can react
//! without the trimming code knowing about them.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Lifecycle notifications emitted by the window shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A window returned to the shown row, either by user action or restore.
    ChatWindowMaximized { id: String },
    /// A window was minimized into the tray, by the user or the trimmer.
    ChatWindowMinimized { id: String },
    /// A window was removed from the registry entirely.
    ChatWindowClosed { id: String },
    /// The tray finished seeding its entries from the registry.
    MinimizedTrayInitialized,
    /// A single tray entry came into existence.
    MinimizedEntryInitialized { id: String },
}

/// Fan-out sender for `ShellEvent`. Subscribers that drop their receiver
/// are pruned on the next emit.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<Sender<ShellEvent>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ShellEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: ShellEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_receives_events() {
        let mut notifier = Notifier::new();
        let rx = notifier.subscribe();

        notifier.emit(ShellEvent::ChatWindowMinimized {
            id: "ada".to_string(),
        });
        notifier.emit(ShellEvent::ChatWindowMaximized {
            id: "ada".to_string(),
        });

        assert_eq!(
            rx.try_recv(),
            Ok(ShellEvent::ChatWindowMinimized {
                id: "ada".to_string()
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(ShellEvent::ChatWindowMaximized {
                id: "ada".to_string()
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let mut notifier = Notifier::new();
        let rx = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 1);

        drop(rx);
        notifier.emit(ShellEvent::MinimizedTrayInitialized);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_multiple_subscribers_each_get_a_copy() {
        let mut notifier = Notifier::new();
        let rx1 = notifier.subscribe();
        let rx2 = notifier.subscribe();

        notifier.emit(ShellEvent::ChatWindowClosed {
            id: "lin".to_string(),
        });

        let expected = ShellEvent::ChatWindowClosed {
            id: "lin".to_string(),
        };
        assert_eq!(rx1.try_recv(), Ok(expected.clone()));
        assert_eq!(rx2.try_recv(), Ok(expected));
    }
}
