//! Core DockApp struct definition and initialization

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use std::thread;

use crate::chat::{now_timestamp, ChatMessage};
use crate::chatcore::run_chatcore;
use crate::config::{load_settings, save_settings, SavedChat, Settings};
use crate::events::{Notifier, ShellEvent};
use crate::logging::{LogEntry, Logger};
use crate::protocol::{CoreAction, CoreEvent};
use crate::registry::WindowRegistry;
use crate::tray::MinimizedTray;
use crate::trim::{maximize_window, minimize_window, TrimGate, TrimmingCoordinator};
use crate::ui::overlay::OverlayViewPort;
use crate::ui::theme::DockTheme;
use crate::viewport::ViewPort;
use crate::window::{ChatWindow, WindowKind, CONTROL_WINDOW_ID};

pub struct DockApp {
    // Window shell state
    pub registry: WindowRegistry,
    pub tray: MinimizedTray,
    pub coordinator: TrimmingCoordinator,
    pub notifier: Notifier,
    pub viewport: OverlayViewPort,

    // Channels for chat-core communication
    pub action_tx: Sender<CoreAction>,
    pub event_rx: Receiver<CoreEvent>,

    // Our own subscription to shell events, bridged to chat states
    pub shell_rx: Receiver<ShellEvent>,

    // Session
    pub connected: bool,
    pub settings: Settings,

    // Transcript logger (None if the log directory is unavailable)
    pub logger: Option<Logger>,

    // Resize tracking for the debounced trim
    pub last_screen_width: f32,
}

impl DockApp {
    /// Get the current theme based on the settings theme string
    pub(super) fn get_theme(&self) -> DockTheme {
        DockTheme::by_name(&self.settings.theme)
    }

    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Create channels for UI <-> chat core
        let (action_tx, action_rx) = unbounded::<CoreAction>();
        let (event_tx, event_rx) = unbounded::<CoreEvent>();

        // Spawn the chat-core thread
        thread::spawn(move || {
            run_chatcore(action_rx, event_tx);
        });

        // Try to load persisted settings and apply theme in creation context
        let settings = load_settings().unwrap_or_default();
        match settings.theme.as_str() {
            "light" => cc.egui_ctx.set_visuals(egui::Visuals::light()),
            _ => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
        }

        // Apply modern theme styling
        crate::ui::theme::apply_app_style(&cc.egui_ctx);

        let logger = match Logger::new() {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!("Transcript logging disabled: {}", e);
                None
            }
        };

        let mut notifier = Notifier::new();
        let shell_rx = notifier.subscribe();

        let mut registry = WindowRegistry::new();
        registry.insert(ChatWindow::new(
            CONTROL_WINDOW_ID,
            "Contacts",
            WindowKind::Control,
        ));

        // Restore the windows that were open last session, with their
        // minimized flags as saved. Overflow is resolved on session-up,
        // once trimming is live.
        let mut viewport = OverlayViewPort::new(false);
        for saved in &settings.open_chats {
            let kind = if saved.groupchat {
                WindowKind::GroupChat
            } else {
                WindowKind::Chat
            };
            let mut window = ChatWindow::new(&saved.id, &saved.title, kind);
            if saved.minimized {
                window.minimize();
                viewport.hide(&saved.id);
            }
            registry.insert(window);
        }

        // Seed the tray from the restored registry, then arm the trimmer.
        let mut tray = MinimizedTray::new(settings.tray_collapsed);
        tray.populate(&registry, &mut notifier);
        let mut coordinator = TrimmingCoordinator::new();
        coordinator.mark_tray_ready();

        // Let the core know about every restored conversation.
        for saved in &settings.open_chats {
            let _ = action_tx.send(CoreAction::OpenChat {
                id: saved.id.clone(),
                title: saved.title.clone(),
                groupchat: saved.groupchat,
            });
        }

        Self {
            registry,
            tray,
            coordinator,
            notifier,
            viewport,

            action_tx,
            event_rx,
            shell_rx,

            connected: false,
            settings,

            logger,

            last_screen_width: 0.0,
        }
    }

    pub(super) fn gate(&self) -> TrimGate {
        TrimGate {
            no_trimming: self.settings.no_trimming,
            connected: self.connected,
            view_mode: self.settings.view_mode,
        }
    }

    /// Run a trim pass with the current gate. `candidate` is a window
    /// being inserted this frame.
    pub(super) fn run_trim(&mut self, candidate: Option<&str>) -> Vec<String> {
        self.coordinator.trim(
            self.gate(),
            &mut self.registry,
            &mut self.tray,
            &mut self.viewport,
            &mut self.notifier,
            candidate,
        )
    }

    /// Open a conversation window (or restore it if minimized), tell the
    /// core, and trim with the newcomer protected.
    pub(super) fn open_chat(&mut self, id: &str, title: &str, groupchat: bool) {
        if self.registry.contains(id) {
            let minimized = self.registry.get(id).map(|w| w.minimized).unwrap_or(false);
            if minimized && self.tray.restore(id) {
                maximize_window(
                    id,
                    &mut self.registry,
                    &mut self.tray,
                    &mut self.viewport,
                    &mut self.notifier,
                );
            }
            return;
        }

        let kind = if groupchat {
            WindowKind::GroupChat
        } else {
            WindowKind::Chat
        };
        self.registry.insert(ChatWindow::new(id, title, kind));
        let _ = self.action_tx.send(CoreAction::OpenChat {
            id: id.to_string(),
            title: title.to_string(),
            groupchat,
        });
        self.run_trim(Some(id));
    }

    /// Minimize a window into the tray (heading button or trimmer path).
    pub(super) fn minimize_chat(&mut self, id: &str) {
        minimize_window(
            id,
            &mut self.registry,
            &mut self.tray,
            &mut self.viewport,
            &mut self.notifier,
        );
    }

    /// Restore a tray entry, honoring the per-entry restore debounce.
    pub(super) fn restore_chat(&mut self, id: &str) {
        if self.tray.restore(id) {
            maximize_window(
                id,
                &mut self.registry,
                &mut self.tray,
                &mut self.viewport,
                &mut self.notifier,
            );
        }
    }

    /// Drop a window from the shell. `notify_core` is false when the
    /// close originated on the core side.
    pub(super) fn remove_window(&mut self, id: &str, notify_core: bool) {
        if id == CONTROL_WINDOW_ID {
            return;
        }
        if self.registry.remove(id).is_some() {
            self.tray.on_window_closed(id);
            self.tray.update_unread_total(&self.registry);
            self.viewport.forget(id);
            self.notifier.emit(ShellEvent::ChatWindowClosed { id: id.to_string() });
            if notify_core {
                let _ = self.action_tx.send(CoreAction::CloseChat { id: id.to_string() });
            }
        }
    }

    /// Snapshot runtime state into the settings and write them out.
    pub(super) fn persist_settings(&mut self) {
        self.settings.tray_collapsed = self.tray.is_collapsed();
        self.settings.open_chats = self
            .registry
            .iter_ordered()
            .filter(|w| !w.is_control())
            .map(|w| SavedChat {
                id: w.id.clone(),
                title: w.title.clone(),
                groupchat: w.kind == WindowKind::GroupChat,
                minimized: w.minimized,
            })
            .collect();
        if let Err(e) = save_settings(&self.settings) {
            eprintln!("Failed to save settings: {}", e);
        }
    }

    /// Append an outgoing message, log it, and hand it to the core.
    pub(super) fn send_message(&mut self, chat: &str, text: String) {
        let display_name = self.settings.display_name.clone();
        let (msg_id, timestamp, thread_id) = match self.registry.get_mut(chat) {
            Some(window) => {
                let thread = window.model.thread.clone();
                let mut msg =
                    ChatMessage::new(now_timestamp(), display_name.clone(), text.clone(), true);
                if let Some(tag) = &thread {
                    msg = msg.with_thread(tag.hex.clone());
                }
                let msg_id = msg.id.clone();
                let timestamp = msg.timestamp.clone();
                window.model.add_message(msg, true);
                (msg_id, timestamp, thread.map(|t| t.id))
            }
            None => return,
        };

        if let Some(logger) = &self.logger {
            logger.log(LogEntry {
                chat: chat.to_string(),
                timestamp,
                sender: display_name,
                message: text.clone(),
            });
        }

        let _ = self.action_tx.send(CoreAction::SendMessage {
            chat: chat.to_string(),
            id: msg_id,
            text,
            thread: thread_id,
        });
    }
}

impl Drop for DockApp {
    fn drop(&mut self) {
        // Last chance to persist the open-chats snapshot
        self.persist_settings();
    }
}
