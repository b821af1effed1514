//! Tray of minimized chats: the strip at the bottom edge that holds one
//! entry per minimized window, with an aggregate unread badge.

use std::time::{Duration, Instant};

use crate::events::{Notifier, ShellEvent};
use crate::registry::WindowRegistry;
use crate::timing::Cooldown;

/// Window during which repeated restore requests for the same entry are
/// dropped after the first one fires.
pub const RESTORE_DEBOUNCE: Duration = Duration::from_millis(200);

/// One minimized window as listed in the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizedEntry {
    pub id: String,
    pub title: String,
}

/// Snapshot of the tray for rendering the toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrayState {
    pub collapsed: bool,
    pub count: usize,
    pub unread_total: usize,
}

/// Holds the minimized entries in the order their windows were created.
/// The tray never decides to minimize anything itself; the trimmer and
/// the heading buttons feed it.
pub struct MinimizedTray {
    entries: Vec<MinimizedEntry>,
    collapsed: bool,
    unread_total: usize,
    restore_guard: Cooldown,
}

impl MinimizedTray {
    pub fn new(collapsed: bool) -> Self {
        Self {
            entries: Vec::new(),
            collapsed,
            unread_total: 0,
            restore_guard: Cooldown::new(RESTORE_DEBOUNCE),
        }
    }

    /// Seed entries for windows that were already minimized when the shell
    /// came up, then announce readiness. Trimming stays inert until the
    /// `MinimizedTrayInitialized` event this emits.
    pub fn populate(&mut self, registry: &WindowRegistry, notifier: &mut Notifier) {
        for window in registry.iter_ordered() {
            if window.minimized && !window.is_control() {
                self.add_entry(&window.id, &window.title, notifier);
            }
        }
        self.update_unread_total(registry);
        notifier.emit(ShellEvent::MinimizedTrayInitialized);
    }

    /// Track a newly minimized window. Adding an id twice is a no-op.
    pub fn add_entry(&mut self, id: &str, title: &str, notifier: &mut Notifier) {
        if self.contains(id) {
            return;
        }
        self.entries.push(MinimizedEntry {
            id: id.to_string(),
            title: title.to_string(),
        });
        notifier.emit(ShellEvent::MinimizedEntryInitialized { id: id.to_string() });
    }

    pub fn remove_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// A window was closed outright; drop its entry and restore history.
    pub fn on_window_closed(&mut self, id: &str) {
        self.remove_entry(id);
        self.restore_guard.forget(id);
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Recompute the aggregate unread badge from the tracked entries.
    pub fn update_unread_total(&mut self, registry: &WindowRegistry) {
        self.unread_total = self
            .entries
            .iter()
            .filter_map(|e| registry.get(&e.id))
            .map(|w| w.model.unread_count)
            .sum();
    }

    /// Take an entry out of the tray for restoring. Returns true when the
    /// caller should proceed to maximize the window; repeats within the
    /// debounce window return false.
    pub fn restore(&mut self, id: &str) -> bool {
        self.restore_at(id, Instant::now())
    }

    pub fn restore_at(&mut self, id: &str, now: Instant) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.restore_guard.try_fire_at(id, now) {
            return false;
        }
        self.remove_entry(id);
        true
    }

    pub fn state(&self) -> TrayState {
        TrayState {
            collapsed: self.collapsed,
            count: self.entries.len(),
            unread_total: self.unread_total,
        }
    }

    pub fn entries(&self) -> &[MinimizedEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{ChatMessage, ChatModel};
    use crate::window::{ChatWindow, WindowKind, CONTROL_WINDOW_ID};

    fn registry_with(ids: &[&str]) -> WindowRegistry {
        let mut reg = WindowRegistry::new();
        for id in ids {
            reg.insert(ChatWindow::new(*id, id.to_uppercase(), WindowKind::Chat));
        }
        reg
    }

    fn unread(model: &mut ChatModel, n: usize) {
        for i in 0..n {
            model.add_message(
                ChatMessage::new("12:00:00".into(), "x".into(), format!("m{}", i), false),
                false,
            );
        }
    }

    #[test]
    fn test_add_and_remove_entries() {
        let mut tray = MinimizedTray::new(false);
        let mut notifier = Notifier::new();

        tray.add_entry("ada", "Ada", &mut notifier);
        tray.add_entry("ada", "Ada", &mut notifier);
        tray.add_entry("lin", "Lin", &mut notifier);
        assert_eq!(tray.state().count, 2);

        assert!(tray.remove_entry("ada"));
        assert!(!tray.remove_entry("ada"));
        assert_eq!(tray.state().count, 1);
    }

    #[test]
    fn test_populate_seeds_minimized_windows_and_announces() {
        let mut reg = registry_with(&["ada", "lin", "mara"]);
        reg.insert(ChatWindow::new(
            CONTROL_WINDOW_ID,
            "Contacts",
            WindowKind::Control,
        ));
        reg.get_mut("ada").unwrap().minimize();
        reg.get_mut("mara").unwrap().minimize();

        let mut notifier = Notifier::new();
        let rx = notifier.subscribe();
        let mut tray = MinimizedTray::new(false);
        tray.populate(&reg, &mut notifier);

        let ids: Vec<&str> = tray.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ada", "mara"]);

        // Per-entry events first, the readiness event last.
        assert_eq!(
            rx.try_recv(),
            Ok(ShellEvent::MinimizedEntryInitialized {
                id: "ada".to_string()
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(ShellEvent::MinimizedEntryInitialized {
                id: "mara".to_string()
            })
        );
        assert_eq!(rx.try_recv(), Ok(ShellEvent::MinimizedTrayInitialized));
    }

    #[test]
    fn test_unread_total_counts_tracked_entries_only() {
        let mut reg = registry_with(&["ada", "lin"]);
        unread(&mut reg.get_mut("ada").unwrap().model, 3);
        unread(&mut reg.get_mut("lin").unwrap().model, 5);

        let mut tray = MinimizedTray::new(false);
        let mut notifier = Notifier::new();
        tray.add_entry("ada", "Ada", &mut notifier);
        tray.update_unread_total(&reg);

        // Lin is not minimized, so its unreads stay off the tray badge.
        assert_eq!(tray.state().unread_total, 3);
    }

    #[test]
    fn test_restore_is_debounced_per_entry() {
        let mut tray = MinimizedTray::new(false);
        let mut notifier = Notifier::new();
        let start = Instant::now();

        tray.add_entry("ada", "Ada", &mut notifier);
        assert!(tray.restore_at("ada", start));
        // Second click lands while the first is still settling.
        assert!(!tray.restore_at("ada", start + Duration::from_millis(50)));

        // Re-minimized immediately; still inside the window.
        tray.add_entry("ada", "Ada", &mut notifier);
        assert!(!tray.restore_at("ada", start + Duration::from_millis(150)));
        assert!(tray.restore_at("ada", start + Duration::from_millis(250)));
    }

    #[test]
    fn test_restore_debounce_keys_are_independent() {
        let mut tray = MinimizedTray::new(false);
        let mut notifier = Notifier::new();
        let start = Instant::now();

        tray.add_entry("ada", "Ada", &mut notifier);
        tray.add_entry("lin", "Lin", &mut notifier);
        assert!(tray.restore_at("ada", start));
        assert!(tray.restore_at("lin", start + Duration::from_millis(10)));
    }

    #[test]
    fn test_closed_window_resets_restore_history() {
        let mut tray = MinimizedTray::new(false);
        let mut notifier = Notifier::new();
        let start = Instant::now();

        tray.add_entry("ada", "Ada", &mut notifier);
        assert!(tray.restore_at("ada", start));

        tray.add_entry("ada", "Ada", &mut notifier);
        tray.on_window_closed("ada");
        assert!(tray.is_empty());

        // A future window reusing the id starts with a clean guard.
        tray.add_entry("ada", "Ada", &mut notifier);
        assert!(tray.restore_at("ada", start + Duration::from_millis(50)));
    }

    #[test]
    fn test_toggle_collapse() {
        let mut tray = MinimizedTray::new(false);
        assert!(!tray.is_collapsed());
        tray.toggle();
        assert!(tray.is_collapsed());
        tray.toggle();
        assert!(!tray.is_collapsed());
    }
}
