//! Registry of all chat windows, keyed by id with stable creation order.

use std::collections::HashMap;

use crate::viewport::ViewPort;
use crate::window::ChatWindow;

/// Owns every window in the shell. Lookup goes through the map; anything
/// order-sensitive walks the insertion-ordered id list.
#[derive(Default)]
pub struct WindowRegistry {
    windows: HashMap<String, ChatWindow>,
    order: Vec<String>,
    next_order_key: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window. Returns false (and drops the argument) when a
    /// window with the same id already exists.
    pub fn insert(&mut self, mut window: ChatWindow) -> bool {
        if self.windows.contains_key(&window.id) {
            return false;
        }
        window.order_key = self.next_order_key;
        self.next_order_key += 1;
        self.order.push(window.id.clone());
        self.windows.insert(window.id.clone(), window);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<ChatWindow> {
        self.order.retain(|w| w != id);
        self.windows.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&ChatWindow> {
        self.windows.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ChatWindow> {
        self.windows.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.windows.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Windows in creation order.
    pub fn iter_ordered(&self) -> impl Iterator<Item = &ChatWindow> {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    pub fn ordered_ids(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Windows that occupy horizontal space right now: not minimized and
    /// visible per the viewport. The control window counts like any other.
    pub fn shown_windows<'a>(&'a self, viewport: &dyn ViewPort) -> Vec<&'a ChatWindow> {
        self.iter_ordered()
            .filter(|w| !w.minimized && viewport.is_visible(&w.id))
            .collect()
    }

    /// Horizontal space a window occupies. The control window falls back
    /// to its toggle width when hidden; everything else contributes zero
    /// unless shown.
    pub fn width_of(&self, window: &ChatWindow, viewport: &dyn ViewPort) -> f32 {
        if window.is_control() {
            if viewport.is_visible(&window.id) {
                viewport.rendered_width(&window.id)
            } else {
                viewport.control_toggle_width()
            }
        } else if !window.minimized && viewport.is_visible(&window.id) {
            viewport.rendered_width(&window.id)
        } else {
            0.0
        }
    }

    /// Oldest window by creation order that is still maximized, skipping
    /// the control window and any explicitly excluded ids. Returns None
    /// when every candidate is minimized or excluded.
    pub fn oldest_maximized(&self, exclude_ids: &[&str]) -> Option<&ChatWindow> {
        self.iter_ordered().find(|w| {
            !w.is_control() && !w.minimized && !exclude_ids.contains(&w.id.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{WindowKind, CONTROL_WINDOW_ID};

    struct FixedViewPort {
        width: f32,
        hidden: Vec<String>,
    }

    impl ViewPort for FixedViewPort {
        fn viewport_width(&self) -> f32 {
            self.width
        }
        fn rendered_width(&self, _id: &str) -> f32 {
            300.0
        }
        fn is_visible(&self, id: &str) -> bool {
            !self.hidden.iter().any(|h| h == id)
        }
        fn hide(&mut self, id: &str) {
            self.hidden.push(id.to_string());
        }
        fn show(&mut self, id: &str) {
            self.hidden.retain(|h| h != id);
        }
        fn control_toggle_width(&self) -> f32 {
            48.0
        }
        fn tray_width(&self) -> f32 {
            130.0
        }
    }

    fn chat(id: &str) -> ChatWindow {
        ChatWindow::new(id, id.to_uppercase(), WindowKind::Chat)
    }

    #[test]
    fn test_insert_assigns_creation_order() {
        let mut reg = WindowRegistry::new();
        assert!(reg.insert(chat("a")));
        assert!(reg.insert(chat("b")));
        assert!(reg.insert(chat("c")));

        let ids: Vec<&str> = reg.iter_ordered().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(reg.get("a").unwrap().order_key < reg.get("b").unwrap().order_key);
        assert!(reg.get("b").unwrap().order_key < reg.get("c").unwrap().order_key);
    }

    #[test]
    fn test_insert_duplicate_is_rejected() {
        let mut reg = WindowRegistry::new();
        assert!(reg.insert(chat("a")));
        assert!(!reg.insert(chat("a")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order_consistent() {
        let mut reg = WindowRegistry::new();
        reg.insert(chat("a"));
        reg.insert(chat("b"));
        reg.insert(chat("c"));

        assert!(reg.remove("b").is_some());
        assert!(reg.remove("b").is_none());
        let ids: Vec<&str> = reg.iter_ordered().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_oldest_maximized_skips_control_minimized_and_excluded() {
        let mut reg = WindowRegistry::new();
        reg.insert(ChatWindow::new(
            CONTROL_WINDOW_ID,
            "Contacts",
            WindowKind::Control,
        ));
        reg.insert(chat("a"));
        reg.insert(chat("b"));
        reg.insert(chat("c"));

        // Control is oldest but never a candidate.
        assert_eq!(reg.oldest_maximized(&[]).map(|w| w.id.as_str()), Some("a"));

        reg.get_mut("a").unwrap().minimize();
        assert_eq!(reg.oldest_maximized(&[]).map(|w| w.id.as_str()), Some("b"));

        assert_eq!(
            reg.oldest_maximized(&["b"]).map(|w| w.id.as_str()),
            Some("c")
        );
        assert!(reg.oldest_maximized(&["b", "c"]).is_none());
    }

    #[test]
    fn test_shown_windows_excludes_minimized_and_hidden() {
        let mut reg = WindowRegistry::new();
        reg.insert(chat("a"));
        reg.insert(chat("b"));
        reg.insert(chat("c"));
        reg.get_mut("b").unwrap().minimize();

        let mut vp = FixedViewPort {
            width: 700.0,
            hidden: Vec::new(),
        };
        vp.hide("c");

        let shown: Vec<&str> = reg
            .shown_windows(&vp)
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(shown, vec!["a"]);
    }

    #[test]
    fn test_width_of_control_falls_back_to_toggle() {
        let mut reg = WindowRegistry::new();
        reg.insert(ChatWindow::new(
            CONTROL_WINDOW_ID,
            "Contacts",
            WindowKind::Control,
        ));
        reg.insert(chat("a"));
        reg.get_mut("a").unwrap().minimize();

        let mut vp = FixedViewPort {
            width: 700.0,
            hidden: Vec::new(),
        };

        let control = reg.get(CONTROL_WINDOW_ID).unwrap();
        assert_eq!(reg.width_of(control, &vp), 300.0);

        vp.hide(CONTROL_WINDOW_ID);
        let control = reg.get(CONTROL_WINDOW_ID).unwrap();
        assert_eq!(reg.width_of(control, &vp), 48.0);

        // Minimized chat contributes nothing.
        let a = reg.get("a").unwrap();
        assert_eq!(reg.width_of(a, &vp), 0.0);
    }
}
