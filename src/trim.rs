//! Auto-minimize pass that keeps the overlay row inside the viewport.
//!
//! When the shown windows no longer fit side by side, the oldest maximized
//! chat is minimized into the tray, repeatedly, until everything fits or
//! no candidate remains. The pass runs on insertion, on control-window
//! open, and debounced after viewport resizes.

use std::time::Duration;

use crate::chat::ChatState;
use crate::config::ViewMode;
use crate::events::{Notifier, ShellEvent};
use crate::registry::WindowRegistry;
use crate::timing::Debouncer;
use crate::tray::MinimizedTray;
use crate::viewport::ViewPort;

/// Quiet period after the last resize before a trim pass runs.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Session flags consulted before any trim work happens.
#[derive(Debug, Clone, Copy)]
pub struct TrimGate {
    /// User preference that disables auto-minimizing entirely.
    pub no_trimming: bool,
    /// Chat core session is up.
    pub connected: bool,
    pub view_mode: ViewMode,
}

/// Schedules and runs trim passes. Stays inert until the tray has been
/// populated, so windows restored from a previous session are never
/// trimmed against an empty tray.
pub struct TrimmingCoordinator {
    tray_ready: bool,
    resize_debounce: Debouncer<()>,
}

impl Default for TrimmingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrimmingCoordinator {
    pub fn new() -> Self {
        Self {
            tray_ready: false,
            resize_debounce: Debouncer::new(RESIZE_DEBOUNCE),
        }
    }

    /// Called once the tray finished seeding from the registry.
    pub fn mark_tray_ready(&mut self) {
        self.tray_ready = true;
    }

    pub fn is_tray_ready(&self) -> bool {
        self.tray_ready
    }

    /// Note a viewport resize; the actual trim runs once the debounce
    /// window closes with no further resizes.
    pub fn schedule_resize_trim(&mut self) {
        self.resize_debounce.schedule(());
    }

    /// True once the debounced resize trim is due. Consumes the pending
    /// schedule, so a burst of resizes yields a single trim.
    pub fn resize_trim_due(&mut self) -> bool {
        self.resize_debounce.fire_ready().is_some()
    }

    pub fn resize_trim_remaining(&self) -> Option<Duration> {
        self.resize_debounce.time_remaining()
    }

    /// Run one trim pass. `candidate` is a window about to appear whose
    /// width must be accounted for but which is itself exempt from being
    /// trimmed. Returns the ids minimized, oldest first.
    pub fn trim(
        &self,
        gate: TrimGate,
        registry: &mut WindowRegistry,
        tray: &mut MinimizedTray,
        viewport: &mut dyn ViewPort,
        notifier: &mut Notifier,
        candidate: Option<&str>,
    ) -> Vec<String> {
        let mut trimmed = Vec::new();

        if gate.no_trimming || !gate.connected || gate.view_mode != ViewMode::Overlayed {
            return trimmed;
        }
        if !self.tray_ready {
            return trimmed;
        }

        let (shown_count, widest) = {
            let shown = registry.shown_windows(viewport);
            let widest = shown
                .iter()
                .map(|w| registry.width_of(w, viewport))
                .fold(0.0f32, f32::max);
            (shown.len(), widest)
        };
        if shown_count <= 1 {
            return trimmed;
        }
        // A window as wide as the viewport means a single-column layout;
        // trimming would thrash without ever fitting more than one.
        if widest >= viewport.viewport_width() {
            return trimmed;
        }

        loop {
            let tray_w = if tray.is_empty() {
                0.0
            } else {
                viewport.tray_width()
            };
            if tray_w + boxes_width(registry, viewport, candidate) <= viewport.viewport_width() {
                break;
            }

            let exclude: Vec<&str> = candidate.into_iter().collect();
            let oldest = match registry.oldest_maximized(&exclude) {
                Some(w) => w.id.clone(),
                None => break,
            };
            if minimize_window(&oldest, registry, tray, viewport, notifier) {
                trimmed.push(oldest);
            } else {
                break;
            }
        }

        trimmed
    }
}

/// Total width the overlay row would need: the candidate measured
/// directly (it may not be inserted yet) plus every other window per the
/// registry's width rules.
fn boxes_width(
    registry: &WindowRegistry,
    viewport: &dyn ViewPort,
    candidate: Option<&str>,
) -> f32 {
    let candidate_width = candidate
        .map(|id| viewport.rendered_width(id))
        .unwrap_or(0.0);
    candidate_width
        + registry
            .iter_ordered()
            .filter(|w| Some(w.id.as_str()) != candidate)
            .map(|w| registry.width_of(w, viewport))
            .sum::<f32>()
}

/// Minimize a window into the tray. The surface is hidden before the
/// state flips so no frame renders it mid-transition. Returns false for
/// unknown ids, the control window, and windows already minimized.
pub fn minimize_window(
    id: &str,
    registry: &mut WindowRegistry,
    tray: &mut MinimizedTray,
    viewport: &mut dyn ViewPort,
    notifier: &mut Notifier,
) -> bool {
    let title = match registry.get(id) {
        Some(w) if !w.is_control() && !w.minimized => w.title.clone(),
        _ => return false,
    };

    viewport.hide(id);
    if let Some(window) = registry.get_mut(id) {
        window.minimize();
        window.model.set_chat_state(ChatState::Inactive);
    }
    tray.add_entry(id, &title, notifier);
    tray.update_unread_total(registry);
    notifier.emit(ShellEvent::ChatWindowMinimized { id: id.to_string() });
    true
}

/// Bring a minimized window back into the shown row. Unreads clear unless
/// the reader had scrolled away from the newest message.
pub fn maximize_window(
    id: &str,
    registry: &mut WindowRegistry,
    tray: &mut MinimizedTray,
    viewport: &mut dyn ViewPort,
    notifier: &mut Notifier,
) -> bool {
    match registry.get_mut(id) {
        Some(window) if window.minimized => {
            window.maximize();
            if !window.model.is_scrolled_up() {
                window.model.clear_unread();
            }
            window.model.set_chat_state(ChatState::Active);
        }
        _ => return false,
    }

    viewport.show(id);
    tray.remove_entry(id);
    tray.update_unread_total(registry);
    notifier.emit(ShellEvent::ChatWindowMaximized { id: id.to_string() });
    true
}
