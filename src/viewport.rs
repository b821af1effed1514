//! Measurement and visibility seam between window logic and the UI.
//!
//! Trimming decisions depend on pixel widths and visibility that only the
//! render layer knows. The overlay row implements this trait from measured
//! egui rects; tests substitute a fake with scripted widths.

/// What the trimmer needs to know about rendered geometry.
pub trait ViewPort {
    /// Usable width of the screen area windows dock into, in points.
    fn viewport_width(&self) -> f32;

    /// Outer width of a window as last rendered, or an estimate for a
    /// window that has not been laid out yet.
    fn rendered_width(&self, id: &str) -> f32;

    /// Whether the window's surface is currently displayed.
    fn is_visible(&self, id: &str) -> bool;

    /// Remove the window's surface from display. Called before the state
    /// flips so no frame renders a minimized window.
    fn hide(&mut self, id: &str);

    /// Return the window's surface to display.
    fn show(&mut self, id: &str);

    /// Width of the collapsed control-window toggle.
    fn control_toggle_width(&self) -> f32;

    /// Width of the minimized tray strip.
    fn tray_width(&self) -> f32;
}
