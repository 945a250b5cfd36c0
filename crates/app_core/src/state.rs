//! Viewer state flags

/// Lightbox state, mutated only by the controller
///
/// Invariants: `is_playing`, `settings_visible` and a hidden cursor all imply
/// `is_open`; `current_index` is in bounds while open on a non-empty gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    pub is_open: bool,
    pub current_index: usize,
    pub is_playing: bool,
    pub settings_visible: bool,
    /// Set by the first ever open; never cleared
    pub first_open_consumed: bool,
    pub cursor_visible: bool,
    /// Cosmetic double-click zoom
    pub zoomed: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            is_open: false,
            current_index: 0,
            is_playing: false,
            settings_visible: false,
            first_open_consumed: false,
            cursor_visible: true,
            zoomed: false,
        }
    }

    /// Back to Closed, keeping only the first-open marker
    pub fn reset_closed(&mut self) {
        *self = Self {
            first_open_consumed: self.first_open_consumed,
            current_index: self.current_index,
            ..Self::new()
        };
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}
