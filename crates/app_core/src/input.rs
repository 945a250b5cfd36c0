//! Input vocabulary shared by the controller and the UI layer

/// Keys the lightbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    ArrowRight,
    ArrowLeft,
    Escape,
    Space,
    Other,
}

/// What the caller should do with a key after the controller saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not for the viewer, pass it on
    Ignored,
    Handled,
    /// Handled, and the default action (scrolling, button activation) must not run
    SuppressDefault,
}

impl KeyOutcome {
    pub fn is_consumed(self) -> bool {
        self != KeyOutcome::Ignored
    }
}

/// Where a pointer click landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Thumbnail(usize),
    /// The full-size image in the lightbox
    Image,
    /// Lightbox area outside the image
    OverlayBackground,
    SettingsPanel,
    SettingsToggle,
    Elsewhere,
}

/// Who asked for a play/stop toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    /// The play/stop button in the settings panel
    Control,
    Keyboard,
}
