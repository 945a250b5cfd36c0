//! UI Components

pub mod gallery_grid;
pub mod lightbox;
pub mod settings_panel;

pub use gallery_grid::{GalleryGrid, ProbeStatus};
pub use lightbox::Lightbox;
pub use settings_panel::{SettingsBounds, SettingsPanel};

use app_core::ClickTarget;

/// Something the user did during a frame, applied after the egui pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    Click(ClickTarget),
    ToggleZoom,
    TogglePlay,
    ChangeDelay { ms: u64 },
    SetShowCounter(bool),
}
