//! Album Viewer UI layer
//!
//! Provides:
//! - egui components (gallery grid, lightbox, settings panel)
//! - Background texture decoding
//! - Input handling

pub mod components;
pub mod input;
pub mod textures;
pub mod theme;

pub use components::UiAction;
pub use input::InputHandler;
pub use textures::TextureCache;
pub use theme::Theme;
