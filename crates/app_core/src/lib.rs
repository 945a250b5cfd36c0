//! Album Viewer core domain logic
//!
//! This crate contains:
//! - Configuration
//! - The gallery and asset probing
//! - User preferences and their store
//! - The viewer controller state machine and its timers
//! - The pure frame view model
//! - Error types

pub mod config;
pub mod controller;
pub mod error;
pub mod gallery;
pub mod input;
pub mod preferences;
pub mod probe;
pub mod render;
pub mod state;
pub mod timer;

pub use config::{AlbumConfig, AppConfig, GeneralConfig, ViewerConfig};
pub use controller::{TickOutcome, ViewerController, DEFAULT_CURSOR_IDLE};
pub use error::AppError;
pub use gallery::{Gallery, ImageRef};
pub use input::{ClickTarget, KeyOutcome, PlayOrigin, ViewerKey};
pub use preferences::{JsonFileStore, MemoryStore, PreferenceStore, Preferences};
pub use probe::{spawn_probe, AssetSource, FsAssetSource, ProbeEvent, ProbeHandle};
pub use render::{render, Frame, OverlayFrame};
pub use state::ViewerState;
pub use timer::{OneShotTimer, RepeatingTimer};
