//! Keyboard mapping for the lightbox

use app_core::ViewerKey;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, NamedKey};

/// Maps window key events to viewer keys
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Pressed (and auto-repeated) keys only
    pub fn handle_key(&self, event: &KeyEvent) -> Option<ViewerKey> {
        if event.state != ElementState::Pressed {
            return None;
        }

        let key = Self::map_key(&event.logical_key);
        tracing::trace!("Key pressed: {:?} -> {:?}", event.logical_key, key);
        Some(key)
    }

    /// Translate a logical key
    pub fn map_key(key: &Key) -> ViewerKey {
        match key {
            Key::Named(NamedKey::ArrowRight) => ViewerKey::ArrowRight,
            Key::Named(NamedKey::ArrowLeft) => ViewerKey::ArrowLeft,
            Key::Named(NamedKey::Escape) => ViewerKey::Escape,
            Key::Named(NamedKey::Space) => ViewerKey::Space,
            Key::Character(c) if c.as_str() == " " => ViewerKey::Space,
            _ => ViewerKey::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_named_keys() {
        assert_eq!(InputHandler::map_key(&Key::Named(NamedKey::ArrowRight)), ViewerKey::ArrowRight);
        assert_eq!(InputHandler::map_key(&Key::Named(NamedKey::ArrowLeft)), ViewerKey::ArrowLeft);
        assert_eq!(InputHandler::map_key(&Key::Named(NamedKey::Escape)), ViewerKey::Escape);
        assert_eq!(InputHandler::map_key(&Key::Named(NamedKey::Space)), ViewerKey::Space);
        assert_eq!(InputHandler::map_key(&Key::Named(NamedKey::ArrowUp)), ViewerKey::Other);
    }

    #[test]
    fn test_map_characters() {
        assert_eq!(InputHandler::map_key(&Key::Character(" ".into())), ViewerKey::Space);
        assert_eq!(InputHandler::map_key(&Key::Character("q".into())), ViewerKey::Other);
    }
}
