//! Pure view model for the display surface

use crate::gallery::{Gallery, ImageRef};
use crate::preferences::Preferences;
use crate::state::ViewerState;

pub const PLAY_LABEL: &str = "▶ Slideshow";
pub const STOP_LABEL: &str = "⏸ Stop slideshow";

/// Everything the UI needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// `None` while the lightbox is closed
    pub overlay: Option<OverlayFrame>,
    pub thumbnails: usize,
    pub delay_label: String,
    pub delay_secs: f32,
    pub show_counter_checked: bool,
    pub play_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub image: ImageRef,
    pub index: usize,
    /// `"3 / 12"`, absent when the counter preference is off
    pub counter: Option<String>,
    pub settings_visible: bool,
    pub cursor_visible: bool,
    pub zoomed: bool,
    pub playing: bool,
}

/// Build the frame for the current state
pub fn render(state: &ViewerState, gallery: &Gallery, prefs: &Preferences) -> Frame {
    let overlay = if state.is_open {
        gallery.get(state.current_index).map(|image| OverlayFrame {
            image: image.clone(),
            index: state.current_index,
            counter: prefs
                .show_counter
                .then(|| format!("{} / {}", state.current_index + 1, gallery.len())),
            settings_visible: state.settings_visible,
            cursor_visible: state.cursor_visible,
            zoomed: state.zoomed,
            playing: state.is_playing,
        })
    } else {
        None
    };

    Frame {
        overlay,
        thumbnails: gallery.len(),
        delay_label: prefs.delay_label(),
        delay_secs: prefs.autoplay_delay_ms as f32 / 1000.0,
        show_counter_checked: prefs.show_counter,
        play_label: if state.is_playing { STOP_LABEL } else { PLAY_LABEL },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: u32) -> Gallery {
        let mut gallery = Gallery::new();
        for number in 1..=n {
            gallery.push(ImageRef::new(number, format!("{:03}.jpg", number)));
        }
        gallery
    }

    #[test]
    fn test_closed_has_no_overlay() {
        let frame = render(&ViewerState::new(), &gallery(3), &Preferences::default());
        assert!(frame.overlay.is_none());
        assert_eq!(frame.thumbnails, 3);
        assert_eq!(frame.play_label, PLAY_LABEL);
    }

    #[test]
    fn test_open_shows_counter() {
        let state = ViewerState {
            is_open: true,
            current_index: 1,
            ..ViewerState::new()
        };
        let frame = render(&state, &gallery(3), &Preferences::default());
        let overlay = frame.overlay.unwrap();
        assert_eq!(overlay.image.number, 2);
        assert_eq!(overlay.counter.as_deref(), Some("2 / 3"));
    }

    #[test]
    fn test_counter_hidden_by_preference() {
        let state = ViewerState {
            is_open: true,
            ..ViewerState::new()
        };
        let prefs = Preferences {
            autoplay_delay_ms: 2000,
            show_counter: false,
        };
        let frame = render(&state, &gallery(3), &prefs);
        assert_eq!(frame.overlay.unwrap().counter, None);
        assert_eq!(frame.delay_label, "2s");
        assert_eq!(frame.delay_secs, 2.0);
        assert!(!frame.show_counter_checked);
    }

    #[test]
    fn test_open_on_empty_gallery_has_no_overlay() {
        let state = ViewerState {
            is_open: true,
            ..ViewerState::new()
        };
        assert!(render(&state, &Gallery::new(), &Preferences::default())
            .overlay
            .is_none());
    }
}
