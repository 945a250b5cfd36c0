//! Viewer controller: the lightbox state machine
//!
//! Owns the gallery, the viewer flags, the preferences and both timers.
//! Every transition runs to completion on the UI thread; anything that
//! depends on time takes `now` from the caller.

use crate::gallery::{Gallery, ImageRef};
use crate::input::{ClickTarget, KeyOutcome, PlayOrigin, ViewerKey};
use crate::preferences::{PreferenceStore, Preferences};
use crate::render::{render, Frame};
use crate::state::ViewerState;
use crate::timer::{OneShotTimer, RepeatingTimer};
use std::time::{Duration, Instant};

pub const DEFAULT_CURSOR_IDLE: Duration = Duration::from_millis(3000);

/// What happened during a [`ViewerController::tick`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub advanced: bool,
    pub cursor_hidden: bool,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.advanced || self.cursor_hidden
    }
}

pub struct ViewerController {
    gallery: Gallery,
    state: ViewerState,
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    autoplay: RepeatingTimer,
    cursor_idle: OneShotTimer,
    cursor_idle_after: Duration,
}

impl ViewerController {
    /// Create a controller, reading preferences once from the store
    pub fn new(store: Box<dyn PreferenceStore>, cursor_idle_after: Duration) -> Self {
        let prefs = Preferences::load_or_default(store.as_ref());
        tracing::info!(
            "Viewer preferences: delay {} ms, counter {}",
            prefs.autoplay_delay_ms,
            prefs.show_counter
        );

        Self {
            gallery: Gallery::new(),
            state: ViewerState::new(),
            prefs,
            store,
            autoplay: RepeatingTimer::new(),
            cursor_idle: OneShotTimer::new(),
            cursor_idle_after,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn frame(&self) -> Frame {
        render(&self.state, &self.gallery, &self.prefs)
    }

    // ===== Gallery building =====

    /// A probe confirmed an image; appended without moving the current one
    pub fn asset_resolved(&mut self, image: ImageRef) -> Option<usize> {
        self.gallery.push(image)
    }

    pub fn probe_finished(&mut self) {
        tracing::info!("Gallery complete with {} images", self.gallery.len());
        self.gallery.freeze();
    }

    // ===== Open / close =====

    /// Open the lightbox at `index`; false when not allowed
    pub fn activate(&mut self, index: usize, now: Instant) -> bool {
        if self.state.is_open || index >= self.gallery.len() {
            return false;
        }

        self.state.is_open = true;
        self.state.current_index = index;
        self.state.zoomed = false;
        self.state.cursor_visible = true;
        self.cursor_idle.arm(now, self.cursor_idle_after);

        if !self.state.first_open_consumed {
            self.state.first_open_consumed = true;
            self.state.settings_visible = true;
        }

        tracing::debug!("Viewer opened at index {}", index);
        true
    }

    pub fn close(&mut self) {
        if !self.state.is_open {
            return;
        }

        // Stopping here must not go through toggle_play's settings handling
        self.stop_autoplay();
        self.cursor_idle.cancel();
        self.state.reset_closed();

        tracing::debug!("Viewer closed");
    }

    // ===== Navigation =====

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let n = self.gallery.len();
        if !self.state.is_open || n == 0 {
            return;
        }

        let n = n as isize;
        let current = self.state.current_index as isize;
        self.state.current_index = ((current + delta + n) % n) as usize;
    }

    // ===== Autoplay =====

    pub fn toggle_play(&mut self, origin: PlayOrigin, now: Instant) {
        if !self.state.is_open {
            return;
        }

        if self.state.is_playing {
            self.stop_autoplay();
            tracing::debug!("Slideshow stopped");
        } else {
            self.start_autoplay(now);
            tracing::debug!("Slideshow started, {} ms", self.prefs.autoplay_delay_ms);
        }

        if origin == PlayOrigin::Control {
            self.state.settings_visible = false;
        }
    }

    fn start_autoplay(&mut self, now: Instant) {
        if self.gallery.is_empty() {
            return;
        }
        self.autoplay.start(now, self.prefs.autoplay_delay());
        self.state.is_playing = true;
    }

    fn stop_autoplay(&mut self) {
        self.autoplay.cancel();
        self.state.is_playing = false;
    }

    // ===== Preferences =====

    pub fn change_delay(&mut self, delay_ms: u64, now: Instant) {
        if delay_ms == 0 {
            tracing::warn!("Ignoring zero autoplay delay");
            return;
        }
        if delay_ms == self.prefs.autoplay_delay_ms {
            return;
        }

        self.prefs.autoplay_delay_ms = delay_ms;
        self.store.set(&self.prefs);

        if self.state.is_playing {
            self.autoplay.start(now, self.prefs.autoplay_delay());
        }
    }

    pub fn set_show_counter(&mut self, show: bool) {
        self.prefs.show_counter = show;
        self.store.set(&self.prefs);
    }

    pub fn toggle_counter(&mut self) {
        self.set_show_counter(!self.prefs.show_counter);
    }

    // ===== Settings panel / pointer =====

    pub fn toggle_settings(&mut self) {
        if self.state.is_open {
            self.state.settings_visible = !self.state.settings_visible;
        }
    }

    pub fn click(&mut self, target: ClickTarget, now: Instant) {
        match target {
            ClickTarget::Thumbnail(index) => {
                self.activate(index, now);
            }
            ClickTarget::Image | ClickTarget::Elsewhere => {
                self.state.settings_visible = false;
            }
            ClickTarget::OverlayBackground => self.close(),
            ClickTarget::SettingsToggle => self.toggle_settings(),
            ClickTarget::SettingsPanel => {}
        }
    }

    pub fn toggle_zoom(&mut self) {
        if self.state.is_open {
            self.state.zoomed = !self.state.zoomed;
        }
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        if !self.state.is_open {
            return;
        }
        self.state.cursor_visible = true;
        self.cursor_idle.arm(now, self.cursor_idle_after);
    }

    pub fn key(&mut self, key: ViewerKey, now: Instant) -> KeyOutcome {
        if !self.state.is_open {
            return KeyOutcome::Ignored;
        }

        match key {
            ViewerKey::ArrowRight => self.next(),
            ViewerKey::ArrowLeft => self.previous(),
            ViewerKey::Escape => self.close(),
            ViewerKey::Space => {
                self.toggle_play(PlayOrigin::Keyboard, now);
                return KeyOutcome::SuppressDefault;
            }
            ViewerKey::Other => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    // ===== Timers =====

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.state.is_open {
            return outcome;
        }

        if self.autoplay.poll(now) {
            self.next();
            outcome.advanced = true;
        }

        if self.cursor_idle.poll(now) {
            self.state.cursor_visible = false;
            outcome.cursor_hidden = true;
        }

        outcome
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.autoplay.deadline(), self.cursor_idle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
