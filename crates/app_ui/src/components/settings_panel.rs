//! Settings card: slideshow delay, counter visibility, play/stop

use super::UiAction;
use crate::Theme;
use app_core::{ClickTarget, Frame, ViewerConfig};
use egui::{Align2, Id, Order, Slider, Vec2};

/// Slider range in whole seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsBounds {
    pub min_secs: u32,
    pub max_secs: u32,
}

impl SettingsBounds {
    pub fn from_config(viewer: &ViewerConfig) -> Self {
        let min_secs = viewer.min_delay_secs.max(1);
        Self {
            min_secs,
            max_secs: viewer.max_delay_secs.max(min_secs),
        }
    }
}

pub struct SettingsPanel {
    bounds: SettingsBounds,
}

impl SettingsPanel {
    pub fn new(bounds: SettingsBounds) -> Self {
        Self { bounds }
    }

    /// Render the panel; callers only do so while the panel is visible
    pub fn ui(&self, ctx: &egui::Context, frame: &Frame, theme: &Theme, actions: &mut Vec<UiAction>) {
        // Above the lightbox, which lives on the Foreground layer
        let response = egui::Area::new(Id::new("settings_panel"))
            .order(Order::Tooltip)
            .anchor(Align2::RIGHT_TOP, Vec2::new(-24.0, 72.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(theme.surface)
                    .show(ui, |ui| {
                        ui.set_min_width(220.0);
                        ui.label(egui::RichText::new("Settings").strong());
                        ui.add_space(6.0);

                        egui::Grid::new("settings_grid")
                            .num_columns(2)
                            .spacing([12.0, 8.0])
                            .show(ui, |ui| {
                                ui.label("Delay:");
                                ui.horizontal(|ui| {
                                    let mut secs = frame.delay_secs;
                                    let slider = Slider::new(
                                        &mut secs,
                                        self.bounds.min_secs as f32..=self.bounds.max_secs as f32,
                                    )
                                    .step_by(1.0)
                                    .show_value(false);

                                    // The slider snaps stored values to its step on
                                    // first draw; only user edits count
                                    let response = ui.add(slider);
                                    if response.changed() && edited_by_user(&response) {
                                        actions.push(UiAction::ChangeDelay {
                                            ms: delay_ms_from_secs(secs),
                                        });
                                    }
                                    ui.label(&frame.delay_label);
                                });
                                ui.end_row();

                                ui.label("Counter:");
                                let mut show = frame.show_counter_checked;
                                if ui.checkbox(&mut show, "Show counter").changed() {
                                    actions.push(UiAction::SetShowCounter(show));
                                }
                                ui.end_row();
                            });

                        ui.add_space(6.0);
                        if ui.button(frame.play_label).clicked() {
                            actions.push(UiAction::TogglePlay);
                        }
                    });
            })
            .response;

        if response.clicked() {
            actions.push(UiAction::Click(ClickTarget::SettingsPanel));
        }
    }
}

fn edited_by_user(response: &egui::Response) -> bool {
    response.dragged() || response.drag_stopped() || response.has_focus()
}

/// Slider value to a whole-second delay, never zero
fn delay_ms_from_secs(secs: f32) -> u64 {
    (secs.round().max(1.0) as u64) * 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{render, Gallery, Preferences, ViewerState};

    #[test]
    fn test_delay_from_slider() {
        assert_eq!(delay_ms_from_secs(2.0), 2000);
        assert_eq!(delay_ms_from_secs(2.4), 2000);
        assert_eq!(delay_ms_from_secs(0.0), 1000);
    }

    fn actions_after_frames(prefs: Preferences, frames: usize) -> Vec<UiAction> {
        let panel = SettingsPanel::new(SettingsBounds::from_config(&ViewerConfig::default()));
        let frame = render(&ViewerState::new(), &Gallery::new(), &prefs);
        let theme = Theme::default();
        let ctx = egui::Context::default();

        let mut actions = Vec::new();
        for _ in 0..frames {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                panel.ui(ctx, &frame, &theme, &mut actions);
            });
        }
        actions
    }

    #[test]
    fn test_showing_panel_keeps_fractional_delay() {
        let prefs = Preferences {
            autoplay_delay_ms: 2500,
            ..Default::default()
        };
        assert_eq!(prefs.delay_label(), "2.5s");
        assert!(actions_after_frames(prefs, 2).is_empty());
    }

    #[test]
    fn test_showing_panel_keeps_out_of_range_delay() {
        let prefs = Preferences {
            autoplay_delay_ms: 45_000,
            ..Default::default()
        };
        assert!(actions_after_frames(prefs, 2).is_empty());
    }

    #[test]
    fn test_bounds_from_config() {
        let viewer = ViewerConfig {
            min_delay_secs: 0,
            max_delay_secs: 0,
            ..Default::default()
        };
        let bounds = SettingsBounds::from_config(&viewer);
        assert_eq!(bounds, SettingsBounds { min_secs: 1, max_secs: 1 });

        let bounds = SettingsBounds::from_config(&ViewerConfig::default());
        assert_eq!(bounds, SettingsBounds { min_secs: 1, max_secs: 30 });
    }
}
