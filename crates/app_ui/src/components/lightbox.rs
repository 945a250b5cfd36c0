//! Full-window lightbox overlay

use super::gallery_grid::fit_rect;
use super::UiAction;
use crate::Theme;
use app_core::{ClickTarget, OverlayFrame};
use egui::{Align2, FontId, Id, Order, Pos2, Rect, Sense, Vec2};

const ZOOM_FACTOR: f32 = 2.0;
const MARGIN: f32 = 24.0;

/// Lightbox drawn over the whole window while the viewer is open
pub struct Lightbox;

impl Lightbox {
    pub fn ui(
        ctx: &egui::Context,
        overlay: &OverlayFrame,
        texture: Option<&egui::TextureHandle>,
        failed: bool,
        theme: &Theme,
        actions: &mut Vec<UiAction>,
    ) {
        let screen = ctx.screen_rect();

        egui::Area::new(Id::new("lightbox"))
            .order(Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, theme.backdrop);

                let image_response = match texture {
                    Some(texture) => {
                        let image_rect = Self::image_rect(screen, texture.size_vec2(), overlay.zoomed);
                        let response =
                            ui.interact(image_rect, Id::new("lightbox_image"), Sense::click());
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        ui.painter()
                            .with_clip_rect(screen)
                            .image(texture.id(), image_rect, uv, egui::Color32::WHITE);
                        Some(response)
                    }
                    None => {
                        ui.painter().text(
                            screen.center(),
                            Align2::CENTER_CENTER,
                            Self::placeholder_text(failed),
                            FontId::proportional(20.0),
                            theme.text_secondary,
                        );
                        None
                    }
                };

                if let Some(counter) = &overlay.counter {
                    Self::counter_badge(ui, screen, counter, theme);
                }

                let toggle_rect = Rect::from_min_size(
                    Pos2::new(screen.max.x - MARGIN - 36.0, screen.min.y + MARGIN),
                    Vec2::splat(36.0),
                );
                let toggle = ui.put(
                    toggle_rect,
                    egui::Button::new(egui::RichText::new("⚙").size(20.0)),
                );

                // egui hands a click to the topmost widget only
                let image_clicked = image_response.as_ref().map_or(false, |r| r.clicked());
                let image_double = image_response.as_ref().map_or(false, |r| r.double_clicked());

                if toggle.clicked() {
                    actions.push(UiAction::Click(ClickTarget::SettingsToggle));
                } else if image_double {
                    actions.push(UiAction::ToggleZoom);
                } else if image_clicked {
                    actions.push(UiAction::Click(ClickTarget::Image));
                } else if backdrop.clicked() {
                    actions.push(UiAction::Click(ClickTarget::OverlayBackground));
                }

                if !overlay.cursor_visible {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::None);
                }
            });
    }

    fn placeholder_text(failed: bool) -> &'static str {
        if failed {
            "⚠ Cannot load image"
        } else {
            "Loading…"
        }
    }

    /// Fitted inside the window margins, doubled when zoomed
    fn image_rect(screen: Rect, image_size: Vec2, zoomed: bool) -> Rect {
        let bounds = screen.shrink(MARGIN);
        let fitted = fit_rect(bounds, image_size);
        if zoomed {
            Rect::from_center_size(fitted.center(), fitted.size() * ZOOM_FACTOR)
        } else {
            fitted
        }
    }

    fn counter_badge(ui: &egui::Ui, screen: Rect, counter: &str, theme: &Theme) {
        let painter = ui.painter();
        let galley = painter.layout_no_wrap(counter.to_string(), FontId::proportional(16.0), theme.text);
        let badge = Rect::from_center_size(
            Pos2::new(screen.center().x, screen.min.y + MARGIN + 14.0),
            galley.size() + Vec2::new(20.0, 10.0),
        );
        painter.rect_filled(badge, 12.0, theme.badge);
        painter.galley(badge.center() - galley.size() / 2.0, galley, theme.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_reports_failed_decode() {
        assert_eq!(Lightbox::placeholder_text(false), "Loading…");
        assert_eq!(Lightbox::placeholder_text(true), "⚠ Cannot load image");
    }

    #[test]
    fn test_failed_image_draws_without_actions() {
        let overlay = OverlayFrame {
            image: app_core::ImageRef::new(7, "album/007.jpg"),
            index: 0,
            counter: Some("1 / 1".to_string()),
            settings_visible: false,
            cursor_visible: true,
            zoomed: false,
            playing: false,
        };
        let ctx = egui::Context::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            Lightbox::ui(ctx, &overlay, None, true, &Theme::default(), &mut actions);
        });
        assert!(actions.is_empty());
    }

    #[test]
    fn test_image_rect_zoom_doubles_size() {
        let screen = Rect::from_min_size(Pos2::ZERO, Vec2::new(848.0, 648.0));
        let normal = Lightbox::image_rect(screen, Vec2::new(400.0, 300.0), false);
        let zoomed = Lightbox::image_rect(screen, Vec2::new(400.0, 300.0), true);

        assert_eq!(normal.size(), Vec2::new(800.0, 600.0));
        assert_eq!(zoomed.size(), Vec2::new(1600.0, 1200.0));
        assert_eq!(zoomed.center(), normal.center());
    }
}
