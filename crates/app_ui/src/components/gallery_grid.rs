//! Thumbnail grid shown behind the lightbox

use super::UiAction;
use crate::{TextureCache, Theme};
use app_core::{ClickTarget, ImageRef};
use egui::{Rect, Response, Ui, Vec2};

/// Probe progress, for the empty-grid message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    Scanning,
    Finished,
}

/// Wrapped grid of gallery thumbnails
pub struct GalleryGrid {
    pub thumbnail_size: f32,
}

impl GalleryGrid {
    pub fn new(thumbnail_size: f32) -> Self {
        Self {
            thumbnail_size: thumbnail_size.clamp(48.0, 512.0),
        }
    }

    /// Render the grid; thumbnails are requested as they are laid out
    pub fn ui(
        &self,
        ui: &mut Ui,
        images: &[ImageRef],
        textures: &mut TextureCache,
        status: ProbeStatus,
        theme: &Theme,
        actions: &mut Vec<UiAction>,
    ) {
        // Page background, under every thumbnail
        let page = ui.interact(
            ui.max_rect(),
            ui.id().with("gallery_page"),
            egui::Sense::click(),
        );
        if page.clicked() {
            actions.push(UiAction::Click(ClickTarget::Elsewhere));
        }

        if images.is_empty() {
            let message = match status {
                ProbeStatus::Scanning => "Scanning album…",
                ProbeStatus::Finished => "No images found",
            };
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new(message).color(theme.text_secondary));
            });
            return;
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::splat(8.0);

                    for (idx, image) in images.iter().enumerate() {
                        if textures.thumbnail(image.number).is_none() {
                            textures.request_thumbnail(image);
                        }

                        let response = self.render_thumbnail(ui, image, textures, theme);
                        if response.clicked() {
                            actions.push(UiAction::Click(ClickTarget::Thumbnail(idx)));
                        }
                    }
                });
            });
    }

    fn render_thumbnail(
        &self,
        ui: &mut Ui,
        image: &ImageRef,
        textures: &TextureCache,
        theme: &Theme,
    ) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::splat(self.thumbnail_size), egui::Sense::click());

        if !ui.is_rect_visible(rect) {
            return response;
        }

        let painter = ui.painter();
        match textures.thumbnail(image.number) {
            Some(texture) => {
                let image_rect = fit_rect(rect, texture.size_vec2());
                let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.rect_filled(rect, 4.0, theme.placeholder);
                painter.image(texture.id(), image_rect, uv, egui::Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 4.0, theme.placeholder);
                let icon = if textures.has_failed(image.number) { "⚠" } else { "🖼" };
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    icon,
                    egui::FontId::proportional(28.0),
                    theme.text_secondary,
                );
            }
        }

        if response.hovered() {
            painter.rect_stroke(rect, 4.0, egui::Stroke::new(2.0, theme.accent));
        }

        response.on_hover_text(image.name())
    }
}

/// Largest rect with the image's aspect ratio centered inside `bounds`
pub fn fit_rect(bounds: Rect, image_size: Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return Rect::from_center_size(bounds.center(), Vec2::ZERO);
    }
    let scale = (bounds.width() / image_size.x).min(bounds.height() / image_size.y);
    Rect::from_center_size(bounds.center(), image_size * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_keeps_aspect() {
        let bounds = Rect::from_min_size(egui::pos2(0.0, 0.0), Vec2::new(100.0, 100.0));
        let fitted = fit_rect(bounds, Vec2::new(400.0, 200.0));
        assert_eq!(fitted.size(), Vec2::new(100.0, 50.0));
        assert_eq!(fitted.center(), bounds.center());
    }

    #[test]
    fn test_fit_rect_upscales_small_images() {
        let bounds = Rect::from_min_size(egui::pos2(0.0, 0.0), Vec2::new(100.0, 100.0));
        let fitted = fit_rect(bounds, Vec2::new(10.0, 20.0));
        assert_eq!(fitted.size(), Vec2::new(50.0, 100.0));
    }

    #[test]
    fn test_fit_rect_empty_image() {
        let bounds = Rect::from_min_size(egui::pos2(0.0, 0.0), Vec2::new(100.0, 100.0));
        assert_eq!(fit_rect(bounds, Vec2::ZERO).size(), Vec2::ZERO);
    }

    #[test]
    fn test_thumbnail_size_is_clamped() {
        assert_eq!(GalleryGrid::new(8.0).thumbnail_size, 48.0);
        assert_eq!(GalleryGrid::new(160.0).thumbnail_size, 160.0);
    }
}
