//! Application theming

use egui::{Color32, Visuals};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    /// Lightbox backdrop, drawn over the gallery
    pub backdrop: Color32,
    pub placeholder: Color32,
    pub badge: Color32,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(24, 24, 24),
            surface: Color32::from_rgb(40, 40, 40),
            text: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(160, 160, 160),
            accent: Color32::from_rgb(100, 149, 237), // Cornflower blue
            backdrop: Color32::from_rgba_unmultiplied(0, 0, 0, 235),
            placeholder: Color32::from_gray(48),
            badge: Color32::from_rgba_unmultiplied(0, 0, 0, 160),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(245, 245, 245),
            surface: Color32::from_rgb(255, 255, 255),
            text: Color32::from_rgb(32, 32, 32),
            text_secondary: Color32::from_rgb(100, 100, 100),
            accent: Color32::from_rgb(59, 130, 246), // Blue
            // The lightbox stays dark in both themes
            backdrop: Color32::from_rgba_unmultiplied(10, 10, 10, 235),
            placeholder: Color32::from_gray(210),
            badge: Color32::from_rgba_unmultiplied(0, 0, 0, 160),
        }
    }

    /// Apply theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = if self.name == "dark" {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.background;

        visuals.widgets.noninteractive.fg_stroke.color = self.text;
        visuals.widgets.inactive.fg_stroke.color = self.text;
        visuals.widgets.hovered.bg_fill = self.accent.linear_multiply(0.3);
        visuals.widgets.active.bg_fill = self.accent.linear_multiply(0.5);

        visuals.selection.bg_fill = self.accent.linear_multiply(0.5);
        visuals.selection.stroke.color = self.accent;

        style.visuals = visuals;
        ctx.set_style(style);
    }

    /// Get theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("Light").name, "light");
        assert_eq!(Theme::by_name("solarized").name, "dark");
    }
}
