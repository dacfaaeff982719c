use eframe::egui::{self, Color32, Rect, TextureHandle, TextureOptions};

use crate::surface::Surface;
use crate::zoom::ZoomLevel;

/// Keeps an egui texture in sync with the session surface and paints it
/// at the current zoom.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Surface version the texture was last uploaded from
    uploaded_version: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_version", &self.uploaded_version)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-uploads the surface if it changed since the last call.
    /// Returns true when an upload happened.
    pub fn sync(&mut self, ctx: &egui::Context, surface: &Surface) -> bool {
        if self.texture.is_some() && self.uploaded_version == Some(surface.version()) {
            return false;
        }
        let image = surface.to_color_image();
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("canvas_surface", image, TextureOptions::NEAREST));
            }
        }
        self.uploaded_version = Some(surface.version());
        true
    }

    /// Size the surface occupies on screen at `zoom`
    pub fn display_size(surface: &Surface, zoom: ZoomLevel) -> egui::Vec2 {
        egui::vec2(surface.width() as f32, surface.height() as f32) * zoom.scale()
    }

    /// Paints the uploaded surface into `rect`
    pub fn render(&self, painter: &egui::Painter, rect: Rect) {
        painter.rect_filled(rect.expand(1.0), 0.0, Color32::from_gray(60));
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }
}
