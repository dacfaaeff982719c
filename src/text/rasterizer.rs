use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use egui::{Color32, Pos2};

use crate::error::{CanvasError, CanvasResult};
use crate::surface::Surface;

/// Proportional face bundled with egui's default fonts
const BUNDLED_FACE: &str = "Ubuntu-Light";

/// Draws committed text onto the surface with a fixed face, size and color
#[derive(Clone)]
pub struct TextRasterizer {
    font: FontArc,
    size: f32,
    color: Color32,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("size", &self.size)
            .field("color", &self.color)
            .finish()
    }
}

impl TextRasterizer {
    pub const DEFAULT_SIZE: f32 = 16.0;

    /// Loads the proportional font that ships with egui
    pub fn bundled(size: f32) -> CanvasResult<Self> {
        let definitions = egui::FontDefinitions::default();
        let data = definitions
            .font_data
            .get(BUNDLED_FACE)
            .or_else(|| definitions.font_data.values().next())
            .ok_or_else(|| CanvasError::Font("no bundled font available".to_owned()))?;
        Self::from_bytes(data.font.to_vec(), size)
    }

    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> CanvasResult<Self> {
        if size.is_nan() || size <= 0.0 {
            return Err(CanvasError::InvalidFontSize(size));
        }
        let font =
            FontArc::try_from_vec(bytes).map_err(|err| CanvasError::Font(err.to_string()))?;
        Ok(Self {
            font,
            size,
            color: Color32::BLACK,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Draws `text` with the left end of its baseline at `origin`.
    /// Returns true if any glyph produced coverage.
    pub fn draw(&self, surface: &mut Surface, text: &str, origin: Pos2) -> bool {
        let scale = PxScale::from(self.size);
        let scaled = self.font.as_scaled(scale);

        let mut caret = origin.x;
        let mut previous = None;
        let mut painted = false;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, origin.y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                if coverage <= 0.0 {
                    return;
                }
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                surface.blend_pixel(x, y, self.color, coverage);
                painted = true;
            });
        }

        if painted {
            surface.touch();
        }
        painted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn dark_pixels_in(surface: &Surface, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
        let mut count = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                if surface.pixel(x, y).is_some_and(|p| p[0] < 200) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_bundled_font_loads() {
        let rasterizer = TextRasterizer::bundled(TextRasterizer::DEFAULT_SIZE).unwrap();
        assert_eq!(rasterizer.size(), 16.0);
        assert_eq!(rasterizer.color(), Color32::BLACK);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            TextRasterizer::bundled(0.0),
            Err(CanvasError::InvalidFontSize(size)) if size == 0.0
        ));
    }

    #[test]
    fn test_draw_marks_pixels_above_baseline() {
        let rasterizer = TextRasterizer::bundled(16.0).unwrap();
        let mut surface = Surface::new(120, 100).unwrap();

        assert!(rasterizer.draw(&mut surface, "Hi", pos2(50.0, 60.0)));
        assert!(dark_pixels_in(&surface, 48, 40, 80, 62) > 0);
        assert_eq!(dark_pixels_in(&surface, 0, 0, 40, 100), 0);
        assert_eq!(surface.version(), 1);
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let rasterizer = TextRasterizer::bundled(16.0).unwrap();
        let mut surface = Surface::new(32, 32).unwrap();
        assert!(!rasterizer.draw(&mut surface, "", pos2(4.0, 20.0)));
        assert_eq!(surface.version(), 0);
    }

    #[test]
    fn test_text_off_surface_is_clipped() {
        let rasterizer = TextRasterizer::bundled(16.0).unwrap();
        let mut surface = Surface::new(32, 32).unwrap();
        rasterizer.draw(&mut surface, "Hello", pos2(-500.0, -500.0));
        assert_eq!(dark_pixels_in(&surface, 0, 0, 32, 32), 0);
    }

    #[test]
    fn test_invalid_font_bytes() {
        assert!(matches!(
            TextRasterizer::from_bytes(vec![1, 2, 3], 16.0),
            Err(CanvasError::Font(_))
        ));
    }
}
