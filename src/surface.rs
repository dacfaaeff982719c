use egui::{Color32, ColorImage};
use image::{DynamicImage, Rgba, RgbaImage, imageops::FilterType};

use crate::error::{CanvasError, CanvasResult};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Fixed-size RGBA pixel buffer backing the canvas.
///
/// The dimensions never change after creation. Every mutation bumps
/// `version` so renderers can tell when to re-upload.
#[derive(Clone)]
pub struct Surface {
    pixels: RgbaImage,
    version: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("version", &self.version)
            .finish()
    }
}

impl Surface {
    /// Allocates a surface filled with opaque white
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: RgbaImage::from_pixel(width, height, WHITE),
            version: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.width(), self.height()]
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Paints the whole surface opaque white
    pub fn fill_white(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = WHITE;
        }
        self.touch();
    }

    /// Overwrites the surface with `image` stretched to the surface size.
    /// Aspect ratio is not preserved.
    pub fn replace_scaled(&mut self, image: &DynamicImage) {
        let (width, height) = (self.width(), self.height());
        let mut rgba = image.to_rgba8();
        if rgba.dimensions() != (width, height) {
            rgba = image::imageops::resize(&rgba, width, height, FilterType::Triangle);
        }
        // Transparent source pixels composite over white, like a freshly cleared canvas export.
        for (dst, src) in self.pixels.pixels_mut().zip(rgba.pixels()) {
            *dst = WHITE;
            blend(dst, *src, 1.0);
        }
        self.touch();
    }

    /// Alpha-blends `color` onto the pixel at (x, y) with the given coverage.
    /// Out-of-bounds coordinates are clipped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color32, coverage: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let src = Rgba([color.r(), color.g(), color.b(), color.a()]);
        blend(self.pixels.get_pixel_mut(x, y), src, coverage);
    }

    /// Marks the surface as modified after a batch of `blend_pixel` calls
    pub fn touch(&mut self) {
        self.version += 1;
    }

    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let alpha = (src[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    for c in 0..3 {
        let mixed = src[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
        dst[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = 255;
}
