//! Drawing surfaces for particles.
//!
//! Particles never talk to a window or GPU directly. They draw through the
//! [`Canvas`] trait, which has one software implementation here,
//! [`Framebuffer`]: a CPU-side RGBA8 image that the window layer uploads to
//! the GPU each frame and that can be saved as a PNG.
//!
//! Coordinates are in pixels with the origin at the top-left corner and y
//! growing downward, matching cursor positions.

use crate::color::Color;
use crate::error::CaptureError;
use glam::Vec2;
use std::path::Path;

/// Something particles can be drawn onto.
pub trait Canvas {
    /// Surface size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Cover the whole surface with an opaque color.
    fn fill(&mut self, color: Color);

    /// Blend a filled circle onto the surface.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Blend a filled axis-aligned rectangle onto the surface.
    ///
    /// `origin` is the top-left corner and `extent` the width and height.
    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Color, alpha: f32);
}

/// CPU-side RGBA8 drawing surface.
///
/// Pixels are stored row-major, top row first, fully opaque after the first
/// [`fill`](Canvas::fill). Blending is source-over with the particle alpha.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    /// Create a black framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 255]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Change the surface size. Contents are reset to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![[0, 0, 0, 255]; (width as usize) * (height as usize)];
    }

    /// The pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Raw RGBA bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Save the current frame as a PNG image, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), CaptureError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let image = image::RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .ok_or(CaptureError::SizeMismatch {
                width: self.width,
                height: self.height,
            })?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn blend(&mut self, x: u32, y: u32, src: [u8; 3], alpha: f32) {
        let i = self.index(x, y);
        let dst = &mut self.pixels[i];
        for c in 0..3 {
            let mixed = f32::from(src[c]) * alpha + f32::from(dst[c]) * (1.0 - alpha);
            dst[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        let out_alpha = alpha + f32::from(dst[3]) / 255.0 * (1.0 - alpha);
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Pixel range covering `[lo, hi)` along an axis of length `len`,
    /// sampled at pixel centers.
    fn span(lo: f32, hi: f32, len: u32) -> std::ops::Range<u32> {
        let start = (lo - 0.5).ceil().max(0.0);
        let end = (hi - 0.5).ceil().min(len as f32);
        if !(start < end) {
            return 0..0;
        }
        start as u32..end as u32
    }
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba(1.0);
        self.pixels.fill(rgba);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || !(radius > 0.0) || !center.is_finite() {
            return;
        }

        let src = [color.r, color.g, color.b];
        let r2 = radius * radius;
        for y in Self::span(center.y - radius, center.y + radius, self.height) {
            let dy = y as f32 + 0.5 - center.y;
            for x in Self::span(center.x - radius, center.x + radius, self.width) {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, src, alpha);
                }
            }
        }
    }

    fn fill_rect(&mut self, origin: Vec2, extent: Vec2, color: Color, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || !origin.is_finite() || !extent.is_finite() {
            return;
        }

        // Negative extents grow the rectangle up/left, as a 2D canvas does.
        let min = origin.min(origin + extent);
        let max = origin.max(origin + extent);
        let src = [color.r, color.g, color.b];
        for y in Self::span(min.y, max.y, self.height) {
            for x in Self::span(min.x, max.x, self.width) {
                self.blend(x, y, src, alpha);
            }
        }
    }
}
