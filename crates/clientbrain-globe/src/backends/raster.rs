//! Software rasterizer backing server-rendered stills.
//!
//! Anti-aliasing is a one-pixel coverage ramp on the shape's edge; blending
//! is straight-alpha source-over. Accurate enough for a thumbnail, not a
//! general-purpose canvas.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::params::GlobeParams;
use crate::renderer::GlobeRenderer;
use crate::sphere::{PointerOffset, RotationState, Viewport};
use crate::surface::{backing_pixels, BoxSize, Canvas, Context2d, Fill, Rgba, Vec2};
use crate::GlobeError;

/// Canvas that rasterizes into an in-memory RGBA image.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
    box_size: BoxSize,
    scale: f64,
}

impl RasterCanvas {
    /// A canvas with a `box_size` layout box; the backing buffer starts
    /// empty until the first resize.
    pub fn new(box_size: BoxSize) -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            box_size,
            scale: 1.0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel at device coordinates as `[r, g, b, a]`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Encode the backing buffer as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, GlobeError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| GlobeError::Encode(e.to_string()))?;
        Ok(buf.into_inner())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), GlobeError> {
        std::fs::write(path, self.to_png()?)?;
        Ok(())
    }

    /// Device-pixel bounds `[x0, x1) × [y0, y1)` of a CSS-space box.
    fn device_bounds(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        let clamp = |v: f64, hi: u32| -> u32 {
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, hi as f64) as u32
            }
        };
        let x0 = clamp((min.x * self.scale).floor(), w);
        let y0 = clamp((min.y * self.scale).floor(), h);
        let x1 = clamp((max.x * self.scale).ceil(), w);
        let y1 = clamp((max.y * self.scale).ceil(), h);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Composite `color` over the pixel at `(x, y)` with extra `coverage`.
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f64) {
        let src_a = color.a * coverage;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let dst_a = dst.0[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let channel = |src: u8, dst: u8| -> u8 {
            let c = (src as f64 * src_a + dst as f64 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        dst.0 = [
            channel(color.r, dst.0[0]),
            channel(color.g, dst.0[1]),
            channel(color.b, dst.0[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }

    /// Center of device pixel `(x, y)` in CSS coordinates.
    fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new((x as f64 + 0.5) / self.scale, (y as f64 + 0.5) / self.scale)
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * abx, a.y + t * aby);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn gradient_at(inner: Rgba, outer: Rgba, t: f64) -> Rgba {
    let mix = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
    Rgba {
        r: mix(inner.r, outer.r),
        g: mix(inner.g, outer.g),
        b: mix(inner.b, outer.b),
        a: lerp(inner.a, outer.a, t),
    }
}

impl Context2d for RasterCanvas {
    fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some((x0, y0, x1, y1)) =
            self.device_bounds(Vec2::new(x, y), Vec2::new(x + width, y + height))
        else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px, py, image::Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64) {
        // Hairlines still cover a full pixel so they stay visible.
        let half = (width / 2.0).max(0.5 / self.scale);
        let reach = half + 1.0 / self.scale;
        let min = Vec2::new(from.x.min(to.x) - reach, from.y.min(to.y) - reach);
        let max = Vec2::new(from.x.max(to.x) + reach, from.y.max(to.y) + reach);
        let Some((x0, y0, x1, y1)) = self.device_bounds(min, max) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let d = distance_to_segment(self.pixel_center(px, py), from, to);
                let coverage = ((half - d) * self.scale + 0.5).clamp(0.0, 1.0);
                self.blend(px, py, color, coverage);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, fill: Fill) {
        if !(radius > 0.0) {
            return;
        }
        let reach = radius + 1.0 / self.scale;
        let min = Vec2::new(center.x - reach, center.y - reach);
        let max = Vec2::new(center.x + reach, center.y + reach);
        let Some((x0, y0, x1, y1)) = self.device_bounds(min, max) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let p = self.pixel_center(px, py);
                let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
                let coverage = ((radius - d) * self.scale + 0.5).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let color = match fill {
                    Fill::Solid(c) => c,
                    Fill::Radial { inner, outer } => gradient_at(inner, outer, (d / radius).min(1.0)),
                };
                self.blend(px, py, color, coverage);
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn box_size(&self) -> BoxSize {
        self.box_size
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    fn context_2d(&mut self) -> Option<&mut dyn Context2d> {
        Some(self as &mut dyn Context2d)
    }
}

/// Render frame `frame` of the idle animation into a `size × size` image.
///
/// The rotation is `frame` idle steps from rest with a centered pointer,
/// so the same inputs always yield the same pixels.
pub fn render_still(params: &GlobeParams, size: u32, frame: u64) -> RasterCanvas {
    let edge = size as f64;
    let mut canvas = RasterCanvas::new(BoxSize::square(edge));
    canvas.set_backing_size(backing_pixels(edge, 1.0), backing_pixels(edge, 1.0));
    canvas.set_scale(1.0);

    let renderer = GlobeRenderer::new(params.frozen());
    let mut rotation = RotationState::default();
    rotation.advance(frame as f64 * params.idle_yaw_step);
    renderer.render_frame(&mut canvas, &mut rotation, PointerOffset::CENTER, Viewport::new(edge));
    canvas
}

// =============================================================================
// Tests
// =============================================================================
