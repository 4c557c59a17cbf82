//! The drawing surface the renderer targets.
//!
//! [`Canvas`] is the mountable element (box size, backing buffer) and
//! [`Context2d`] the immediate-mode 2-D context it may or may not provide.
//! Only the handful of primitives the globe needs are modelled.

use clientbrain_common::Color;

/// A point in CSS pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A color with fractional opacity, as a 2-D context consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Rgba {
    /// `color` at `alpha` opacity; the color's own alpha is ignored.
    pub fn new(color: Color, alpha: f64) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
            a: if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) },
        }
    }

    pub fn transparent(color: Color) -> Self {
        Self::new(color, 0.0)
    }

    /// CSS `rgba()` notation.
    pub fn to_css(&self) -> String {
        Color::from_rgb(self.r, self.g, self.b).to_css_rgba(self.a)
    }
}

/// How a circle is filled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Radial gradient from `inner` at the center to `outer` at the rim.
    Radial { inner: Rgba, outer: Rgba },
}

/// The surface element's layout box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

impl BoxSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(size: f64) -> Self {
        Self::new(size, size)
    }
}

/// Immediate-mode 2-D drawing context.
///
/// Coordinates are CSS pixels; the context maps them onto its backing
/// buffer through the scale set by [`Context2d::set_scale`].
pub trait Context2d {
    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f64);

    /// Reset a rectangle to fully transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Stroke a single straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f64);

    /// Fill a full circle.
    fn fill_circle(&mut self, center: Vec2, radius: f64, fill: Fill);
}

/// A mountable drawing surface.
pub trait Canvas {
    /// Current layout box.
    fn box_size(&self) -> BoxSize;

    /// Resize the backing buffer in device pixels.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// The 2-D context, or `None` when the surface cannot provide one.
    fn context_2d(&mut self) -> Option<&mut dyn Context2d>;
}

/// Backing buffer edge in device pixels for a CSS size and pixel ratio.
pub fn backing_pixels(size: f64, device_pixel_ratio: f64) -> u32 {
    let px = (size * device_pixel_ratio).round();
    if px.is_finite() && px > 0.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

// =============================================================================
// Tests
// =============================================================================
