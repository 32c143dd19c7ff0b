use crate::foundation::error::{ShorelineError, ShorelineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Drawing surface dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a validated, non-empty size.
    pub fn new(width: u32, height: u32) -> ShorelineResult<Self> {
        if width == 0 || height == 0 {
            return Err(ShorelineError::validation(format!(
                "surface size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Length of the surface diagonal in pixels.
    pub fn hypot(self) -> f64 {
        f64::from(self.width).hypot(f64::from(self.height))
    }

    /// Extent of the unscaled scene coordinate space for a given wave scale.
    ///
    /// Non-positive scales are treated as `1`.
    pub fn diagonal(self, wave_scale: f64) -> f64 {
        let scale = if wave_scale > 0.0 { wave_scale } else { 1.0 };
        self.hypot() / scale
    }
}

/// Straight-alpha RGBA8 colour, the form drawing surfaces consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    /// Opaque colour from channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from channels plus a `0..=1` alpha.
    pub fn with_alpha(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
