use serde::{Deserialize, Serialize};

use crate::color::parse::Color;
use crate::foundation::core::Rgba8;
use crate::foundation::math::mix;

/// What a fading fill blends toward as opacity drops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientTarget {
    /// Keep the colour and lower its alpha.
    #[default]
    Transparent,
    /// Mix toward opaque white.
    #[serde(alias = "solid_white")]
    FadeToWhite,
    /// Mix toward opaque black.
    #[serde(alias = "solid_black")]
    FadeToBlack,
}

/// A colour ready to hand to a drawing surface.
///
/// `alpha == None` means the colour was produced by mixing and is fully opaque.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Straight alpha in `0..=1`, absent for mixed opaque colours.
    pub alpha: Option<f64>,
}

impl RenderColor {
    /// Fully opaque colour.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: None,
        }
    }

    /// Colour with explicit alpha.
    pub fn translucent(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        Self {
            r,
            g,
            b,
            alpha: Some(alpha),
        }
    }

    /// Quantize for a raster surface.
    pub fn to_rgba8(self) -> Rgba8 {
        match self.alpha {
            None => Rgba8::opaque(self.r, self.g, self.b),
            Some(a) => Rgba8::with_alpha(self.r, self.g, self.b, a),
        }
    }
}

impl std::fmt::Display for RenderColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.alpha {
            None => write!(f, "rgb({},{},{})", self.r, self.g, self.b),
            Some(a) => write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, a),
        }
    }
}

impl From<Rgba8> for RenderColor {
    fn from(c: Rgba8) -> Self {
        match c.a {
            255 => Self::opaque(c.r, c.g, c.b),
            a => Self::translucent(c.r, c.g, c.b, f64::from(a) / 255.0),
        }
    }
}

impl From<Color> for RenderColor {
    fn from(c: Color) -> Self {
        match c {
            Color::Rgb { r, g, b } => Self::opaque(r, g, b),
            Color::Hsl { h, s, l } => {
                let [r, g, b] = hsl_to_rgb8(h, s, l);
                Self::opaque(r, g, b)
            }
        }
    }
}

/// Blend `color` for a fill drawn at `opacity` toward `target`.
///
/// Callers clamp `opacity` to `>= 0`; values above 1 are not meaningful.
pub fn resolve(color: Color, opacity: f64, target: GradientTarget) -> RenderColor {
    let t = 1.0 - opacity;
    match color {
        Color::Hsl { h, s, l } => {
            let (s, l) = match target {
                GradientTarget::Transparent => {
                    let [r, g, b] = hsl_to_rgb8(h, s, l);
                    return RenderColor::translucent(r, g, b, opacity);
                }
                GradientTarget::FadeToWhite => (mix(s, 0.0, t), mix(l, 100.0, t)),
                GradientTarget::FadeToBlack => (s, mix(l, 0.0, t)),
            };
            let [r, g, b] = hsl_to_rgb8(h, s, l);
            RenderColor::opaque(r, g, b)
        }
        Color::Rgb { r, g, b } => {
            let toward = match target {
                GradientTarget::Transparent => {
                    return RenderColor::translucent(r, g, b, opacity);
                }
                GradientTarget::FadeToWhite => 255.0,
                GradientTarget::FadeToBlack => 0.0,
            };
            let ch = |c: u8| mix(f64::from(c), toward, t).round().clamp(0.0, 255.0) as u8;
            RenderColor::opaque(ch(r), ch(g), ch(b))
        }
    }
}

/// HSL (degrees, percent, percent) to 8-bit sRGB.
pub(crate) fn hsl_to_rgb8(h: f64, s: f64, l: f64) -> [u8; 3] {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;

    if s == 0.0 {
        let v = to_u8(l);
        return [v, v, v];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    [
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/color/resolve.rs"]
mod tests;
