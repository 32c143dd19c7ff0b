use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::names::{ColorNameLookup, CssColorNames};
use crate::foundation::error::{ShorelineError, ShorelineResult};

/// Colour substituted whenever a specification cannot be resolved.
pub const FALLBACK_COLOR: Color = Color::Rgb {
    r: 52,
    g: 152,
    b: 219,
};

/// Canonical parsed colour.
///
/// HSL components are kept as-is (`h` in degrees, `s`/`l` in percent) so that fades can mix
/// saturation and lightness directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Hue/saturation/lightness.
    Hsl {
        /// Hue in degrees.
        h: f64,
        /// Saturation in percent.
        s: f64,
        /// Lightness in percent.
        l: f64,
    },
    /// 8-bit RGB.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
}

/// Anything `parse_color` accepts: an HSL record or a colour string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Already-canonical HSL; passed through unchanged.
    Hsl {
        /// Hue in degrees.
        h: f64,
        /// Saturation in percent.
        s: f64,
        /// Lightness in percent.
        l: f64,
    },
    /// Hex (`#rgb`, `#rrggbb`) or any string the name facility understands.
    Text(String),
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ColorSpec {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses colour specifications, consulting a name facility for non-hex strings.
#[derive(Clone)]
pub struct ColorResolver {
    names: Arc<dyn ColorNameLookup>,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new(Arc::new(CssColorNames))
    }
}

impl std::fmt::Debug for ColorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorResolver").finish_non_exhaustive()
    }
}

impl ColorResolver {
    /// Resolver backed by a custom name facility.
    pub fn new(names: Arc<dyn ColorNameLookup>) -> Self {
        Self { names }
    }

    /// Parse `spec`, substituting [`FALLBACK_COLOR`] on any failure.
    pub fn parse(&self, spec: &ColorSpec) -> Color {
        match self.try_parse(spec) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!(%err, "using fallback colour");
                FALLBACK_COLOR
            }
        }
    }

    /// Parse `spec`, reporting why it could not be resolved.
    pub fn try_parse(&self, spec: &ColorSpec) -> ShorelineResult<Color> {
        match spec {
            ColorSpec::Hsl { h, s, l } => Ok(Color::Hsl {
                h: *h,
                s: *s,
                l: *l,
            }),
            ColorSpec::Text(text) => {
                let text = text.trim();
                if text.starts_with('#') {
                    return parse_hex(text);
                }
                let hex = self
                    .names
                    .lookup(text)
                    .ok_or_else(|| ShorelineError::color(format!("unknown colour \"{text}\"")))?;
                parse_hex(&hex)
            }
        }
    }
}

/// Parse with the default CSS name facility.
pub fn parse_color(spec: impl Into<ColorSpec>) -> Color {
    ColorResolver::default().parse(&spec.into())
}

fn parse_hex(s: &str) -> ShorelineResult<Color> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ShorelineError::color(format!("invalid hex colour \"{s}\"")));
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_owned(),
        _ => {
            return Err(ShorelineError::color(format!(
                "hex colour must be #rgb or #rrggbb, got \"{s}\""
            )));
        }
    };
    let val = u32::from_str_radix(&expanded, 16)
        .map_err(|e| ShorelineError::color(format!("invalid hex colour \"{s}\": {e}")))?;
    Ok(Color::Rgb {
        r: ((val >> 16) & 255) as u8,
        g: ((val >> 8) & 255) as u8,
        b: (val & 255) as u8,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/color/parse.rs"]
mod tests;
