use rand::RngCore;

use crate::config::settings::Settings;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::rng::unit;

/// Speckle side length class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeckSize {
    /// 0.8 units.
    Fine,
    /// 1.2 units.
    Coarse,
}

impl SpeckSize {
    /// Side length in scene units.
    pub fn side(self) -> f64 {
        match self {
            Self::Fine => 0.8,
            Self::Coarse => 1.2,
        }
    }
}

/// One speckle, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SandParticle {
    /// Horizontal position in `[0, diagonal)`.
    pub x: f64,
    /// Vertical position in `(diagonal - sandHeight, diagonal]`.
    pub y: f64,
    /// Side length class.
    pub size: SpeckSize,
}

impl SandParticle {
    /// Axis-aligned square covered by this speckle.
    pub fn rect(&self) -> Rect {
        let side = self.size.side();
        Rect::from_origin_size(Point::new(self.x, self.y), (side, side))
    }
}

/// Static speckle layer anchored to the bottom of the scene square.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SandField {
    particles: Vec<SandParticle>,
}

impl SandField {
    /// Generate `sandDensity` speckles concentrated toward the bottom edge.
    pub fn generate(settings: &Settings, diagonal: f64, rng: &mut dyn RngCore) -> Self {
        let particles = (0..settings.sand_density)
            .map(|_| {
                let x = unit(rng) * diagonal;
                let depth = unit(rng).powf(settings.sand_power) * settings.sand_height;
                let size = if unit(rng) < 0.5 {
                    SpeckSize::Fine
                } else {
                    SpeckSize::Coarse
                };
                SandParticle {
                    x,
                    y: diagonal - depth,
                    size,
                }
            })
            .collect();
        Self { particles }
    }

    /// All speckles in generation order.
    pub fn particles(&self) -> &[SandParticle] {
        &self.particles
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Every speckle as one compound path, so the layer costs a single fill.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for p in &self.particles {
            let r = p.rect();
            path.move_to((r.x0, r.y0));
            path.line_to((r.x1, r.y0));
            path.line_to((r.x1, r.y1));
            path.line_to((r.x0, r.y1));
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sand.rs"]
mod tests;
