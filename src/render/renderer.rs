use rand::RngCore;

use crate::color::parse::ColorResolver;
use crate::color::resolve::{RenderColor, resolve};
use crate::config::settings::Settings;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, SurfaceSize};
use crate::foundation::error::ShorelineResult;
use crate::noise::field::NoiseField;
use crate::render::surface::DrawingSurface;
use crate::scene::group::{GroupContext, sample_line};
use crate::scene::simulator::SceneSimulator;

/// Counts of what one frame drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fill bands between adjacent lines.
    pub fills: usize,
    /// White occlusion overlays.
    pub occlusions: usize,
    /// Line strokes.
    pub strokes: usize,
    /// Whether the sand layer was drawn.
    pub sand: bool,
}

/// Composes the scene onto a surface, one frame per call.
#[derive(Debug, Default)]
pub struct Renderer {
    lines: Vec<Vec<Point>>,
}

/// Inputs of one frame.
pub struct FrameInputs<'a> {
    /// Current settings.
    pub settings: &'a Settings,
    /// Colour parser.
    pub colors: &'a ColorResolver,
    /// Noise source for line geometry.
    pub noise: &'a NoiseField,
}

impl Renderer {
    /// Renderer with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the square scene of side `diagonal` onto the surface: centered, rotated by
    /// `direction` degrees and scaled by `waveScale`.
    pub fn scene_transform(size: SurfaceSize, settings: &Settings, diagonal: f64) -> Affine {
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        Affine::translate((w / 2.0, h / 2.0))
            * Affine::rotate(settings.direction.to_radians())
            * Affine::scale(settings.wave_scale)
            * Affine::translate((-diagonal / 2.0, -diagonal / 2.0))
    }

    /// Clear, draw sand, advance the simulation by one tick and draw every group.
    pub fn draw_frame<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        inputs: FrameInputs<'_>,
        scene: &mut SceneSimulator,
        rng: &mut dyn RngCore,
    ) -> ShorelineResult<FrameStats> {
        let FrameInputs {
            settings,
            colors,
            noise,
        } = inputs;
        let size = surface.size();
        let mut stats = FrameStats::default();

        surface.fill_rect(
            Rect::new(0.0, 0.0, f64::from(size.width), f64::from(size.height)),
            RenderColor::from(Rgba8::WHITE),
        );

        let stroke_width = settings.effective_stroke_width(f64::from(size.width));
        surface.push_transform(Self::scene_transform(size, settings, scene.diagonal()));

        if settings.sand_density > 0 && !scene.sand().is_empty() {
            let tint = RenderColor::from(colors.parse(&settings.sand_color));
            surface.fill_path(&scene.sand().to_path(), tint);
            stats.sand = true;
        }

        scene.tick(settings, colors, rng);

        let result = self.draw_groups(surface, settings, colors, noise, scene, rng, stroke_width);
        surface.pop_transform();
        let drawn = result?;

        stats.fills = drawn.fills;
        stats.occlusions = drawn.occlusions;
        stats.strokes = drawn.strokes;
        Ok(stats)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_groups<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        settings: &Settings,
        colors: &ColorResolver,
        noise: &NoiseField,
        scene: &SceneSimulator,
        rng: &mut dyn RngCore,
        stroke_width: f64,
    ) -> ShorelineResult<FrameStats> {
        let mut stats = FrameStats::default();
        let ctx = GroupContext {
            settings,
            colors,
            diagonal: scene.diagonal(),
        };
        let occlude = settings.occlusion_mode
            && !(settings.fill_enabled && settings.fill_ignore_occlusion);
        let occlusion_color =
            RenderColor::translucent(255, 255, 255, settings.occlusion_strength / 100.0);
        let front_color = RenderColor::translucent(0, 0, 0, settings.front_line_opacity / 100.0);
        let line_color = RenderColor::from(Rgba8::BLACK);

        for group in scene.groups() {
            let n = group.lines.len();
            self.lines.resize_with(n, Vec::new);
            for (line, pts) in group.lines.iter().zip(self.lines.iter_mut()) {
                sample_line(group, line, scene.clock(), ctx, noise, rng, pts)?;
            }

            for ordinal in 0..n {
                let (index, forward_neighbour, backward_neighbour) =
                    visit(ordinal, n, settings.occlusion_reverse);
                let current = &self.lines[index];

                if settings.fill_enabled {
                    if let Some(next) = forward_neighbour {
                        let opacity = (settings.fill_opacity / 100.0
                            - settings.fill_opacity_decay / 100.0 * ordinal as f64)
                            .max(0.0);
                        let color = resolve(group.color, opacity, settings.fill_gradient_type);
                        surface.fill_path(&band(current, &self.lines[next]), color);
                        stats.fills += 1;
                    }
                }

                if occlude {
                    if let Some(prev) = backward_neighbour {
                        surface.fill_path(&band(current, &self.lines[prev]), occlusion_color);
                        stats.occlusions += 1;
                    }
                }

                let color = if ordinal + 1 == n {
                    front_color
                } else {
                    line_color
                };
                surface.stroke_path(&polyline(current), stroke_width, color);
                stats.strokes += 1;
            }
        }
        Ok(stats)
    }
}

/// Line index visited at `ordinal`, plus the next line in visiting order and the
/// previously visited one.
fn visit(ordinal: usize, n: usize, reverse: bool) -> (usize, Option<usize>, Option<usize>) {
    if reverse {
        let index = n - 1 - ordinal;
        (index, index.checked_sub(1), (index + 1 < n).then_some(index + 1))
    } else {
        let index = ordinal;
        (index, (index + 1 < n).then_some(index + 1), index.checked_sub(1))
    }
}

fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
    }
    path
}

/// Closed region: `a` left to right, then `b` right to left.
fn band(a: &[Point], b: &[Point]) -> BezPath {
    let mut path = polyline(a);
    for p in b.iter().rev() {
        path.line_to(*p);
    }
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
