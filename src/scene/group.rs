use rand::RngCore;

use crate::color::parse::{Color, ColorResolver};
use crate::config::settings::{FillColorMode, Settings};
use crate::foundation::core::Point;
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::foundation::rng::{uniform, unit};
use crate::noise::field::NoiseField;

/// Horizontal overscan on both sides of the scene so rotated lines reach the corners.
pub(crate) const X_OVERSCAN: f64 = 50.0;
const BEND_FREQUENCY: f64 = 0.002;
const LINE_JITTER: f64 = 5.0;

/// One contour line inside a [`WaveGroup`].
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Offset from the group's `base_y`.
    pub relative_y: f64,
    /// Phase added to the detail noise's x coordinate.
    pub noise_phase: f64,
    /// Multiplier on the large-scale bend.
    pub amplitude_mod: f64,
}

/// A recyclable cluster of parallel lines scrolling together.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveGroup {
    /// Scroll position in scene units.
    pub base_y: f64,
    /// Per-group speed factor, multiplied by the global wave speed.
    pub speed: f64,
    /// Noise phase that keeps groups sharing world time out of sync.
    pub offset: f64,
    /// Lines in top-to-bottom order.
    pub lines: Vec<Line>,
    /// Fill colour resolved at the last (re)colour.
    pub color: Color,
    /// Random colour held until the next recycle.
    pub sticky_color: Option<Color>,
}

/// Inputs shared by every group operation.
#[derive(Clone, Copy)]
pub struct GroupContext<'a> {
    /// Current settings snapshot.
    pub settings: &'a Settings,
    /// Colour parser for the single-colour policy.
    pub colors: &'a ColorResolver,
    /// Scene extent.
    pub diagonal: f64,
}

/// World time shared by every line this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneClock {
    /// Detail-noise time; grows by 0.05 per tick.
    pub time: f64,
    /// Bend-noise time; grows by `0.05 * bendSpeed` per tick.
    pub bend_time: f64,
}

impl SceneClock {
    /// Advance by one tick.
    pub fn advance(&mut self, bend_speed: f64) {
        self.time += 0.05;
        self.bend_time += 0.05 * bend_speed;
    }
}

impl WaveGroup {
    /// Build a group at `base_y` with fresh speed, phase, colour and lines.
    pub fn spawn(base_y: f64, ctx: GroupContext<'_>, rng: &mut dyn RngCore) -> Self {
        let speed = uniform(rng, 0.2, 0.3);
        let offset = uniform(rng, 0.0, 50.0);
        let mut group = Self {
            base_y,
            speed,
            offset,
            lines: Vec::new(),
            color: ctx.colors.parse(&ctx.settings.fill_color),
            sticky_color: None,
        };
        recolor(&mut group, ctx, rng);
        regenerate_lines(&mut group, ctx.settings, rng);
        group
    }
}

/// Scroll the group forward by one tick.
pub fn advance(group: &mut WaveGroup, wave_speed: f64) {
    group.base_y += group.speed * wave_speed;
}

/// Whether the group has scrolled past the visible range.
pub fn is_off_screen(group: &WaveGroup, diagonal: f64) -> bool {
    group.base_y > diagonal + 200.0
}

/// Move the group back to `base_y` and regenerate its colour and lines.
pub fn recycle(group: &mut WaveGroup, base_y: f64, ctx: GroupContext<'_>, rng: &mut dyn RngCore) {
    group.base_y = base_y;
    group.sticky_color = None;
    recolor(group, ctx, rng);
    regenerate_lines(group, ctx.settings, rng);
}

/// Apply the colour policy. Only called at spawn and recycle.
pub fn recolor(group: &mut WaveGroup, ctx: GroupContext<'_>, rng: &mut dyn RngCore) {
    group.color = match ctx.settings.fill_color_mode {
        FillColorMode::Single => ctx.colors.parse(&ctx.settings.fill_color),
        FillColorMode::Random => *group.sticky_color.get_or_insert_with(|| random_color(rng)),
        FillColorMode::Rainbow => {
            let t = if ctx.diagonal > 0.0 {
                (group.base_y / ctx.diagonal).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Color::Hsl {
                h: (t * 360.0).floor(),
                s: 70.0,
                l: 50.0,
            }
        }
    };
}

/// A saturated, mid-lightness colour with uniformly random hue.
pub fn random_color(rng: &mut dyn RngCore) -> Color {
    let h = (unit(rng) * 360.0).floor();
    let s = 60.0 + (unit(rng) * 20.0).floor();
    let l = 45.0 + (unit(rng) * 15.0).floor();
    Color::Hsl { h, s, l }
}

/// Replace the group's lines with a fresh random set.
pub fn regenerate_lines(group: &mut WaveGroup, settings: &Settings, rng: &mut dyn RngCore) {
    let min = f64::from(settings.group_min);
    let max = f64::from(settings.group_max);
    let count = (min + unit(rng) * (max - min + 1.0)).floor().max(1.0) as usize;

    group.lines.clear();
    group.lines.extend((0..count).map(|i| {
        let spread = if count > 1 {
            (i as f64 / (count - 1) as f64) * settings.group_spread
        } else {
            0.0
        };
        let relative_y = spread + (unit(rng) - 0.5) * LINE_JITTER;
        let noise_phase = uniform(rng, 0.0, 10.0);
        let amplitude_mod = uniform(rng, 0.8, 1.2);
        Line {
            relative_y,
            noise_phase,
            amplitude_mod,
        }
    }));
}

/// Sample one line's polyline across `[-50, diagonal + 50]` into `out`.
///
/// Every unbounded axis goes through the wrapped sampler.
pub fn sample_line(
    group: &WaveGroup,
    line: &Line,
    clock: SceneClock,
    ctx: GroupContext<'_>,
    noise: &NoiseField,
    rng: &mut dyn RngCore,
    out: &mut Vec<Point>,
) -> ShorelineResult<()> {
    let s = ctx.settings;
    let step = f64::from(s.resolution_step.max(1));
    let end = ctx.diagonal + X_OVERSCAN;
    let base = group.base_y + line.relative_y;
    let bend_y = clock.bend_time + group.offset;
    let detail_y = clock.time * s.detail_speed + group.offset;

    out.clear();
    let mut k = 0u32;
    loop {
        let x = -X_OVERSCAN + f64::from(k) * step;
        if x > end {
            break;
        }
        let large = noise.sample_wrapped(x * BEND_FREQUENCY, bend_y) * s.wave_amplitude;
        let detail = noise.sample_wrapped(x / s.detail_spread + line.noise_phase, detail_y)
            * s.detail_amp;
        let mut y = base + large * line.amplitude_mod + detail;
        if s.roughness > 0.0 {
            y += (unit(rng) - 0.5) * s.roughness;
        }
        if !y.is_finite() {
            return Err(ShorelineError::render(format!(
                "non-finite line sample at x={x} (base_y={})",
                group.base_y
            )));
        }
        out.push(Point::new(x, y));
        k += 1;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/group.rs"]
mod tests;
