use rand::RngCore;

use crate::color::parse::ColorResolver;
use crate::config::settings::Settings;
use crate::scene::group::{self, GroupContext, SceneClock, WaveGroup};
use crate::scene::sand::SandField;

/// Smallest vertical gap kept between neighbouring groups after each tick.
pub const MIN_GROUP_GAP: f64 = 20.0;
const POOL_OVERSCAN: f64 = 500.0;

/// Owns the wave-group pool, the sand layer and scene time.
#[derive(Clone, Debug)]
pub struct SceneSimulator {
    groups: Vec<WaveGroup>,
    sand: SandField,
    diagonal: f64,
    clock: SceneClock,
    generation: u64,
}

impl SceneSimulator {
    /// Number of groups needed to cover a scene of extent `diagonal`.
    pub fn pool_size(diagonal: f64, wave_distance: f64) -> usize {
        let spacing = if wave_distance > 0.0 { wave_distance } else { 1.0 };
        ((diagonal + POOL_OVERSCAN) / spacing).ceil().max(1.0) as usize
    }

    /// Build the pool and the sand layer. Groups are spaced `waveDistance` apart from 0.
    pub fn new(
        settings: &Settings,
        colors: &ColorResolver,
        diagonal: f64,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut sim = Self {
            groups: Vec::new(),
            sand: SandField::default(),
            diagonal,
            clock: SceneClock::default(),
            generation: 0,
        };
        sim.populate(settings, colors, rng);
        sim
    }

    /// Discard every group and speckle and rebuild them for a new extent. Scene time is kept.
    pub fn reinitialize(
        &mut self,
        settings: &Settings,
        colors: &ColorResolver,
        diagonal: f64,
        rng: &mut dyn RngCore,
    ) {
        self.diagonal = diagonal;
        self.generation += 1;
        self.populate(settings, colors, rng);
    }

    fn populate(&mut self, settings: &Settings, colors: &ColorResolver, rng: &mut dyn RngCore) {
        let ctx = GroupContext {
            settings,
            colors,
            diagonal: self.diagonal,
        };
        let count = Self::pool_size(self.diagonal, settings.wave_distance);
        self.groups.clear();
        self.groups.reserve(count);
        for i in 0..count {
            let base_y = i as f64 * settings.wave_distance;
            self.groups.push(WaveGroup::spawn(base_y, ctx, rng));
        }
        self.sand = SandField::generate(settings, self.diagonal, rng);
        tracing::debug!(
            groups = count,
            speckles = self.sand.particles().len(),
            diagonal = self.diagonal,
            "scene populated"
        );
    }

    /// Advance time, scroll every group, recycle groups past the bottom and re-space the pool.
    pub fn tick(&mut self, settings: &Settings, colors: &ColorResolver, rng: &mut dyn RngCore) {
        self.clock.advance(settings.bend_speed);
        for g in &mut self.groups {
            group::advance(g, settings.wave_speed);
        }

        let ctx = GroupContext {
            settings,
            colors,
            diagonal: self.diagonal,
        };
        // Every group recycled this tick targets the same pre-recycle minimum.
        let target = self
            .groups
            .iter()
            .map(|g| g.base_y)
            .fold(f64::INFINITY, f64::min)
            - settings.wave_distance;
        for g in &mut self.groups {
            if group::is_off_screen(g, self.diagonal) {
                group::recycle(g, target, ctx, rng);
            }
        }

        self.groups.sort_by(|a, b| a.base_y.total_cmp(&b.base_y));
        self.enforce_spacing();
    }

    /// Walk from the second-to-last group upward, pulling each one at least
    /// [`MIN_GROUP_GAP`] above its successor.
    pub(crate) fn enforce_spacing(&mut self) {
        for i in (0..self.groups.len().saturating_sub(1)).rev() {
            let limit = self.groups[i + 1].base_y - MIN_GROUP_GAP;
            if self.groups[i].base_y > limit {
                self.groups[i].base_y = limit;
            }
        }
    }

    /// Groups in ascending `base_y` order (after the first tick).
    pub fn groups(&self) -> &[WaveGroup] {
        &self.groups
    }

    /// Sand layer.
    pub fn sand(&self) -> &SandField {
        &self.sand
    }

    /// Scene extent the pool was built for.
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// Current scene time.
    pub fn clock(&self) -> SceneClock {
        self.clock
    }

    /// Number of reinitializations since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/simulator.rs"]
mod tests;
