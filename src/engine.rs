//! The rendering engine: one surface, one scene, one frame per call.

use serde_json::Value;

use crate::color::parse::ColorResolver;
use crate::config::settings::Settings;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::foundation::rng::EngineRng;
use crate::host::message::ControlRequest;
use crate::noise::field::NoiseField;
use crate::render::renderer::{FrameInputs, FrameStats, Renderer};
use crate::render::surface::DrawingSurface;
use crate::scene::simulator::SceneSimulator;

/// Running totals of the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Frames drawn and presented.
    pub frames_drawn: u64,
    /// Frames that failed and were skipped.
    pub frames_failed: u64,
    /// Scene rebuilds after construction.
    pub reinits: u64,
}

/// Owns every piece of scene state for one surface.
///
/// Either execution strategy drives exactly one `Engine`; given the same seed, settings and
/// message sequence, both produce the same drawing calls.
pub struct Engine<S: DrawingSurface> {
    surface: S,
    settings: Settings,
    colors: ColorResolver,
    noise: NoiseField,
    scene: SceneSimulator,
    renderer: Renderer,
    rng: EngineRng,
    running: bool,
    last_frame: FrameStats,
    stats: EngineStats,
}

impl<S: DrawingSurface> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("size", &self.surface.size())
            .field("running", &self.running)
            .field("diagonal", &self.scene.diagonal())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S: DrawingSurface> Engine<S> {
    /// Build the engine for `surface`. The surface size overrides `width`/`height`.
    pub fn new(surface: S, settings: Settings, rng: EngineRng) -> Self {
        Self::with_color_resolver(surface, settings, rng, ColorResolver::default())
    }

    /// Like [`Engine::new`] with a custom colour name facility.
    #[tracing::instrument(skip_all, fields(width = surface.size().width, height = surface.size().height))]
    pub fn with_color_resolver(
        surface: S,
        settings: Settings,
        mut rng: EngineRng,
        colors: ColorResolver,
    ) -> Self {
        let size = surface.size();
        let settings = Settings {
            width: size.width,
            height: size.height,
            ..settings
        }
        .normalized();

        let noise = NoiseField::new(rng.as_mut());
        let diagonal = size.diagonal(settings.wave_scale);
        let scene = SceneSimulator::new(&settings, &colors, diagonal, rng.as_mut());
        tracing::debug!(diagonal, groups = scene.groups().len(), "engine initialized");

        Self {
            surface,
            settings,
            colors,
            noise,
            scene,
            renderer: Renderer::new(),
            rng,
            running: true,
            last_frame: FrameStats::default(),
            stats: EngineStats::default(),
        }
    }

    /// Draw one frame. Failures are logged and skipped; returns whether a frame was presented.
    pub fn frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.try_frame() {
            Ok(stats) => {
                self.last_frame = stats;
                self.stats.frames_drawn += 1;
                true
            }
            Err(err) => {
                self.stats.frames_failed += 1;
                tracing::warn!(%err, frame = self.stats.frames_drawn, "frame skipped");
                false
            }
        }
    }

    /// Draw one frame, surfacing any failure.
    pub fn try_frame(&mut self) -> ShorelineResult<FrameStats> {
        self.surface.begin_frame()?;
        let stats = self.renderer.draw_frame(
            &mut self.surface,
            FrameInputs {
                settings: &self.settings,
                colors: &self.colors,
                noise: &self.noise,
            },
            &mut self.scene,
            self.rng.as_mut(),
        )?;
        self.surface.end_frame()?;
        Ok(stats)
    }

    /// Merge a partial JSON config. Invalid patches are logged and ignored.
    pub fn apply_config(&mut self, patch: &Value) {
        match self.settings.merged(patch) {
            Ok(next) => self.apply_settings(next),
            Err(err) => tracing::warn!(%err, "settings update ignored"),
        }
    }

    /// Replace the settings wholesale, resizing and rebuilding the scene when needed.
    pub fn apply_settings(&mut self, next: Settings) {
        let mut next = next.normalized();
        if (next.width, next.height) != (self.settings.width, self.settings.height) {
            if let Err(err) = self.resize_surface(next.width, next.height) {
                tracing::warn!(%err, "size change in settings ignored");
                next.width = self.settings.width;
                next.height = self.settings.height;
            }
        }
        let reinit = self.settings.needs_reinit(&next);
        self.settings = next;
        if reinit {
            self.reinitialize();
        }
    }

    /// Resize the surface and rebuild the scene for the new diagonal.
    pub fn resize(&mut self, width: u32, height: u32) {
        match self.resize_surface(width, height) {
            Ok(()) => {
                self.settings.width = width;
                self.settings.height = height;
                self.reinitialize();
            }
            Err(err) => tracing::warn!(%err, width, height, "resize ignored"),
        }
    }

    /// Dispatch one control request. Returns `false` once the engine has stopped.
    pub fn handle(&mut self, request: ControlRequest) -> bool {
        match request {
            ControlRequest::UpdateSettings { config } => self.apply_config(&config),
            ControlRequest::Resize { width, height } => self.resize(width, height),
            ControlRequest::Stop => self.stop(),
        }
        self.running
    }

    /// Halt the frame loop. Later frames are no-ops.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.stats.frames_drawn, "engine stopped");
        }
        self.running = false;
    }

    /// Whether frames are still being produced.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scene state.
    pub fn scene(&self) -> &SceneSimulator {
        &self.scene
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// What the last successful frame drew.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Loop totals.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Take the surface back, dropping the scene.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn resize_surface(&mut self, width: u32, height: u32) -> ShorelineResult<()> {
        let size = SurfaceSize::new(width, height)?;
        if size == self.surface.size() {
            return Ok(());
        }
        self.surface
            .resize(size)
            .map_err(|e| ShorelineError::validation(format!("surface rejected {width}x{height}: {e}")))
    }

    #[tracing::instrument(skip_all, fields(generation = self.scene.generation() + 1))]
    fn reinitialize(&mut self) {
        let diagonal = self.surface.size().diagonal(self.settings.wave_scale);
        self.scene
            .reinitialize(&self.settings, &self.colors, diagonal, self.rng.as_mut());
        self.stats.reinits += 1;
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
