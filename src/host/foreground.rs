use serde_json::Value;

use crate::engine::Engine;
use crate::host::message::{ControlRequest, Launch};
use crate::host::scheduler::FrameScheduler;
use crate::render::surface::DrawingSurface;

/// Runs the engine on the caller's thread.
///
/// The host drives it either one slot at a time through [`ForegroundHost::on_frame`] or
/// to completion through [`ForegroundHost::run`].
pub struct ForegroundHost<S: DrawingSurface> {
    engine: Engine<S>,
    scheduler: Box<dyn FrameScheduler>,
}

impl<S: DrawingSurface> ForegroundHost<S> {
    /// Build the engine in place.
    pub fn new(launch: Launch<S>) -> Self {
        let Launch {
            surface,
            settings,
            rng,
            scheduler,
        } = launch;
        Self {
            engine: Engine::new(surface, settings, rng),
            scheduler,
        }
    }

    /// One frame callback. Returns `false` once stopped; no frame is drawn then.
    pub fn on_frame(&mut self) -> bool {
        if !self.engine.is_running() {
            return false;
        }
        self.engine.frame();
        true
    }

    /// Draw frames until the scheduler runs out or the engine stops.
    pub fn run(&mut self) -> u64 {
        let mut slots = 0;
        while self.engine.is_running() && self.scheduler.next_frame() {
            self.engine.frame();
            slots += 1;
        }
        slots
    }

    /// Apply a request. Requests after `stop` are discarded.
    pub fn post(&mut self, request: ControlRequest) {
        if !self.engine.is_running() {
            tracing::debug!(kind = request.kind(), "request after stop discarded");
            return;
        }
        self.engine.handle(request);
    }

    /// Merge a partial config.
    pub fn apply_config(&mut self, patch: Value) {
        self.post(ControlRequest::UpdateSettings { config: patch });
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.post(ControlRequest::Resize { width, height });
    }

    /// Stop the frame loop.
    pub fn stop(&mut self) {
        self.post(ControlRequest::Stop);
    }

    /// The engine being driven.
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// Take the surface back.
    pub fn into_surface(self) -> S {
        self.engine.into_surface()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/foreground.rs"]
mod tests;
