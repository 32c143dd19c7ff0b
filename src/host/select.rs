use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::ShorelineResult;
use crate::host::background::{BackgroundHost, StartError};
use crate::host::foreground::ForegroundHost;
use crate::host::message::{ControlRequest, Launch};
use crate::render::surface::DrawingSurface;

/// Which strategy the caller would like.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyPreference {
    /// Background when the host supports it, else foreground.
    #[default]
    Auto,
    /// Always the caller's thread.
    Foreground,
    /// Background, falling back to foreground when unavailable.
    Background,
}

/// The strategy actually running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Frames are drawn on the caller's thread.
    Foreground,
    /// Frames are drawn on a dedicated render thread.
    Background,
}

/// What the host environment can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Threads can be spawned.
    pub background_threads: bool,
}

impl HostCapabilities {
    /// Probe the current target.
    pub fn detect() -> Self {
        Self {
            background_threads: !cfg!(target_family = "wasm"),
        }
    }

    /// A host that can only run in the foreground.
    pub fn foreground_only() -> Self {
        Self {
            background_threads: false,
        }
    }
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Start options for [`ExecutionHost`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostOpts {
    /// Requested strategy.
    pub preference: StrategyPreference,
    /// Environment capabilities.
    pub capabilities: HostCapabilities,
}

/// A running engine under one of the two strategies.
pub enum ExecutionHost<S: DrawingSurface + 'static> {
    /// On the caller's thread.
    Foreground(ForegroundHost<S>),
    /// On a render thread.
    Background(BackgroundHost<S>),
}

impl<S: DrawingSurface + 'static> ExecutionHost<S> {
    /// Pick a strategy and start the engine.
    ///
    /// A background start that fails before the surface leaves this thread falls back to
    /// the foreground. If the render thread dies after taking the surface, the surface is
    /// gone and an initialization error is returned.
    #[tracing::instrument(skip_all, fields(preference = ?opts.preference))]
    pub fn start(launch: Launch<S>, opts: HostOpts) -> ShorelineResult<Self> {
        let want_background = match opts.preference {
            StrategyPreference::Foreground => false,
            StrategyPreference::Auto | StrategyPreference::Background => {
                opts.capabilities.background_threads
            }
        };
        if !want_background {
            if opts.preference == StrategyPreference::Background {
                tracing::info!("background threads unavailable; running in foreground");
            } else {
                tracing::info!("running in foreground");
            }
            return Ok(Self::Foreground(ForegroundHost::new(launch)));
        }

        match BackgroundHost::start(launch) {
            Ok(host) => {
                tracing::info!("running on background render thread");
                Ok(Self::Background(host))
            }
            Err(StartError::Recoverable { launch, reason }) => {
                tracing::warn!(%reason, "background start failed; running in foreground");
                Ok(Self::Foreground(ForegroundHost::new(launch)))
            }
            Err(StartError::Lost(err)) => Err(err),
        }
    }

    /// The strategy that ended up running.
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Foreground(_) => Strategy::Foreground,
            Self::Background(_) => Strategy::Background,
        }
    }

    /// Deliver a request.
    pub fn post(&mut self, request: ControlRequest) {
        match self {
            Self::Foreground(h) => h.post(request),
            Self::Background(h) => h.post(request),
        }
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

    /// Foreground: draw one frame. Background: report whether the render thread is alive.
    pub fn pump(&mut self) -> bool {
        match self {
            Self::Foreground(h) => h.on_frame(),
            Self::Background(h) => !h.is_finished(),
        }
    }

    /// Run to completion and take the surface back.
    ///
    /// The foreground drives its scheduler on this thread; the background waits for the
    /// render thread.
    pub fn join(self) -> Option<S> {
        match self {
            Self::Foreground(mut h) => {
                h.run();
                Some(h.into_surface())
            }
            Self::Background(h) => h.join(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/select.rs"]
mod tests;
