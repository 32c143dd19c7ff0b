use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::settings::Settings;
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::foundation::rng::EngineRng;
use crate::host::scheduler::FrameScheduler;
use crate::render::surface::DrawingSurface;

/// Requests a host sends to a running engine, in either strategy.
///
/// Serialized with a `type` tag:
/// `{"type":"updateSettings","config":{...}}`, `{"type":"resize","width":800,"height":450}`,
/// `{"type":"stop"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlRequest {
    /// Merge a partial config.
    UpdateSettings {
        /// Partial or full settings object.
        config: Value,
    },
    /// Resize the surface and rebuild the scene.
    Resize {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Halt the frame loop.
    Stop,
}

impl ControlRequest {
    /// Decode one request.
    pub fn from_json(json: &str) -> ShorelineResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ShorelineError::config(format!("invalid control message: {e}")))
    }

    /// Encode for transport.
    pub fn to_json(&self) -> ShorelineResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ShorelineError::config(format!("encode control message: {e}")))
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateSettings { .. } => "updateSettings",
            Self::Resize { .. } => "resize",
            Self::Stop => "stop",
        }
    }
}

/// Everything a strategy needs to start an engine. Returned intact when a start is refused.
pub struct Launch<S: DrawingSurface> {
    /// Surface to draw into.
    pub surface: S,
    /// Initial settings.
    pub settings: Settings,
    /// Random source for noise, groups and sand.
    pub rng: EngineRng,
    /// Frame pacing.
    pub scheduler: Box<dyn FrameScheduler>,
}

/// Messages on the channel to the render thread.
pub(crate) enum ControlMessage<S: DrawingSurface> {
    /// Hand over the surface and initial state. Only the first message may be `Init`.
    Init(Launch<S>),
    /// A host request.
    Request(ControlRequest),
}

/// The render thread's answer to `Init`.
pub(crate) enum Handshake<S: DrawingSurface> {
    Ready,
    Rejected {
        launch: Launch<S>,
        reason: ShorelineError,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/host/message.rs"]
mod tests;
